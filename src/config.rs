//! Sheet-reference resolution.
//!
//! The atlas descriptor's `meta.image` is written by a remote service
//! and arrives in one of three shapes: an absolute path, a root-relative
//! path (`/outputs/hero_sheet.png`, relative to the service's asset
//! root), or a bare relative path. All three must resolve to a local
//! file without the descriptor being rewritten.

use std::path::{Path, PathBuf};

/// Base-directory configuration for resolving root-relative sheet refs.
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Asset root (from CLI or ENV). Defaults to the current directory.
    pub base_dir: PathBuf,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (SPRITEPLAY_BASE) → current directory
    pub fn from_env_and_cli(cli_base: Option<PathBuf>) -> Self {
        let base_dir = cli_base
            .or_else(|| std::env::var("SPRITEPLAY_BASE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        Self { base_dir }
    }

    /// Resolve a sheet image reference against the atlas file's own
    /// directory and the configured base.
    ///
    /// - Root-relative (`/x/y.png`): joined under the base dir. If that
    ///   file is missing but the literal absolute path exists, the
    ///   literal path wins (tolerates genuinely absolute refs).
    /// - Absolute in the platform sense (e.g. a Windows drive path):
    ///   used as-is.
    /// - Anything else: joined to the atlas directory.
    pub fn resolve_sheet_ref(&self, atlas_dir: &Path, image_ref: &str) -> PathBuf {
        if let Some(stripped) = image_ref.strip_prefix('/') {
            let under_base = self.base_dir.join(stripped);
            let literal = PathBuf::from(image_ref);
            if !under_base.exists() && literal.exists() {
                return literal;
            }
            return under_base;
        }

        let path = Path::new(image_ref);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        atlas_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PathConfig {
        PathConfig {
            base_dir: PathBuf::from("/srv/assets"),
        }
    }

    #[test]
    fn root_relative_refs_join_the_base_dir() {
        let path = config().resolve_sheet_ref(Path::new("/tmp/atlas"), "/outputs/hero_sheet.png");
        assert_eq!(path, PathBuf::from("/srv/assets/outputs/hero_sheet.png"));
    }

    #[test]
    fn relative_refs_join_the_atlas_dir() {
        let path = config().resolve_sheet_ref(Path::new("/tmp/atlas"), "hero_sheet.png");
        assert_eq!(path, PathBuf::from("/tmp/atlas/hero_sheet.png"));
    }

    #[test]
    fn nested_relative_refs_keep_their_structure() {
        let path = config().resolve_sheet_ref(Path::new("/tmp/atlas"), "outputs/hero_sheet.png");
        assert_eq!(path, PathBuf::from("/tmp/atlas/outputs/hero_sheet.png"));
    }

    #[test]
    fn env_default_falls_back_to_current_dir() {
        // No CLI override; ENV may or may not be set in the test
        // environment, so only the CLI-priority branch is asserted.
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/explicit")));
        assert_eq!(config.base_dir, PathBuf::from("/explicit"));
    }
}
