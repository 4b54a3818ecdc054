use openspec_core::paths::OPENSPEC_DIR;
use std::path::{Path, PathBuf};

/// Resolve the OpenSpec project root.
///
/// Priority:
/// 1. `--root` flag / `OPENSPEC_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `openspec/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_openspec_root(&cwd).unwrap_or(cwd)
}

/// Nearest ancestor of `start` (inclusive) containing an `openspec/` directory.
pub fn find_openspec_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(OPENSPEC_DIR).is_dir())
        .map(Path::to_path_buf)
}
