//! Platform-specific paths for editor configuration and snapshots.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/envgen/` (Linux), `~/Library/Application Support/envgen/` (macOS), `%APPDATA%\envgen\` (Windows)
//! - **Editor settings**: `<user config>/editor.toml`
//! - **Snapshots**: `<user config>/snapshots/`
//!
//! # Example
//!
//! ```rust,no_run
//! use envgen_config::paths;
//!
//! println!("Settings: {:?}", paths::editor_config_path());
//! if let Some(path) = paths::find_snapshot("init") {
//!     println!("Found snapshot at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "envgen";

/// File name of the editor settings.
const CONFIG_FILE: &str = "editor.toml";

/// Subdirectory name for snapshots.
const SNAPSHOTS_SUBDIR: &str = "snapshots";

/// Extension of snapshot files.
const SNAPSHOT_EXT: &str = "json";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default editor settings file.
pub fn editor_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Returns the user-specific snapshots directory.
pub fn user_snapshots_dir() -> PathBuf {
    user_config_dir().join(SNAPSHOTS_SUBDIR)
}

/// Find a snapshot file by name.
///
/// `name` may be a path to an existing file, or a snapshot name (with or
/// without `.json`) looked up in [`user_snapshots_dir`].
pub fn find_snapshot(name: &str) -> Option<PathBuf> {
    find_snapshot_in(name, &user_snapshots_dir())
}

/// Like [`find_snapshot`], searching `dir` instead of the user directory.
pub fn find_snapshot_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Some(direct);
    }

    let file_name = if Path::new(name)
        .extension()
        .is_some_and(|ext| ext == SNAPSHOT_EXT)
    {
        name.to_string()
    } else {
        format!("{name}.{SNAPSHOT_EXT}")
    };
    let candidate = dir.join(file_name);
    candidate.is_file().then_some(candidate)
}

/// Lists snapshot names in `dir`, sorted.
pub fn list_snapshots_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == SNAPSHOT_EXT))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}
