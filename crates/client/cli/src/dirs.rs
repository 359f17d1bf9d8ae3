//! Platform-specific directory utilities

use std::path::PathBuf;

/// Directory holding the bundled content, unless overridden.
///
/// `CONTENT_DATA_DIR` wins; otherwise the content crate's `data/` directory
/// as laid out in this workspace.
pub fn content_dir() -> PathBuf {
    std::env::var_os("CONTENT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../game/content/data"
            ))
        })
}

/// Get the platform-specific save directory
///
/// `SAVE_DATA_DIR` wins; otherwise:
/// - macOS: `~/Library/Application Support/combat/saves`
/// - Linux: `~/.local/share/combat/saves` (or `$XDG_DATA_HOME/combat/saves`)
/// - Windows: `%APPDATA%\combat\saves`
/// - Fallback: `./save_data`
pub fn save_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("SAVE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "combat")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
