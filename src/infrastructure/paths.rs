//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! points at the working directory Zellij was started from (normally the
//! user's home directory).

use std::path::PathBuf;

/// Returns the plugin's data directory, `/host/.local/share/zellij/eventscout`.
///
/// Holds the trace file written by the observability layer.
///
/// # Examples
///
/// ```
/// use eventscout::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/eventscout");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("eventscout")
}

/// Maps a user-supplied path into the sandbox.
///
/// `~` and `~/…` resolve under `/host`; absolute paths that already carry the
/// `/host` prefix are left alone, and other absolute paths are re-rooted
/// under `/host` since the sandbox cannot see the host root directly.
/// Relative paths are returned unchanged.
///
/// # Examples
///
/// ```
/// use eventscout::infrastructure::to_sandbox_path;
///
/// assert_eq!(to_sandbox_path("~/themes/mine.toml"), "/host/themes/mine.toml");
/// assert_eq!(to_sandbox_path("~"), "/host");
/// assert_eq!(to_sandbox_path("/host/themes/mine.toml"), "/host/themes/mine.toml");
/// assert_eq!(to_sandbox_path("/etc/theme.toml"), "/host/etc/theme.toml");
/// assert_eq!(to_sandbox_path("theme.toml"), "theme.toml");
/// ```
#[must_use]
pub fn to_sandbox_path(path: &str) -> String {
    if path == "~" {
        "/host".to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "/host" || path.starts_with("/host/") || !path.starts_with('/') {
        path.to_string()
    } else {
        format!("/host{path}")
    }
}
