//! Per-platform application data directories.
//!
//! - macOS: ~/Library/Application Support/tpad
//! - Linux: $XDG_DATA_HOME/tpad or ~/.local/share/tpad
//! - Windows: %APPDATA%\tpad

use std::io;
use std::path::PathBuf;

const APP_NAME: &str = "tpad";
const LOG_DIR: &str = "logs";

fn app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        data_dir_macos()
    }

    #[cfg(target_os = "linux")]
    {
        data_dir_linux()
    }

    #[cfg(target_os = "windows")]
    {
        data_dir_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn data_dir_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn data_dir_linux() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg).join(APP_NAME))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
    }
}

#[cfg(target_os = "windows")]
fn data_dir_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

/// Creates the log directory if needed and returns it.
pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no application data directory")
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_under_app_dir() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with(format!("{APP_NAME}/{LOG_DIR}")));
        }
    }
}
