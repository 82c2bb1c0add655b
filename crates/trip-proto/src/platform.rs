//! Per-user locations for trip data, config and logs.

use std::path::PathBuf;

const APP_DIR: &str = "trip";

/// `~/.local/share/trip` on Unix (macOS included), the local app-data dir on
/// Windows unless a portable `data/` folder sits beside the executable.
pub fn data_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Some(portable) = beside_exe("data") {
            return portable;
        }
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
    #[cfg(not(windows))]
    {
        home_subdir(&[".local", "share"])
    }
}

/// `~/.config/trip` on Unix; on Windows the executable's folder when it holds
/// a `config.toml`, else the roaming config dir.
pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Some(config) = beside_exe("config.toml") {
            if let Some(dir) = config.parent() {
                return dir.to_path_buf();
            }
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
    #[cfg(not(windows))]
    {
        home_subdir(&[".config"])
    }
}

#[cfg(not(windows))]
fn home_subdir(parts: &[&str]) -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    path.extend(parts);
    path.join(APP_DIR)
}

#[cfg(windows)]
fn beside_exe(name: &str) -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.parent()?.join(name);
    candidate.exists().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_app_scoped() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(config_dir().ends_with(APP_DIR));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unix_layout() {
        assert!(data_dir().ends_with(".local/share/trip"));
        assert!(config_dir().ends_with(".config/trip"));
    }
}
