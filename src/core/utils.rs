use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".overspend_core";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "OVERSPEND_CORE_HOME";

/// Resolves on-disk locations under the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// `$OVERSPEND_CORE_HOME`, or `~/.overspend_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_config_dir() {
        let base = PathBuf::from("/tmp/overspend");
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/tmp/overspend/config/config.json")
        );
    }
}
