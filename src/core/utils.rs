use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".discount_core";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const REPORTS_DIR: &str = "reports";
const LEDGER_FILE: &str = "historico_antecipacoes.csv";

/// Environment variable that relocates every file the tool writes.
pub const HOME_ENV: &str = "DISCOUNT_CORE_HOME";

/// Resolves on-disk locations relative to a base directory.
pub struct PathResolver;

impl PathResolver {
    /// `$DISCOUNT_CORE_HOME`, falling back to `~/.discount_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn ledger_file_in(base: &Path) -> PathBuf {
        base.join(LEDGER_FILE)
    }

    pub fn reports_dir_in(base: &Path) -> PathBuf {
        base.join(REPORTS_DIR)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
