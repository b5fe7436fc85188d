//! Runtime settings for the loader, read once from the process environment.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Variable consulted for the credentials path when nothing overrides it.
pub const DEFAULT_PATH_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const PATH_VAR_OVERRIDE: &str = "CREDENTIALS_PATH_VAR";
const REVEAL_SECRETS: &str = "CREDENTIALS_REVEAL_SECRETS";
const DOTENV_DISABLED: &str = "DOTENV_DISABLED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Name of the environment variable that holds the credentials path.
    pub path_var: String,
    /// Print secret-bearing fields verbatim instead of masking them.
    pub reveal_secrets: bool,
    /// Load `.env` (nearest ancestor of the working directory) before
    /// resolving the path variable.
    pub load_dotenv: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            path_var: DEFAULT_PATH_VAR.to_string(),
            reveal_secrets: false,
            load_dotenv: true,
        }
    }
}

impl LoaderSettings {
    pub fn from_env() -> Self {
        let path_var = env::var(PATH_VAR_OVERRIDE)
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PATH_VAR.to_string());

        Self {
            path_var,
            reveal_secrets: env_flag(REVEAL_SECRETS),
            load_dotenv: !env_flag(DOTENV_DISABLED),
        }
    }
}

/// Finds `.env` in the working directory or its nearest ancestor and applies
/// it to the process environment. Variables that are already set keep their
/// values. A missing file is normal. A file with any unparseable line is
/// reported and none of its entries are applied. Returns whether entries were
/// applied.
pub fn load_dotenv(settings: &LoaderSettings) -> bool {
    if !settings.load_dotenv {
        debug!("dotenv loading disabled");
        return false;
    }
    match env::current_dir().ok().and_then(|dir| find_dotenv(&dir)) {
        Some(path) => load_dotenv_from(&path),
        None => {
            debug!("no .env file found");
            false
        }
    }
}

/// Applies the entries of the `.env` file at `path`, all or nothing.
pub fn load_dotenv_from(path: &Path) -> bool {
    let entries = match read_dotenv(path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed .env file");
            return false;
        }
    };

    for (key, value) in entries {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }
    info!(path = %path.display(), "loaded .env");
    true
}

fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error> {
    dotenvy::from_path_iter(path)?.collect()
}

fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|value| parse_flag(&value)).unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
