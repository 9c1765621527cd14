//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://backendacademia-production-6ae4.up.railway.app/api";
const DEFAULT_STORAGE_DIR: &str = ".fitgym-session";

/// Configuration values controlling the API endpoint and the session cache.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FITGYM")]
pub struct ClientSettings {
    /// Base URL of the gym API, including the mount path (e.g. `/api`).
    pub base_url: Option<String>,
    /// Directory holding the persisted session files.
    pub storage_dir: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the hosted deployment.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured session directory, falling back to a dotted
    /// directory under the working directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("gym-console")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FITGYM_BASE_URL", None::<String>),
            ("FITGYM_STORAGE_DIR", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.storage_dir(), PathBuf::from(DEFAULT_STORAGE_DIR));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "FITGYM_BASE_URL",
                Some("http://localhost:3000/api".to_owned()),
            ),
            ("FITGYM_STORAGE_DIR", Some("/tmp/fitgym-cache".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), "http://localhost:3000/api");
        assert_eq!(settings.storage_dir(), PathBuf::from("/tmp/fitgym-cache"));
    }
}
