use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::error::AppError;

pub const DEFAULT_ADMIN_PASSWORD: &str = "password";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub cors_max_age: u64,
    /// Password given to the default admin when it is first seeded.
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("TILL_PORT", "1111")?,
            data_dir: try_load("TILL_DATA_DIR", "data")?,
            cors_max_age: try_load("TILL_CORS_MAX_AGE", "3600")?,
            admin_password: read_secret("TILL_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
        })
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 0,
            data_dir: data_dir.into(),
            cors_max_age: 3600,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("invalid {key}: {e}"))
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("{secret_name} secret not readable ({e}), using default");
        })
        .ok()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_falls_back_to_default() {
        let port: u16 = try_load("TILL_TEST_UNSET_PORT", "4242").unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn unparsable_default_is_a_config_error() {
        let result: Result<u16, _> = try_load("TILL_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn missing_secret_reads_as_none() {
        assert_eq!(read_secret("TILL_TEST_NO_SUCH_SECRET"), None);
    }
}
