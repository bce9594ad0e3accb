//! Runtime configuration, resolved once at startup and handed to the clients.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::{
    sheets::{Credentials, ServiceAccountKey, SheetsClient},
    weather::WeatherClient,
};

const DEFAULT_DB_FILE: &str = "datacollect.sqlite";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to a Google service-account JSON key.
    pub service_account_file: Option<PathBuf>,
    /// Pre-minted bearer token, used instead of the service account when set.
    pub access_token: Option<String>,
    pub weather_api_key: Option<String>,
    pub db_path: PathBuf,
    pub sheets_base_url: String,
    pub weather_base_url: String,
}

impl Config {
    pub fn sheets_credentials(&self) -> Result<Credentials> {
        if let Some(token) = self.access_token.as_deref().map(str::trim) {
            if !token.is_empty() {
                return Ok(Credentials::AccessToken(token.to_string()));
            }
        }

        let path = self.service_account_file.as_ref().ok_or_else(|| {
            anyhow!("No Google credentials: set SERVICE_ACCOUNT_FILE or pass --service-account-file")
        })?;

        Ok(Credentials::ServiceAccount(ServiceAccountKey::from_file(path)?))
    }

    pub fn sheets_client(&self) -> Result<SheetsClient> {
        Ok(SheetsClient::with_base_url(
            self.sheets_credentials()?,
            self.sheets_base_url.clone(),
        ))
    }

    pub fn weather_client(&self) -> Result<WeatherClient> {
        let api_key = self
            .weather_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!("No weather API key: set OPENWEATHER_API_KEY (e.g. in .env) or pass --weather-api-key")
            })?;

        Ok(WeatherClient::with_base_url(
            api_key.to_string(),
            self.weather_base_url.clone(),
        ))
    }
}

/// `~/datacollect.sqlite`, or the working directory if there is no home directory.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{sheets::SHEETS_API_BASE, weather::OPENWEATHER_API_BASE};

    fn config() -> Config {
        Config {
            service_account_file: None,
            access_token: None,
            weather_api_key: None,
            db_path: default_db_path(),
            sheets_base_url: SHEETS_API_BASE.to_string(),
            weather_base_url: OPENWEATHER_API_BASE.to_string(),
        }
    }

    #[test]
    fn should_fail_without_google_credentials() {
        let err = config().sheets_credentials().unwrap_err();

        assert!(err.to_string().contains("SERVICE_ACCOUNT_FILE"));
    }

    #[test]
    fn should_prefer_access_token() {
        let mut config = config();
        config.access_token = Some(" ya29.token ".to_string());
        config.service_account_file = Some(PathBuf::from("/nonexistent/key.json"));

        match config.sheets_credentials().unwrap() {
            Credentials::AccessToken(token) => assert_eq!(token, "ya29.token"),
            other => panic!("expected access token, got {other:?}"),
        }
    }

    #[test]
    fn should_load_service_account_file() {
        let mut config = config();
        config.service_account_file = Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/sheets/testdata/service_account.json"),
        );

        assert!(matches!(
            config.sheets_credentials().unwrap(),
            Credentials::ServiceAccount(_)
        ));
    }

    #[test]
    fn should_fail_on_unreadable_service_account_file() {
        let mut config = config();
        config.service_account_file = Some(PathBuf::from("/nonexistent/key.json"));

        assert!(config.sheets_client().is_err());
    }

    #[test]
    fn should_require_weather_api_key() {
        let mut config = config();
        assert!(config.weather_client().is_err());

        config.weather_api_key = Some("   ".to_string());
        assert!(config.weather_client().is_err());

        config.weather_api_key = Some("abc".to_string());
        assert!(config.weather_client().is_ok());
    }

    #[test]
    fn should_default_db_path_to_sqlite_file() {
        assert!(default_db_path().ends_with(DEFAULT_DB_FILE));
    }
}
