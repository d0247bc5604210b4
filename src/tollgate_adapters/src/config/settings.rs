use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tollgate_core::{
    AuthRequest, Pipeline, TokenError, check_expiry, check_version, claim, from_anywhere,
    from_cookie, from_header, numeric_claim, system_now,
};

use super::constants::{CONFIG_FILE, defaults, env};
use crate::jwt::JwtDecoder;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),
    #[error("Token secret must not be empty")]
    EmptySecret,
}

/// Where the pipeline looks for the token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Header,
    Cookie,
    #[default]
    Anywhere,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    #[serde(default)]
    pub source: TokenSource,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_version_claim")]
    pub version_claim: String,
    /// No version check is installed when unset.
    #[serde(default)]
    pub expected_version: Option<Value>,
    #[serde(default = "default_expiry_claim")]
    pub expiry_claim: String,
    #[serde(default = "default_check_expiry")]
    pub check_expiry: bool,
}

fn default_cookie_name() -> String {
    defaults::COOKIE_NAME.to_string()
}

fn default_version_claim() -> String {
    defaults::VERSION_CLAIM.to_string()
}

fn default_expiry_claim() -> String {
    defaults::EXPIRY_CLAIM.to_string()
}

fn default_check_expiry() -> bool {
    true
}

impl TokenSettings {
    /// Load from `config/tollgate.json` (optional) and `TOLLGATE_*`
    /// environment variables, after reading `.env` if present.
    #[tracing::instrument(name = "TokenSettings::load")]
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;

        if settings.secret.expose_secret().is_empty() {
            return Err(SettingsError::EmptySecret);
        }

        tracing::debug!(
            source = ?settings.source,
            cookie_name = %settings.cookie_name,
            check_expiry = settings.check_expiry,
            "Loaded token settings"
        );

        Ok(settings)
    }

    /// Assemble the pipeline these settings describe, using the system clock
    /// for expiry.
    pub fn build_pipeline(&self) -> Pipeline<JwtDecoder> {
        let locator = locator(self.source, &self.cookie_name);
        let mut pipeline = Pipeline::new(locator, JwtDecoder::new(&self.secret));

        if let Some(expected) = &self.expected_version {
            pipeline = pipeline.check(check_version(
                claim(&self.version_claim),
                expected.clone(),
            ));
        }

        if self.check_expiry {
            pipeline = pipeline.check(check_expiry(
                numeric_claim(&self.expiry_claim),
                system_now,
            ));
        }

        pipeline
    }
}

fn locator(
    source: TokenSource,
    cookie_name: &str,
) -> impl Fn(&dyn AuthRequest) -> Result<String, TokenError> + Send + Sync + use<> {
    let by_cookie = from_cookie(cookie_name);
    let anywhere = from_anywhere(cookie_name);

    move |request: &dyn AuthRequest| match source {
        TokenSource::Header => from_header(request),
        TokenSource::Cookie => by_cookie(request),
        TokenSource::Anywhere => anywhere(request),
    }
}
