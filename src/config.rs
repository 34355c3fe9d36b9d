use std::collections::HashMap;
use thiserror::Error;

/// JWS algorithm names accepted in `ALGORITHMS`.
const KNOWN_ALGORITHMS: &[&str] = &[
    "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "ES256", "ES384", "PS256", "PS384",
    "PS512", "EdDSA",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub database_url: String,
    pub database_test_url: Option<String>,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// Identity-provider settings. Loaded and validated only; nothing in this
/// crate verifies tokens against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Bare domain, without scheme or trailing slash.
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<String>,
    pub client_id: Option<String>,
}

impl AuthSettings {
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    /// Load from the process environment, merging a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let environment = match env_map
            .get("APP_ENV")
            .map(|s| s.as_str())
            .unwrap_or("development")
        {
            "development" => Environment::Development,
            "test" => Environment::Test,
            "production" => Environment::Production,
            other => {
                return Err(ConfigError::InvalidValue(
                    "APP_ENV".to_string(),
                    format!("must be development, test, or production, got {}", other),
                ))
            }
        };

        let database_url = required(&env_map, "DATABASE_URL")?;
        validate_database_url("DATABASE_URL", &database_url)?;

        let database_test_url = env_map
            .get("DATABASE_TEST_URL")
            .filter(|s| !s.trim().is_empty())
            .cloned();
        match &database_test_url {
            Some(url) => validate_database_url("DATABASE_TEST_URL", url)?,
            None if environment == Environment::Test => {
                return Err(ConfigError::MissingEnv("DATABASE_TEST_URL".to_string()))
            }
            None => {}
        }

        let auth = parse_auth_settings(&env_map)?;

        Ok(Config {
            port,
            environment,
            database_url,
            database_test_url,
            auth,
        })
    }

    /// Connection string for the configured environment.
    pub fn active_database_url(&self) -> &str {
        match (self.environment, &self.database_test_url) {
            (Environment::Test, Some(url)) => url,
            _ => &self.database_url,
        }
    }
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

/// The store is SQLite: accept `sqlite:` URLs and bare filesystem paths.
fn validate_database_url(key: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("sqlite:") {
        return Ok(());
    }
    match url.split_once("://") {
        Some((scheme, _)) => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("unsupported database scheme {}, expected sqlite", scheme),
        )),
        None => Ok(()),
    }
}

fn parse_auth_settings(env_map: &HashMap<String, String>) -> Result<AuthSettings, ConfigError> {
    let domain = normalize_domain(&required(env_map, "AUTH0_DOMAIN")?);
    if domain.is_empty() || domain.contains('/') {
        return Err(ConfigError::InvalidValue(
            "AUTH0_DOMAIN".to_string(),
            "must be a bare host name".to_string(),
        ));
    }

    let audience = required(env_map, "API_AUDIENCE")?;

    let algorithms = match env_map.get("ALGORITHMS") {
        Some(raw) => parse_algorithms(raw)?,
        None => vec!["RS256".to_string()],
    };

    let client_id = env_map
        .get("CLIENT_ID")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(AuthSettings {
        domain,
        audience,
        algorithms,
        client_id,
    })
}

fn normalize_domain(raw: &str) -> String {
    let without_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    without_scheme.trim_end_matches('/').to_string()
}

/// Accepts `RS256`, `RS256,HS256` and the list-literal form `['RS256']`.
fn parse_algorithms(raw: &str) -> Result<Vec<String>, ConfigError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');

    let algorithms: Vec<String> = inner
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if algorithms.is_empty() {
        return Err(ConfigError::InvalidValue(
            "ALGORITHMS".to_string(),
            "must name at least one algorithm".to_string(),
        ));
    }

    if let Some(unknown) = algorithms
        .iter()
        .find(|alg| !KNOWN_ALGORITHMS.contains(&alg.as_str()))
    {
        return Err(ConfigError::InvalidValue(
            "ALGORITHMS".to_string(),
            format!("unknown algorithm {}", unknown),
        ));
    }

    Ok(algorithms)
}
