use roster_core::schema::RosterSchema;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
    pub roster: RosterConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`DatabaseConfig::from_env`] and [`RosterConfig::from_env`] for
    /// the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database: DatabaseConfig::from_env(),
            roster: RosterConfig::from_env(),
        }
    }
}

/// Connection settings for the roster database.
///
/// `url` takes precedence over the individual parts when set.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    pub password: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// | Env Var              | Default     |
    /// |----------------------|-------------|
    /// | `DATABASE_URL`       | unset       |
    /// | `DB_HOST`            | `localhost` |
    /// | `DB_PORT`            | `5432`      |
    /// | `DB_USER`            | `postgres`  |
    /// | `DB_NAME`            | `roster`    |
    /// | `DB_PASSWORD`        | empty       |
    /// | `DB_MAX_CONNECTIONS` | `20`        |
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        let port: u16 = std::env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".into())
            .parse()
            .expect("DB_PORT must be a valid u16");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
            .unwrap_or(roster_db::DEFAULT_MAX_CONNECTIONS);

        Self {
            url,
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port,
            user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
            name: std::env::var("DB_NAME").unwrap_or_else(|_| "roster".into()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            max_connections,
        }
    }

    /// Resolve the settings into sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .password(&self.password)
            .ssl_mode(PgSslMode::Disable))
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

/// Deployment-level roster behavior.
#[derive(Debug, Clone, Copy)]
pub struct RosterConfig {
    /// Which participant field set is active (default: `gender`).
    pub schema: RosterSchema,
    /// Whether team gender counters are maintained (default: `true`).
    pub gender_counting: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            schema: RosterSchema::Gender,
            gender_counting: true,
        }
    }
}

impl RosterConfig {
    /// | Env Var           | Default  |
    /// |-------------------|----------|
    /// | `ROSTER_SCHEMA`   | `gender` |
    /// | `GENDER_COUNTING` | `true`   |
    pub fn from_env() -> Self {
        let schema: RosterSchema = std::env::var("ROSTER_SCHEMA")
            .unwrap_or_else(|_| "gender".into())
            .parse()
            .expect("ROSTER_SCHEMA must be 'gender' or 'batch'");

        let gender_counting: bool = std::env::var("GENDER_COUNTING")
            .unwrap_or_else(|_| "true".into())
            .trim()
            .to_ascii_lowercase()
            .parse()
            .expect("GENDER_COUNTING must be 'true' or 'false'");

        Self {
            schema,
            gender_counting,
        }
    }

    /// Counters are only maintained when enabled and the schema records gender.
    pub fn counts_genders(&self) -> bool {
        self.gender_counting && self.schema.supports_gender_counting()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> DatabaseConfig {
        DatabaseConfig {
            url: None,
            host: "db.internal".into(),
            port: 6543,
            user: "roster".into(),
            name: "ledger".into(),
            password: "secret".into(),
            max_connections: 5,
        }
    }

    #[test]
    fn connect_options_from_parts() {
        let options = parts().connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "roster");
        assert_eq!(options.get_database(), Some("ledger"));
    }

    #[test]
    fn url_takes_precedence() {
        let config = DatabaseConfig {
            url: Some("postgres://app@other-host:5433/other".into()),
            ..parts()
        };
        let options = config.connect_options().unwrap();
        assert_eq!(options.get_host(), "other-host");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("other"));
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", parts());
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn batch_schema_disables_counting() {
        let config = RosterConfig {
            schema: RosterSchema::Batch,
            gender_counting: true,
        };
        assert!(!config.counts_genders());
        assert!(RosterConfig::default().counts_genders());
        assert!(!RosterConfig {
            gender_counting: false,
            ..RosterConfig::default()
        }
        .counts_genders());
    }

    #[test]
    fn origins_are_trimmed_and_filtered() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
