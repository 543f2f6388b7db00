use std::env;
use std::str::FromStr;

use config::{Config, ConfigError, File};
use dotenv::dotenv;
use sqlx::sqlite::SqliteConnectOptions;

use crate::league::aggregation::ZeroedStandingPolicy;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub aggregation: AggregationSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings {
    pub path: String,
    #[serde(default)]
    pub create_if_missing: bool,
    #[serde(default)]
    pub db_url: Option<String>,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        match &self.db_url {
            Some(db_url) => SqliteConnectOptions::from_str(db_url),
            None => Ok(SqliteConnectOptions::new()
                .filename(&self.path)
                .create_if_missing(self.create_if_missing)),
        }
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub seed_on_startup: bool,
}

/// Behavior knobs for the statistics aggregation engine.
#[derive(serde::Deserialize, Debug, Clone, Copy)]
pub struct AggregationSettings {
    /// When true, a standings row that reverts to the all-zero state after
    /// a retraction is deleted instead of kept at zero.
    pub drop_zeroed_teams: bool,
}

impl AggregationSettings {
    pub fn zeroed_policy(&self) -> ZeroedStandingPolicy {
        if self.drop_zeroed_teams {
            ZeroedStandingPolicy::Drop
        } else {
            ZeroedStandingPolicy::Keep
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // Deployment platforms expose the database location as a single URL.
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(db_url);
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
