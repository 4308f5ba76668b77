use std::path::PathBuf;
use std::str::FromStr;

use dwh_sim::Preset;
use serde::Deserialize;
use serde_with::serde_as;
use sqlx::sqlite::SqliteConnectOptions;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub simulation: SimulationSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    /// SQLite file holding the warehouse tables and views.
    pub path: PathBuf,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SimulationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default)]
    pub preset: Preset,
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    pub seed: Option<u64>,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .foreign_keys(true)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let config_directory = base_path.join("config");

    let environment_name = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment_name).map_err(|_| {
        config::ConfigError::Message(format!(
            "Failed to parse APP_ENVIRONMENT '{environment_name}', expected 'local' or 'production'"
        ))
    })?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(
            config::File::from(config_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("BI")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
