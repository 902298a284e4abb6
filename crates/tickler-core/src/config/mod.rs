use anyhow::Result;
use chrono::FixedOffset;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_HORIZON_DAYS, DEFAULT_LOG_LEVEL, DEFAULT_UTC_OFFSET_MINUTES, MINUTES_PER_DAY,
    SECONDS_PER_MINUTE,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub reminders: ReminderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Fixed offset from UTC that calendar arithmetic runs in.
    pub utc_offset_minutes: i32,
}

impl CalendarConfig {
    /// ## Summary
    /// Returns the configured calendar offset.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the offset is not strictly within one day.
    pub fn offset(&self) -> CoreResult<FixedOffset> {
        if self.utc_offset_minutes.unsigned_abs() >= MINUTES_PER_DAY.unsigned_abs() {
            return Err(CoreError::ConfigError(format!(
                "calendar.utc_offset_minutes must be within ±{MINUTES_PER_DAY}, got {}",
                self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * SECONDS_PER_MINUTE).ok_or_else(|| {
            CoreError::ConfigError(format!(
                "invalid calendar offset: {} minutes",
                self.utc_offset_minutes
            ))
        })
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// Length of the upcoming-occurrences window, in days.
    pub horizon_days: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default(
                "calendar.utc_offset_minutes",
                i64::from(DEFAULT_UTC_OFFSET_MINUTES),
            )?
            .set_default("reminders.horizon_days", i64::from(DEFAULT_HORIZON_DAYS))?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Settings>()?;
        settings.calendar.offset()?;
        Ok(settings)
    }

    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables take precedence over file values and are named
    /// `TICKLER_<SECTION>__<KEY>`, e.g. `TICKLER_CALENDAR__UTC_OFFSET_MINUTES`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the calendar offset fails.
    pub fn load() -> Result<Self> {
        Self::finish(
            Self::builder()?
                // TOML file
                .add_source(config::File::with_name("config.toml").required(false))
                // Env
                .add_source(
                    config::Environment::with_prefix("TICKLER")
                        .prefix_separator("_")
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Builds settings from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML, does not
    /// deserialize, or carries an out-of-range calendar offset.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Self::finish(
            Self::builder()?.add_source(config::File::from_str(document, config::FileFormat::Toml)),
        )
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
