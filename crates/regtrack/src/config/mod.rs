use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_UTC_OFFSET: &str = "+05:30";
const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let output_dir = env::var("REGTRACK_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("exports"));
        let raw_offset =
            env::var("REGTRACK_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = parse_utc_offset(&raw_offset)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            export: ExportConfig {
                output_dir,
                utc_offset,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where report files land and which zone their dates are rendered in.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub utc_offset: FixedOffset,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            utc_offset: india_standard_time(),
        }
    }
}

/// The en-IN display zone, UTC+05:30.
pub fn india_standard_time() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// Parses `±HH:MM` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidUtcOffset {
        value: raw.to_string(),
    };

    raw.trim().parse::<FixedOffset>().map_err(|_| invalid())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidUtcOffset { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUtcOffset { value } => write!(
                f,
                "REGTRACK_UTC_OFFSET must look like +05:30, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
