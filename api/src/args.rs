use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use glycoload_core::domain::common::{
    AnalysisSettings, DetectorConfig, ForecastConfig, GlycoloadConfig, NutritionConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "glycoload-api", version, about = "Glycemic load and glucose forecast API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub detector: DetectorArgs,

    #[command(flatten)]
    pub forecast: ForecastArgs,

    #[command(flatten)]
    pub nutrition: NutritionArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma separated; `*` allows any origin.
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DetectorArgs {
    #[arg(
        id = "detector_url",
        long = "detector-url",
        env = "DETECTOR_URL",
        default_value = "http://127.0.0.1:9000/detect"
    )]
    pub url: String,

    #[arg(id = "detector_timeout_secs", long = "detector-timeout-secs", env = "DETECTOR_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Map generic object classes (`bowl`, `pizza`, `sandwich`) to food labels
    /// and drop everything else. Off by default, so food labels pass through.
    #[arg(
        long = "detector-class-filter",
        env = "DETECTOR_CLASS_FILTER",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub class_filter: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ForecastArgs {
    #[arg(
        id = "forecast_url",
        long = "forecast-url",
        env = "FORECAST_URL",
        default_value = "http://127.0.0.1:8501/v1/models/glucose_lstm:predict"
    )]
    pub url: String,

    #[arg(id = "forecast_timeout_secs", long = "forecast-timeout-secs", env = "FORECAST_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct NutritionArgs {
    #[arg(long = "nutrition-table-path", env = "NUTRITION_TABLE_PATH")]
    pub table_path: Option<PathBuf>,

    #[arg(long = "label-aliases-path", env = "LABEL_ALIASES_PATH")]
    pub label_aliases_path: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AnalysisArgs {
    #[arg(
        long = "portion-grams",
        env = "PORTION_GRAMS",
        default_value_t = 200.0,
        value_parser = parse_positive_f64
    )]
    pub portion_grams: f64,

    #[arg(
        long = "forecast-steps",
        env = "FORECAST_STEPS",
        default_value_t = 12,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub forecast_steps: u16,
}

fn parse_positive_f64(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {}", raw))
    }
}

impl From<Args> for GlycoloadConfig {
    fn from(args: Args) -> Self {
        Self {
            detector: DetectorConfig {
                endpoint: args.detector.url,
                timeout: Duration::from_secs(args.detector.timeout_secs),
                class_filter: args.detector.class_filter,
            },
            forecast: ForecastConfig {
                endpoint: args.forecast.url,
                timeout: Duration::from_secs(args.forecast.timeout_secs),
            },
            nutrition: NutritionConfig {
                table_path: args.nutrition.table_path,
                label_aliases_path: args.nutrition.label_aliases_path,
            },
            analysis: AnalysisSettings {
                portion_grams: args.analysis.portion_grams,
                forecast_steps: usize::from(args.analysis.forecast_steps),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glycoload-api"]);
        let config = GlycoloadConfig::from(args.clone());

        assert_eq!(args.server.port, 8000);
        assert_eq!(args.server.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.analysis, AnalysisSettings::default());
        assert!(!config.detector.class_filter);
        assert_eq!(config.forecast.timeout, Duration::from_secs(10));
        assert!(config.nutrition.table_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "glycoload-api",
            "--allowed-origins",
            "http://localhost:8501,https://glycoload.app",
            "--portion-grams",
            "150",
            "--forecast-steps",
            "8",
            "--detector-class-filter",
            "true",
        ]);
        let config = GlycoloadConfig::from(args.clone());

        assert_eq!(args.server.allowed_origins.len(), 2);
        assert_eq!(config.analysis.portion_grams, 150.0);
        assert_eq!(config.analysis.forecast_steps, 8);
        assert!(config.detector.class_filter);
    }

    #[test]
    fn test_rejects_invalid_analysis_settings() {
        assert!(Args::try_parse_from(["glycoload-api", "--portion-grams", "-5"]).is_err());
        assert!(Args::try_parse_from(["glycoload-api", "--forecast-steps", "0"]).is_err());
    }
}
