use crate::error::Result;
use crate::utils::constants::{DEFAULT_BUCKET_HOURS, DEFAULT_OUTPUT_DIR};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Environment variables override the config file, e.g. LITTLE_R_BUCKET_HOURS=3
pub const ENV_PREFIX: &str = "LITTLE_R";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConversionConfig {
    /// Window width for bucketed output, in hours
    #[serde(default = "default_bucket_hours")]
    #[validate(range(min = 1.0, max = 8784.0))]
    pub bucket_hours: f64,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_max_workers")]
    #[validate(range(min = 1))]
    pub max_workers: usize,
}

fn default_bucket_hours() -> f64 {
    DEFAULT_BUCKET_HOURS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_max_workers() -> usize {
    num_cpus::get()
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            bucket_hours: default_bucket_hours(),
            output_dir: default_output_dir(),
            max_workers: default_max_workers(),
        }
    }
}

impl ConversionConfig {
    /// Layer an optional TOML file under `LITTLE_R_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: ConversionConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_bucket_hours(mut self, bucket_hours: Option<f64>) -> Result<Self> {
        if let Some(hours) = bucket_hours {
            self.bucket_hours = hours;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConversionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket_hours, 6.0);
        assert_eq!(config.output_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "bucket_hours = 3.0")?;
        writeln!(file, "output_dir = \"out/little_r\"")?;

        let config = ConversionConfig::load(Some(file.path()))?;
        assert_eq!(config.bucket_hours, 3.0);
        assert_eq!(config.output_dir, PathBuf::from("out/little_r"));
        assert!(config.max_workers >= 1);
        Ok(())
    }

    #[test]
    fn test_invalid_bucket_hours_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "bucket_hours = 0.0")?;

        let result = ConversionConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_cli_overrides() -> Result<()> {
        let config = ConversionConfig::default()
            .with_bucket_hours(Some(12.0))?
            .with_output_dir(Some(PathBuf::from("elsewhere")));
        assert_eq!(config.bucket_hours, 12.0);
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));

        assert!(ConversionConfig::default().with_bucket_hours(Some(-1.0)).is_err());
        assert!(matches!(
            ConversionConfig::default().with_bucket_hours(Some(0.5)),
            Err(ProcessingError::Validation(_))
        ));
        Ok(())
    }
}
