use crate::error::{ProcessingError, Result};
use crate::utils::constants::LITTLE_R_EXTENSION;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::path::PathBuf;

/// Mission names and ids end up inside output paths, so they must stay a
/// single plain component below the output directory
pub fn check_path_component(name: &str) -> Result<&str> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(&['/', '\\', '\0'][..]);

    if unsafe_name {
        return Err(ProcessingError::UnsafePathComponent(name.to_string()));
    }
    Ok(name)
}

/// Filename for a time window: {mission}_{YYYY}-{MM}-{DD}_{HH}:00_{hours}h.little_r
pub fn bucket_filename(
    mission: &str,
    midpoint: DateTime<Utc>,
    bucket_hours: f64,
) -> Result<PathBuf> {
    let filename = format!(
        "{}_{:04}-{:02}-{:02}_{:02}:00_{}h.{}",
        check_path_component(mission)?,
        midpoint.year(),
        midpoint.month(),
        midpoint.day(),
        midpoint.hour(),
        bucket_hours,
        LITTLE_R_EXTENSION
    );
    Ok(PathBuf::from(filename))
}

/// Filename for a single observation: {mission}/{id}.little_r
pub fn observation_filename(mission: &str, id: &str) -> Result<PathBuf> {
    let mission = check_path_component(mission)?;
    let id = check_path_component(id)?;
    Ok(PathBuf::from(mission).join(format!("{}.{}", id, LITTLE_R_EXTENSION)))
}
