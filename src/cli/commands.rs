use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::format::{format_value, FieldValue, FormatSpec};
use crate::processors::{Bucketizer, LittleRProcessor, MissionGrouper, ObservationsByMission};
use crate::readers::PageReader;
use crate::settings::ConversionConfig;
use crate::utils::progress::ProgressReporter;
use crate::utils::time::TimeRange;
use crate::writers::FileSink;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn, Level};

pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        verbose,
        log_file,
        config,
    } = cli;

    init_logging(verbose, log_file.as_deref())?;

    match command {
        Commands::Convert {
            input,
            output_dir,
            times,
        } => {
            let config = ConversionConfig::load(config.as_deref())?.with_output_dir(output_dir);
            let range = TimeRange::from_args(&times)?;

            let Some(missions) = read_missions(&input, range, config.max_workers).await? else {
                return Ok(());
            };

            println!("Output directory: {}", config.output_dir.display());
            let progress = ProgressReporter::new(
                observation_count(&missions),
                "Writing per-observation little_r reports...",
                verbose,
            );

            let mut sink = FileSink::new(&config.output_dir);
            let summary = LittleRProcessor::new().process_per_observation(
                &missions,
                &mut sink,
                Some(&progress),
            )?;

            progress.finish_with_message(&format!("Wrote {} reports", summary.reports_written));
            println!("\n{}", summary.summary());
        }

        Commands::Bucket {
            input,
            output_dir,
            bucket_hours,
            times,
        } => {
            let config = ConversionConfig::load(config.as_deref())?
                .with_bucket_hours(bucket_hours)?
                .with_output_dir(output_dir);
            let range = TimeRange::from_args(&times)?;
            let bucketizer =
                Bucketizer::new(config.bucket_hours)?.with_requested_start(range.start);

            let Some(mut missions) = read_missions(&input, range, config.max_workers).await?
            else {
                return Ok(());
            };

            println!(
                "Output directory: {}, bucket width: {}h",
                config.output_dir.display(),
                config.bucket_hours
            );
            let progress = ProgressReporter::new(
                observation_count(&missions),
                "Writing bucketed little_r reports...",
                verbose,
            );

            let mut sink = FileSink::new(&config.output_dir);
            let summary = LittleRProcessor::new().process_bucketed(
                &mut missions,
                &bucketizer,
                &mut sink,
                Some(&progress),
            )?;

            progress.finish_with_message(&format!("Wrote {} reports", summary.reports_written));
            println!("\n{}", summary.summary());
        }

        Commands::Format { spec, value } => {
            let spec = FormatSpec::parse(&spec)?;
            let value = value.map_or(FieldValue::Absent, FieldValue::Text);
            println!("[{}]", format_value(&value, &spec)?);
        }
    }

    Ok(())
}

/// Read pages and group them by mission; `None` when nothing usable was found
async fn read_missions(
    input: &Path,
    range: TimeRange,
    max_workers: usize,
) -> Result<Option<ObservationsByMission>> {
    println!("Reading observation pages from {}", input.display());

    let reader = PageReader::new(max_workers).with_time_range(range);
    let observations = reader.read_observations(input).await?;

    let mut grouper = MissionGrouper::new();
    grouper.extend(observations);

    let stats = grouper.stats();
    info!(
        "Accepted {} observation(s), skipped {} without a mission name",
        stats.accepted, stats.skipped_without_mission
    );

    if grouper.is_empty() {
        warn!("No observations found between {} and {}", range.start, range.end);
        println!("No observations found");
        return Ok(None);
    }

    Ok(Some(grouper.into_missions()))
}

fn observation_count(missions: &ObservationsByMission) -> u64 {
    missions.values().map(Vec::len).sum::<usize>() as u64
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}
