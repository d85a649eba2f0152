use crate::error::{ProcessingError, Result};
use crate::processors::{Bucketizer, ObservationsByMission, ReportAssembler};
use crate::utils::filename::{bucket_filename, check_path_component, observation_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportSink;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of one conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    pub missions: usize,
    pub observations: usize,
    pub reports_written: usize,
    pub skipped_without_id: usize,
    pub skipped_unsafe_name: usize,
    pub files: Vec<PathBuf>,
}

impl ConversionSummary {
    pub fn is_empty(&self) -> bool {
        self.reports_written == 0
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Missions: {}\nObservations: {}\nReports written: {}",
            self.missions, self.observations, self.reports_written
        );
        if self.skipped_without_id > 0 {
            summary.push_str(&format!(
                "\nSkipped (no id): {}",
                self.skipped_without_id
            ));
        }
        if self.skipped_unsafe_name > 0 {
            summary.push_str(&format!(
                "\nSkipped (unsafe name): {}",
                self.skipped_unsafe_name
            ));
        }
        summary
    }
}

/// Drives grouped observations through the report assembler into a sink
pub struct LittleRProcessor {
    assembler: ReportAssembler,
}

impl LittleRProcessor {
    pub fn new() -> Self {
        Self {
            assembler: ReportAssembler::new(),
        }
    }

    /// One report per observation, written to `{mission}/{id}.little_r`
    pub fn process_per_observation(
        &self,
        missions: &ObservationsByMission,
        sink: &mut dyn ReportSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionSummary> {
        let mut summary = ConversionSummary {
            missions: missions.len(),
            ..ConversionSummary::default()
        };

        for (mission, observations) in missions {
            debug!("Mission {}: {} observation(s)", mission, observations.len());

            for observation in observations {
                summary.observations += 1;

                let Some(id) = observation.id.as_deref().filter(|id| !id.is_empty()) else {
                    warn!(
                        "Skipping observation at {} in mission {} without an id",
                        observation.timestamp, mission
                    );
                    summary.skipped_without_id += 1;
                    continue;
                };

                let path = match observation_filename(mission, id) {
                    Ok(path) => path,
                    Err(ProcessingError::UnsafePathComponent(name)) => {
                        warn!(
                            "Skipping observation {} in mission {}: '{}' is not a safe filename",
                            id, mission, name
                        );
                        summary.skipped_unsafe_name += 1;
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                self.assembler.write(observation, &path, sink)?;
                summary.reports_written += 1;
                summary.files.push(path);

                if let Some(p) = progress {
                    p.increment(1);
                }
            }
        }

        info!("Wrote {} per-observation report(s)", summary.reports_written);
        Ok(summary)
    }

    /// One report per time window and mission
    pub fn process_bucketed(
        &self,
        missions: &mut ObservationsByMission,
        bucketizer: &Bucketizer,
        sink: &mut dyn ReportSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionSummary> {
        let mut summary = ConversionSummary {
            missions: missions.len(),
            ..ConversionSummary::default()
        };

        for (mission, observations) in missions.iter_mut() {
            summary.observations += observations.len();
            if check_path_component(mission).is_err() {
                warn!(
                    "Skipping {} observation(s): mission '{}' is not a safe filename",
                    observations.len(),
                    mission
                );
                summary.skipped_unsafe_name += observations.len();
                continue;
            }

            let segments = bucketizer.segment(observations);
            debug!("Mission {}: {} window(s)", mission, segments.len());

            for segment in &segments {
                let path = bucket_filename(
                    mission,
                    segment.midpoint_time()?,
                    bucketizer.bucket_hours(),
                )?;
                self.assembler.write_segment(segment, &path, sink)?;
                summary.reports_written += 1;
                summary.files.push(path);

                if let Some(p) = progress {
                    p.increment(segment.len() as u64);
                }
            }
        }

        info!("Wrote {} bucketed report(s)", summary.reports_written);
        Ok(summary)
    }
}

impl Default for LittleRProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use crate::processors::MissionGrouper;
    use crate::writers::{FileSink, MemorySink};
    use std::collections::HashSet;
    use std::path::Path;
    use tempfile::TempDir;

    fn missions() -> ObservationsByMission {
        let mut grouper = MissionGrouper::new();
        grouper.extend(vec![
            Observation::new(1700000000).with_mission("W-1").with_id("a"),
            Observation::new(1700003600).with_mission("W-1").with_id("b"),
            Observation::new(1700030000).with_mission("W-1"),
            Observation::new(1700000100).with_mission("W-2").with_id("c"),
        ]);
        grouper.into_missions()
    }

    #[test]
    fn test_per_observation_paths() {
        let mut sink = MemorySink::new();
        let summary = LittleRProcessor::new()
            .process_per_observation(&missions(), &mut sink, None)
            .unwrap();

        assert_eq!(summary.missions, 2);
        assert_eq!(summary.observations, 4);
        assert_eq!(summary.reports_written, 3);
        assert_eq!(summary.skipped_without_id, 1);
        assert!(sink.get(&Path::new("W-1").join("a.little_r")).is_some());
        assert!(sink.get(&Path::new("W-2").join("c.little_r")).is_some());
    }

    #[test]
    fn test_bucketed_paths() {
        let mut sink = MemorySink::new();
        let mut missions = missions();
        let bucketizer = Bucketizer::new(6.0).unwrap();
        let summary = LittleRProcessor::new()
            .process_bucketed(&mut missions, &bucketizer, &mut sink, None)
            .unwrap();

        // W-1: 22:13 and 23:13 share the 18-24 window; 06:33 the next day is
        // reported under the window after it. W-2 has a single window.
        let paths: Vec<String> = sink
            .paths()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            paths,
            vec![
                "W-1_2023-11-14_21:00_6h.little_r",
                "W-1_2023-11-15_03:00_6h.little_r",
                "W-2_2023-11-14_21:00_6h.little_r",
            ]
        );
        assert_eq!(summary.reports_written, 3);
        assert_eq!(summary.observations, 4);
    }

    #[test]
    fn test_hourly_windows_get_distinct_files() {
        let mut grouper = MissionGrouper::new();
        grouper.extend(
            [100, 2000, 3700, 7300, 7400]
                .iter()
                .map(|&ts| Observation::new(ts).with_mission("W-1")),
        );
        let mut missions = grouper.into_missions();

        let mut sink = MemorySink::new();
        let bucketizer = Bucketizer::new(1.0).unwrap();
        let summary = LittleRProcessor::new()
            .process_bucketed(&mut missions, &bucketizer, &mut sink, None)
            .unwrap();

        assert_eq!(summary.reports_written, 3);
        assert_eq!(sink.len(), summary.reports_written);
        let unique: HashSet<&PathBuf> = summary.files.iter().collect();
        assert_eq!(unique.len(), summary.files.len());
    }

    #[test]
    fn test_unsafe_ids_are_skipped() {
        let mut grouper = MissionGrouper::new();
        grouper.extend(vec![
            Observation::new(1700000000).with_mission("W-1").with_id("../../escaped"),
            Observation::new(1700000100).with_mission("W-1").with_id("/abs"),
            Observation::new(1700000200).with_mission("W-1").with_id("ok"),
            Observation::new(1700000300).with_mission("..").with_id("x"),
        ]);
        let missions = grouper.into_missions();

        let root = TempDir::new().unwrap();
        let output_dir = root.path().join("out");
        let mut sink = FileSink::new(&output_dir);
        let summary = LittleRProcessor::new()
            .process_per_observation(&missions, &mut sink, None)
            .unwrap();

        assert_eq!(summary.reports_written, 1);
        assert_eq!(summary.skipped_unsafe_name, 3);
        assert!(summary.summary().contains("Skipped (unsafe name): 3"));
        assert!(output_dir.join("W-1").join("ok.little_r").is_file());
        assert!(!root.path().join("escaped.little_r").exists());
        assert!(!output_dir.join("x.little_r").exists());
        for file in sink.written_files() {
            assert!(file.starts_with(&output_dir));
        }
    }

    #[test]
    fn test_unsafe_mission_is_skipped_when_bucketing() {
        let mut grouper = MissionGrouper::new();
        grouper.extend(vec![
            Observation::new(1700000000).with_mission("../W-1"),
            Observation::new(1700000100).with_mission("../W-1"),
            Observation::new(1700000200).with_mission("W-2"),
        ]);
        let mut missions = grouper.into_missions();

        let mut sink = MemorySink::new();
        let bucketizer = Bucketizer::new(6.0).unwrap();
        let summary = LittleRProcessor::new()
            .process_bucketed(&mut missions, &bucketizer, &mut sink, None)
            .unwrap();

        assert_eq!(summary.reports_written, 1);
        assert_eq!(summary.skipped_unsafe_name, 2);
        assert_eq!(summary.observations, 3);
        let paths: Vec<String> = sink
            .paths()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, vec!["W-2_2023-11-14_21:00_6h.little_r"]);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let mut sink = MemorySink::new();
        let summary = LittleRProcessor::new()
            .process_per_observation(&ObservationsByMission::new(), &mut sink, None)
            .unwrap();
        assert!(summary.is_empty());
        assert!(sink.is_empty());
    }
}
