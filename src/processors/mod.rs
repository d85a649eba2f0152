pub mod bucketizer;
pub mod little_r_processor;
pub mod mission_grouper;
pub mod report_assembler;

pub use bucketizer::{Bucketizer, Segment};
pub use little_r_processor::{ConversionSummary, LittleRProcessor};
pub use mission_grouper::{GroupingStats, MissionGrouper, ObservationsByMission};
pub use report_assembler::{celsius_to_kelvin, hpa_to_pa, ReportAssembler};
