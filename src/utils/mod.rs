pub mod constants;
pub mod filename;
pub mod progress;
pub mod time;

pub use constants::*;
pub use filename::{bucket_filename, check_path_component, observation_filename};
pub use progress::ProgressReporter;
pub use time::{parse_time, TimeRange};
