pub mod little_r;
pub mod observation;

pub use little_r::LittleRRecord;
pub use observation::{Observation, ObservationPage};
