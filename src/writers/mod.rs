pub mod little_r_writer;

pub use little_r_writer::{FileSink, MemorySink, ReportSink};
