pub mod page_reader;

pub use page_reader::PageReader;
