mod reader;

pub use self::reader::{dataset_code, read_source_points, SourcePoint};
