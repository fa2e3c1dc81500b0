mod resolver;
mod throttle;

pub use self::resolver::{DatasetMetadata, DatasetResolver};
pub use self::throttle::{FixedDelay, NoDelay, Throttle};
