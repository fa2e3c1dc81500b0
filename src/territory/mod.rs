mod boundary;
mod classifier;

pub use self::boundary::BoundaryLayer;
pub use self::classifier::{Territory, TerritoryClassifier};
