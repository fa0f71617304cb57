mod builder;
mod decompose;
mod error;
pub mod mo;
mod path;
mod segment;

pub use decompose::HeavyLight;
pub use error::BuildError;
pub use mo::{MoScheduler, MoStats, PathAggregate};
pub use segment::{Direction, Segment};
