pub mod collector;
pub mod probe;
pub mod snapshot;
