mod sample;
pub use sample::{app, sample_routes};
