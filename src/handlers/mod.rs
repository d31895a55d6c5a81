//! HTTP handlers for the sample pages.

pub mod sample;
pub use sample::*;
