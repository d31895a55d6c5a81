//! SampleService: validation and orchestration over the repository.

mod sample;
mod validation;
pub use sample::SampleService;
pub use validation::validate_name;
