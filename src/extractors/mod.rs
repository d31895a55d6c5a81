pub mod flash;
pub mod form;
pub use flash::IncomingFlash;
pub use form::PageForm;
