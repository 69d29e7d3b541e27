pub mod errors;
pub mod id;

pub use errors::{ConfigError, CoursemateError};
pub use id::new_request_id;

pub type Result<T> = std::result::Result<T, CoursemateError>;
