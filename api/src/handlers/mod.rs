pub mod error;

pub use error::{json_error_handler, not_found, validation_error_response, ApiError};
