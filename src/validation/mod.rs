pub mod parameter_validator;

pub use parameter_validator::{validate_api_key_name, validate_username};
