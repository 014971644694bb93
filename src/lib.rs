pub mod core;
pub mod logging;
pub mod orchestration;
pub mod parsing;
pub mod security;
pub mod server;
pub mod validation;

pub use crate::core::*;
pub use orchestration::AdminService;
pub use security::{CommandError, ContainerCommandExecutor};
