pub mod command_executor;
pub mod secret_masking;

pub use command_executor::{CommandError, ContainerCommandExecutor};
pub use secret_masking::{mask, mask_secret};
