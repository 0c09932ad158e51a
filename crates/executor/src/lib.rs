pub mod agent_executor;
pub mod command_executor;
pub mod error;
pub mod installer;
pub mod platform;

pub use agent_executor::{parse_directive, AgentExecutor, PackageDirective};
pub use command_executor::{ShellExecutor, DEFAULT_SHELL};
pub use error::ExecutorError;
pub use installer::PackageInstaller;
pub use platform::{OsType, PackageManager};
