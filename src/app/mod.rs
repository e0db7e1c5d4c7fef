pub mod render;
pub mod session;

pub use render::{render, OutputFormat};
pub use session::{parse_command, run_session, Command};
