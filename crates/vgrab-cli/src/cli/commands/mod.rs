//! CLI command handlers, one file per subcommand.

mod download;
mod grab;

pub use download::run_download;
pub use grab::{run_grab, GrabArgs};
