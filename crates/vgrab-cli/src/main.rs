use vgrab_core::input::InputError;
use vgrab_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unwritable instead of refusing to run.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {err:#}");
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("vgrab error: {:#}", err);
        // Input errors get a distinguishable status so scripts can tell
        // "operator gave us nothing usable" from runtime failures.
        let code = if err.downcast_ref::<InputError>().is_some() {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}
