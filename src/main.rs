use tracing_subscriber::EnvFilter;

mod cli;
use cli::execute_command;

/// Main entry point for the program
fn main() {
    // Initialize the logging subsystem
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match execute_command() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ::std::process::exit(e.exit_code());
        }
    }
}
