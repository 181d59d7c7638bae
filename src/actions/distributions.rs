//! The `distributions` command: print the linearized catalog.

use super::CliActionError;
use crate::client::Client;
use crate::format::{Formattable, OutputFormat};

/// Fetches the distributions catalog and prints one entry per distribution
/// version (`distro/version: id` in text form).
pub fn list(client: &Client, format: OutputFormat) -> Result<(), CliActionError> {
    let catalog = client.distributions()?;
    println!("{}", catalog.linearize().format(format)?);
    Ok(())
}
