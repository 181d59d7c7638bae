use clap::ArgMatches;
use pkgcloud::actions::packages::{ListOptions, RepoTarget};
use pkgcloud::actions::{self, CliActionError};
use pkgcloud::client::Client;
use pkgcloud::commands::{
    create_cli_commands, COMMAND_ALL, COMMAND_DESTROY, COMMAND_DISTRIBUTIONS, COMMAND_PUSH,
    PARAMETER_DESTROY, PARAMETER_DRY_RUN, PARAMETER_FILE, PARAMETER_FILENAME, PARAMETER_FORMAT,
    PARAMETER_FORCE, PARAMETER_OLDER_THAN, PARAMETER_PROMOTE_TO, PARAMETER_REPO, PARAMETER_TARGET,
    PARAMETER_TOKEN,
};
use pkgcloud::credentials::{CredentialError, Credentials};
use pkgcloud::format::OutputFormat;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    #[error("undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    #[error("{0}")]
    CredentialError(#[from] CredentialError),
    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    /// Get the appropriate process exit code for this error
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => exitcode::USAGE,
            CliError::CredentialError(_) => exitcode::CONFIG,
            CliError::ActionError(_) => exitcode::DATAERR,
        }
    }
}

fn output_format(sub_matches: &ArgMatches) -> OutputFormat {
    // unwraps here are safe: the argument has a default value and clap
    // rejects anything outside OutputFormat::names()
    let format = sub_matches.get_one::<String>(PARAMETER_FORMAT).unwrap();
    OutputFormat::from_str(format).unwrap()
}

pub fn execute_command() -> Result<(), CliError> {
    let commands = create_cli_commands();
    let dry_run = commands.get_flag(PARAMETER_DRY_RUN);
    let token = commands.get_one::<String>(PARAMETER_TOKEN);
    let credentials = Credentials::resolve(token.map(String::as_str))?;
    let client = Client::new(credentials).map_err(CliActionError::from)?;

    match commands.subcommand() {
        Some((COMMAND_ALL, sub_matches)) => {
            let repo = sub_matches.get_one::<String>(PARAMETER_REPO).unwrap(); // mandatory, enforced by clap
            let options = ListOptions {
                format: output_format(sub_matches),
                older_than: sub_matches.get_one::<i64>(PARAMETER_OLDER_THAN).copied(),
                destroy: sub_matches.get_flag(PARAMETER_DESTROY),
                promote_to: sub_matches.get_one::<String>(PARAMETER_PROMOTE_TO).cloned(),
            };
            actions::packages::list_all(&client, repo, &options, dry_run)?;
            Ok(())
        }
        Some((COMMAND_PUSH, sub_matches)) => {
            let target = sub_matches.get_one::<String>(PARAMETER_TARGET).unwrap();
            let target = RepoTarget::parse(target)?;
            let files: Vec<PathBuf> = sub_matches
                .get_many::<PathBuf>(PARAMETER_FILE)
                .unwrap()
                .cloned()
                .collect();
            let force = sub_matches.get_flag(PARAMETER_FORCE);
            actions::packages::push(&client, &target, &files, force, dry_run)?;
            Ok(())
        }
        Some((COMMAND_DESTROY, sub_matches)) => {
            let target = sub_matches.get_one::<String>(PARAMETER_TARGET).unwrap();
            let target = RepoTarget::parse(target)?;
            let filenames: Vec<String> = sub_matches
                .get_many::<String>(PARAMETER_FILENAME)
                .unwrap()
                .cloned()
                .collect();
            actions::packages::destroy(&client, &target, &filenames, dry_run)?;
            Ok(())
        }
        Some((COMMAND_DISTRIBUTIONS, sub_matches)) => {
            actions::distributions::list(&client, output_format(sub_matches))?;
            Ok(())
        }
        Some((other, _)) => Err(CliError::UnsupportedSubcommand(other.to_string())),
        None => Err(CliError::UnsupportedSubcommand("unknown".to_string())),
    }
}
