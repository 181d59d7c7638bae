//! Command-line definition for the `pkgcloud` binary.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const COMMAND_ALL: &str = "all";
pub const COMMAND_PUSH: &str = "push";
pub const COMMAND_DESTROY: &str = "destroy";
pub const COMMAND_DISTRIBUTIONS: &str = "distributions";

pub const PARAMETER_REPO: &str = "repo";
pub const PARAMETER_TARGET: &str = "target";
pub const PARAMETER_FILE: &str = "file";
pub const PARAMETER_FILENAME: &str = "filename";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_TOKEN: &str = "token";
pub const PARAMETER_DRY_RUN: &str = "dry-run";
pub const PARAMETER_FORCE: &str = "force";
pub const PARAMETER_OLDER_THAN: &str = "older-than";
pub const PARAMETER_DESTROY: &str = "destroy";
pub const PARAMETER_PROMOTE_TO: &str = "promote-to";

pub fn create_cli_commands() -> ArgMatches {
    let format_parameter = Arg::new(PARAMETER_FORMAT)
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .default_value("text")
        .help("Output data format")
        .value_parser(OutputFormat::names());

    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(PARAMETER_DRY_RUN)
                .short('d')
                .long(PARAMETER_DRY_RUN)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Do not take actions that change the state of packagecloud.io"),
        )
        .arg(
            Arg::new(PARAMETER_TOKEN)
                .long(PARAMETER_TOKEN)
                .num_args(1)
                .global(true)
                .help("API token, overriding the environment variable and credentials file"),
        )
        .subcommand(
            Command::new(COMMAND_ALL)
                .about("List all the packages in a repo")
                .arg(
                    Arg::new(PARAMETER_REPO)
                        .required(true)
                        .help("Repository as user/repo"),
                )
                .arg(format_parameter.clone())
                .arg(
                    Arg::new(PARAMETER_OLDER_THAN)
                        .long(PARAMETER_OLDER_THAN)
                        .num_args(1)
                        .value_parser(clap::value_parser!(i64))
                        .help("Select only packages older than the given number of days"),
                )
                .arg(
                    Arg::new(PARAMETER_DESTROY)
                        .long(PARAMETER_DESTROY)
                        .action(ArgAction::SetTrue)
                        .help("Destroy the selected packages after listing completes"),
                )
                .arg(
                    Arg::new(PARAMETER_PROMOTE_TO)
                        .long(PARAMETER_PROMOTE_TO)
                        .num_args(1)
                        .help("Promote the selected packages to this user/repo after listing completes"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_PUSH)
                .about("Push packages to a repo")
                .arg(
                    Arg::new(PARAMETER_TARGET)
                        .required(true)
                        .help("Target repository as user/repo/distro/version"),
                )
                .arg(
                    Arg::new(PARAMETER_FILE)
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Package files to push"),
                )
                .arg(
                    Arg::new(PARAMETER_FORCE)
                        .short('f')
                        .long(PARAMETER_FORCE)
                        .action(ArgAction::SetTrue)
                        .help("Force overwrite of a package that already exists"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_DESTROY)
                .about("Destroy packages in a repo")
                .arg(
                    Arg::new(PARAMETER_TARGET)
                        .required(true)
                        .help("Target repository as user/repo/distro/version"),
                )
                .arg(
                    Arg::new(PARAMETER_FILENAME)
                        .required(true)
                        .num_args(1..)
                        .help("Package filenames to destroy"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_DISTRIBUTIONS)
                .about("List all distributions")
                .arg(format_parameter),
        )
        .get_matches()
}
