//! Package commands: listing with optional batched pruning, push, destroy.

use super::CliActionError;
use crate::client::Client;
use crate::error::ApiError;
use crate::format::{Formattable, OutputFormat};
use crate::model::Package;
use std::path::PathBuf;
use tracing::info;

/// A `"user/repo/distro/version"` path split into the parts the API wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    /// `"user/repo"`
    pub repo: String,
    /// `"distro/version"`
    pub distro: String,
}

impl RepoTarget {
    pub fn parse(path: &str) -> Result<RepoTarget, CliActionError> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != 4 || parts.iter().any(|part| part.is_empty()) {
            return Err(CliActionError::MalformedRepoPath(path.to_string()));
        }
        Ok(RepoTarget {
            repo: parts[..2].join("/"),
            distro: parts[2..].join("/"),
        })
    }

    /// The full `"user/repo/distro/version"` path.
    pub fn repo_path(&self) -> String {
        format!("{}/{}", self.repo, self.distro)
    }
}

/// A destroy or promote decision taken while listing packages.
#[derive(Debug, Clone)]
pub enum PendingAction {
    Destroy(Package),
    Promote {
        package: Package,
        destination: String,
    },
}

/// Destroy/promote actions collected during a listing and applied only
/// after the full listing completes. The batch is an explicit value handed
/// through the call chain; nothing is accumulated in process-global state.
#[derive(Debug, Default)]
pub struct ActionBatch {
    actions: Vec<PendingAction>,
}

impl ActionBatch {
    pub fn new() -> ActionBatch {
        ActionBatch::default()
    }

    pub fn queue_destroy(&mut self, package: &Package) {
        info!("marked for destruction: {}", package.package_html_url);
        self.actions.push(PendingAction::Destroy(package.clone()));
    }

    pub fn queue_promote(&mut self, package: &Package, destination: &str) {
        info!(
            "marked for promotion to {}: {}",
            destination, package.package_html_url
        );
        self.actions.push(PendingAction::Promote {
            package: package.clone(),
            destination: destination.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Applies every queued action in order. The first failure is terminal;
    /// actions queued after it are not attempted.
    pub fn execute(self, client: &Client) -> Result<(), ApiError> {
        for action in self.actions {
            match action {
                PendingAction::Destroy(package) => {
                    client.destroy_from_package(&package)?;
                    info!("destroyed {}", package.package_html_url);
                }
                PendingAction::Promote {
                    package,
                    destination,
                } => {
                    client.promote(&package, &destination)?;
                    info!("promoted {} to {}", package.package_html_url, destination);
                }
            }
        }
        Ok(())
    }
}

/// Selection and batch flags for the `all` command.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub format: OutputFormat,
    /// Select only packages older than this many days.
    pub older_than: Option<i64>,
    /// Queue destruction of every selected package.
    pub destroy: bool,
    /// Queue promotion of every selected package to this repo.
    pub promote_to: Option<String>,
}

/// Lists every package in `repo`, walking all pages, and prints the
/// selection. Destroy/promote actions requested through `options` are
/// queued during the walk and executed afterwards, unless `dry_run` is set.
pub fn list_all(
    client: &Client,
    repo: &str,
    options: &ListOptions,
    dry_run: bool,
) -> Result<(), CliActionError> {
    let mut selected = Vec::new();
    let mut batch = ActionBatch::new();

    let mut page = client.list_packages(repo)?;
    loop {
        for package in page.packages {
            if let Some(days) = options.older_than {
                if package.days_old() <= days {
                    continue;
                }
            }
            if options.destroy {
                batch.queue_destroy(&package);
            }
            if let Some(destination) = &options.promote_to {
                batch.queue_promote(&package, destination);
            }
            selected.push(package);
        }
        match page.next {
            Some(cursor) => page = client.packages_page(&cursor)?,
            None => break,
        }
    }

    let output = selected.format(options.format)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    if dry_run {
        if !batch.is_empty() {
            info!("dry run, skipping {} queued actions", batch.len());
        }
        return Ok(());
    }
    batch.execute(client)?;
    Ok(())
}

/// Pushes each file to the target repository. An existing package of the
/// same name is a conflict unless `force` is set, in which case the old
/// package is destroyed first. Under `dry_run` the existence checks still
/// run but nothing is destroyed or uploaded.
pub fn push(
    client: &Client,
    target: &RepoTarget,
    files: &[PathBuf],
    force: bool,
    dry_run: bool,
) -> Result<(), CliActionError> {
    for file in files {
        if !file.exists() {
            return Err(CliActionError::MissingPackageFile(file.clone()));
        }
    }

    for file in files {
        let filename = match file.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Err(CliActionError::MissingPackageFile(file.clone())),
        };

        if client.exists(&target.repo, &target.distro, &filename)? {
            if !force {
                return Err(CliActionError::PackageAlreadyExists {
                    filename,
                    repo: target.repo.clone(),
                    distro: target.distro.clone(),
                });
            }
            info!(
                "package {} already exists in {}, deleting before pushing the new version",
                filename,
                target.repo_path()
            );
            if !dry_run {
                client.destroy(&target.repo_path(), &filename)?;
            }
        }

        if dry_run {
            info!(
                "dry run, would push {} to {}",
                file.display(),
                target.repo_path()
            );
            continue;
        }
        client.create_package(&target.repo, Some(&target.distro), file)?;
        info!("pushed {} to {}", file.display(), target.repo_path());
    }
    Ok(())
}

/// Destroys each named package in the target repository, skipping names
/// that do not exist there. Under `dry_run` the existence checks still run
/// but nothing is destroyed.
pub fn destroy(
    client: &Client,
    target: &RepoTarget,
    filenames: &[String],
    dry_run: bool,
) -> Result<(), CliActionError> {
    for filename in filenames {
        if !client.exists(&target.repo, &target.distro, filename)? {
            info!("{} not found in {}, skipping", filename, target.repo_path());
            continue;
        }
        if dry_run {
            info!(
                "dry run, would destroy {} from {}",
                filename,
                target.repo_path()
            );
            continue;
        }
        client.destroy(&target.repo_path(), filename)?;
        info!("destroyed {} from {}", filename, target.repo_path());
    }
    Ok(())
}
