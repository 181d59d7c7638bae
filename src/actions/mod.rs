use std::path::PathBuf;
use thiserror::Error;

pub mod distributions;
pub mod packages;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    ApiError(#[from] crate::error::ApiError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("{0} does not exist")]
    MissingPackageFile(PathBuf),

    #[error("{0:?} is not of form user/repo/distro/version")]
    MalformedRepoPath(String),

    #[error("package {filename} already exists in repo {repo}/{distro}, use -f to force overwrite")]
    PackageAlreadyExists {
        filename: String,
        repo: String,
        distro: String,
    },
}
