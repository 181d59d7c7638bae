//! The packagecloud API client.
//!
//! A [`Client`] is built once per invocation from resolved credentials and
//! is immutable afterwards. Every operation issues a single blocking,
//! basic-authenticated HTTP request; there are no retries and no state is
//! shared between operations. See <https://packagecloud.io/docs/api>.

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::model::{Distributions, Package};
use crate::pagination::{self, PackagePage, PageCursor};
use crate::response;
use reqwest::blocking::{multipart, Client as HttpClient, RequestBuilder, Response};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Identifies this client to the packagecloud API.
pub const USER_AGENT: &str = "pkgcloud Rust client";

/// A packagecloud client: base URL, API token, and the underlying HTTP
/// connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl Client {
    pub fn new(credentials: Credentials) -> Result<Client, ApiError> {
        let http = HttpClient::builder().build()?;
        Ok(Client {
            http,
            base_url: credentials.url,
            token: credentials.token,
        })
    }

    /// URL of an API endpoint under `api/v1`.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// URL of a path relative to the site base, used for the action URLs
    /// embedded in [`Package`] and for existence checks.
    fn site_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .basic_auth(&self.token, Some(""))
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        Ok(request.send()?)
    }

    /// Fetches the first page of packages in `repo` (`"user/repo"`).
    /// Subsequent pages are reached through the page's cursor and
    /// [`Client::packages_page`].
    pub fn list_packages(&self, repo: &str) -> Result<PackagePage, ApiError> {
        let endpoint = self.api_url(&format!("repos/{}/packages.json", repo));
        self.fetch_page(&endpoint)
    }

    /// Fetches the page a previous listing pointed at through its cursor.
    pub fn packages_page(&self, cursor: &PageCursor) -> Result<PackagePage, ApiError> {
        self.fetch_page(cursor.as_str())
    }

    fn fetch_page(&self, endpoint: &str) -> Result<PackagePage, ApiError> {
        debug!("fetching package page from {}", endpoint);
        let response = self.send(self.http.get(endpoint))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text()?;

        let packages: Vec<Package> = response::interpret(status, &body)?;
        let paginated = pagination::extract_pagination_headers(&headers)?;
        let next = pagination::next_cursor(&headers);
        trace!(
            "page holds {} of {} packages, next page: {}",
            packages.len(),
            paginated.total,
            next.is_some()
        );

        Ok(PackagePage {
            packages,
            paginated,
            next,
        })
    }

    /// Retrieves the full catalog of supported distributions.
    pub fn distributions(&self) -> Result<Distributions, ApiError> {
        let endpoint = self.api_url("distributions.json");
        debug!("fetching distributions from {}", endpoint);
        let response = self.send(self.http.get(&endpoint))?;
        response::decode(response)
    }

    /// Maps `"distro/version"` index pairs, like `"ubuntu/xenial"`, to the
    /// numeric distro version ids uploads must reference.
    pub fn supported_distros(&self) -> Result<HashMap<String, u32>, ApiError> {
        Ok(self.distributions()?.version_ids())
    }

    /// Checks whether `filename` exists in `repo` (`"user/repo"`) for the
    /// given `distro` (`"distro/version"`). Any HTTP status other than 200
    /// means the package does not exist; only transport failures are errors.
    pub fn exists(&self, repo: &str, distro: &str, filename: &str) -> Result<bool, ApiError> {
        let endpoint = self.site_url(&format!("{}/packages/{}/{}", repo, distro, filename));
        debug!("checking existence of {}", endpoint);
        let response = self.send(self.http.head(&endpoint))?;
        Ok(response::exists(response.status().as_u16()))
    }

    /// Pushes a package file to `repo` (`"user/repo"`). When `distro` is
    /// given as a `"distro/version"` index pair it is resolved against the
    /// distributions catalog before anything is uploaded; an unknown pair
    /// fails with [`ApiError::InvalidDistro`] without touching the file.
    pub fn create_package(
        &self,
        repo: &str,
        distro: Option<&str>,
        package_file: &Path,
    ) -> Result<(), ApiError> {
        let mut form = multipart::Form::new();
        if let Some(distro) = distro {
            let id = distro_version_id(&self.distributions()?, distro)?;
            form = form.text("package[distro_version_id]", id.to_string());
        }
        let form = form.file("package[package_file]", package_file)?;

        let endpoint = self.api_url(&format!("repos/{}/packages.json", repo));
        debug!("uploading {} to {}", package_file.display(), endpoint);
        let response = self.send(self.http.post(&endpoint).multipart(form))?;
        response::check(response)
    }

    /// Removes `filename` from a repository, where `repo_path` is the full
    /// `"user/repo/distro/version"` path.
    pub fn destroy(&self, repo_path: &str, filename: &str) -> Result<(), ApiError> {
        let endpoint = self.api_url(&format!("repos/{}/{}", repo_path, filename));
        debug!("destroying package at {}", endpoint);
        let response = self.send(self.http.delete(&endpoint))?;
        response::check(response)
    }

    /// Removes a package through the destroy URL the server issued for it.
    pub fn destroy_from_package(&self, package: &Package) -> Result<(), ApiError> {
        let endpoint = self.site_url(&package.destroy_url);
        debug!("destroying package at {}", endpoint);
        let response = self.send(self.http.delete(&endpoint))?;
        response::check(response)
    }

    /// Promotes a package to the `destination` repository (`"user/repo"`)
    /// through the promote URL the server issued for it.
    pub fn promote(&self, package: &Package, destination: &str) -> Result<(), ApiError> {
        let endpoint = self.site_url(&package.promote_url);
        debug!("promoting package at {} to {}", endpoint, destination);
        let form = [("destination", destination)];
        let response = self.send(self.http.post(&endpoint).form(&form))?;
        response::check(response)
    }
}

/// Resolves a `"distro/version"` index pair against the catalog.
fn distro_version_id(catalog: &Distributions, distro: &str) -> Result<u32, ApiError> {
    catalog
        .version_ids()
        .get(distro)
        .copied()
        .ok_or_else(|| ApiError::InvalidDistro(distro.to_string()))
}
