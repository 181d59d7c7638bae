//! Data model for packagecloud entities.
//!
//! Everything here is a read-only snapshot of server state: values are never
//! mutated locally, only replaced by fresh fetches.

use crate::format::Formattable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A package as returned by the packagecloud API.
///
/// The URL fields are opaque strings issued by the server. The action URLs
/// (`destroy_url`, `promote_url`) are only valid relative to the base URL of
/// the session that fetched them.
/// See <https://packagecloud.io/docs/api#object_PackageFragment>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub epoch: i64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub uploader_name: String,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub repository_html_url: String,
    #[serde(default, rename = "downloads_detail_url")]
    pub download_details_url: String,
    #[serde(default)]
    pub downloads_series_url: String,
    #[serde(default)]
    pub downloads_count_url: String,
    pub promote_url: String,
    pub destroy_url: String,
    pub filename: String,
    pub distro_version: String,
    pub version: String,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(rename = "type")]
    pub package_type: String,
    pub package_url: String,
    pub package_html_url: String,
}

impl Package {
    /// Age of the package in whole days.
    pub fn days_old(&self) -> i64 {
        (Utc::now() - self.created_at).num_days()
    }
}

impl Formattable for Vec<Package> {
    fn text_lines(&self) -> Vec<String> {
        self.iter()
            .map(|package| package.package_html_url.clone())
            .collect()
    }
}

/// The catalog of supported distributions, keyed by package family.
/// See <https://packagecloud.io/docs/api#resource_distributions>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributions {
    #[serde(default)]
    pub deb: Vec<Distribution>,
    #[serde(default)]
    pub dsc: Vec<Distribution>,
    #[serde(default)]
    pub rpm: Vec<Distribution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub display_name: String,
    pub index_name: String,
    #[serde(default)]
    pub versions: Vec<DistributionVersion>,
}

/// A named version of a distribution. The numeric `id` is what uploads must
/// reference as `package[distro_version_id]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionVersion {
    pub id: u32,
    pub display_name: String,
    pub index_name: String,
}

/// One distribution version flattened out of the nested catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearizedDistribution {
    pub id: u32,
    pub package_type: String,
    pub distribution_name: String,
    pub distribution_index: String,
    pub version_name: String,
    pub version_index: String,
}

impl Distributions {
    fn families(&self) -> [(&'static str, &Vec<Distribution>); 3] {
        [("deb", &self.deb), ("dsc", &self.dsc), ("rpm", &self.rpm)]
    }

    /// Flattens the catalog into one entry per distribution version.
    pub fn linearize(&self) -> Vec<LinearizedDistribution> {
        let mut linearized = Vec::new();
        for (package_type, distributions) in self.families() {
            for distribution in distributions {
                for version in &distribution.versions {
                    linearized.push(LinearizedDistribution {
                        id: version.id,
                        package_type: package_type.to_string(),
                        distribution_name: distribution.display_name.clone(),
                        distribution_index: distribution.index_name.clone(),
                        version_name: version.display_name.clone(),
                        version_index: version.index_name.clone(),
                    });
                }
            }
        }
        linearized
    }

    /// Maps `"distro/version"` index pairs, like `"ubuntu/xenial"`, to their
    /// numeric distro version ids across every package family.
    pub fn version_ids(&self) -> HashMap<String, u32> {
        let mut ids = HashMap::new();
        for entry in self.linearize() {
            ids.insert(
                format!("{}/{}", entry.distribution_index, entry.version_index),
                entry.id,
            );
        }
        ids
    }
}

impl Formattable for Vec<LinearizedDistribution> {
    fn text_lines(&self) -> Vec<String> {
        self.iter()
            .map(|entry| {
                format!(
                    "{}/{}: {}",
                    entry.distribution_index, entry.version_index, entry.id
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const PACKAGE_JSON: &str = r#"{
        "name": "jake",
        "created_at": "2017-03-13T02:49:29.000Z",
        "epoch": 0,
        "scope": null,
        "private": false,
        "uploader_name": "jakedotio",
        "indexed": true,
        "repository_html_url": "/jakedotio/jake",
        "downloads_detail_url": "/api/v1/repos/jakedotio/jake/package/deb/ubuntu/xenial/jake/amd64/1.0.0-1/downloads/detail.json",
        "downloads_series_url": "/api/v1/repos/jakedotio/jake/package/deb/ubuntu/xenial/jake/amd64/1.0.0-1/downloads/series/daily.json",
        "downloads_count_url": "/api/v1/repos/jakedotio/jake/package/deb/ubuntu/xenial/jake/amd64/1.0.0-1/downloads/count.json",
        "promote_url": "/api/v1/repos/jakedotio/jake/ubuntu/xenial/jake_1.0.0-1_amd64.deb/promote.json",
        "destroy_url": "/api/v1/repos/jakedotio/jake/ubuntu/xenial/jake_1.0.0-1_amd64.deb",
        "filename": "jake_1.0.0-1_amd64.deb",
        "distro_version": "ubuntu/xenial",
        "version": "1.0.0",
        "release": "1",
        "type": "deb",
        "package_url": "/api/v1/repos/jakedotio/jake/package/deb/ubuntu/xenial/jake/amd64/1.0.0-1.json",
        "package_html_url": "/jakedotio/jake/packages/ubuntu/xenial/jake_1.0.0-1_amd64.deb"
    }"#;

    fn sample_catalog() -> Distributions {
        Distributions {
            deb: vec![Distribution {
                display_name: "Ubuntu".to_string(),
                index_name: "ubuntu".to_string(),
                versions: vec![
                    DistributionVersion {
                        id: 20,
                        display_name: "16.04 Xenial".to_string(),
                        index_name: "xenial".to_string(),
                    },
                    DistributionVersion {
                        id: 24,
                        display_name: "18.04 Bionic".to_string(),
                        index_name: "bionic".to_string(),
                    },
                ],
            }],
            dsc: vec![],
            rpm: vec![Distribution {
                display_name: "Fedora".to_string(),
                index_name: "fedora".to_string(),
                versions: vec![DistributionVersion {
                    id: 141,
                    display_name: "27".to_string(),
                    index_name: "27".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn package_deserializes_from_api_json() {
        let package: Package = serde_json::from_str(PACKAGE_JSON).unwrap();
        assert_eq!(package.name, "jake");
        assert_eq!(package.filename, "jake_1.0.0-1_amd64.deb");
        assert_eq!(package.package_type, "deb");
        assert_eq!(package.distro_version, "ubuntu/xenial");
        assert_eq!(
            package.promote_url,
            "/api/v1/repos/jakedotio/jake/ubuntu/xenial/jake_1.0.0-1_amd64.deb/promote.json"
        );
    }

    #[test]
    fn empty_package_list_renders_no_text() {
        use crate::format::OutputFormat;
        let packages: Vec<Package> = Vec::new();
        assert_eq!(packages.format(OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn days_old_counts_whole_days() {
        let mut package: Package = serde_json::from_str(PACKAGE_JSON).unwrap();
        package.created_at = Utc::now() - Duration::days(10) - Duration::hours(3);
        assert_eq!(package.days_old(), 10);
    }

    #[test]
    fn linearize_recovers_every_triple_exactly_once() {
        let catalog = sample_catalog();
        let linearized = catalog.linearize();

        let mut triples: Vec<(String, String, u32)> = linearized
            .iter()
            .map(|entry| {
                (
                    entry.distribution_index.clone(),
                    entry.version_index.clone(),
                    entry.id,
                )
            })
            .collect();
        triples.sort();
        assert_eq!(
            triples,
            vec![
                ("fedora".to_string(), "27".to_string(), 141),
                ("ubuntu".to_string(), "bionic".to_string(), 24),
                ("ubuntu".to_string(), "xenial".to_string(), 20),
            ]
        );
    }

    #[test]
    fn version_ids_keys_by_index_pair() {
        let ids = sample_catalog().version_ids();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.get("ubuntu/xenial"), Some(&20));
        assert_eq!(ids.get("fedora/27"), Some(&141));
        assert_eq!(ids.get("ubuntu/bionic99"), None);
    }

    #[test]
    fn catalog_deserializes_with_missing_families() {
        let catalog: Distributions = serde_json::from_str(
            r#"{"deb":[{"display_name":"Debian","index_name":"debian","versions":[{"id":3,"display_name":"Jessie","index_name":"jessie"}]}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.deb.len(), 1);
        assert!(catalog.dsc.is_empty());
        assert!(catalog.rpm.is_empty());
        assert_eq!(catalog.version_ids().get("debian/jessie"), Some(&3));
    }
}
