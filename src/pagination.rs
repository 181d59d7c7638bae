//! Pagination of package listings.
//!
//! List responses carry `Total`, `Per-Page` and `Max-Per-Page` headers plus
//! an RFC 5988 `Link` header. The `next` relation of the `Link` header, when
//! present, becomes an explicit [`PageCursor`] on the returned page; a page
//! without a cursor is the final page. See
//! <https://packagecloud.io/docs/api#pagination>.

use crate::error::ApiError;
use crate::model::Package;
use reqwest::header::{HeaderMap, LINK};
use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated {
    pub total: u64,
    pub per_page: u64,
    pub max_per_page: u64,
}

/// Opaque continuation for a package listing: the absolute URL of the next
/// page, exactly as issued by the server. Serializable, so an iteration can
/// be suspended and resumed later with the same client credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a package listing. `next` is `None` on the final page; that
/// absence is the sole termination signal, so a server issuing a `next` link
/// cycle would make the caller iterate forever.
#[derive(Debug, Clone)]
pub struct PackagePage {
    pub packages: Vec<Package>,
    pub paginated: Paginated,
    pub next: Option<PageCursor>,
}

/// Extracts the three required pagination headers. A missing header or a
/// non-integer value is a hard error for the page.
pub fn extract_pagination_headers(headers: &HeaderMap) -> Result<Paginated, ApiError> {
    Ok(Paginated {
        total: integer_header(headers, "Total")?,
        per_page: integer_header(headers, "Per-Page")?,
        max_per_page: integer_header(headers, "Max-Per-Page")?,
    })
}

/// The cursor for the `next` relation of the `Link` header, if any.
pub fn next_cursor(headers: &HeaderMap) -> Option<PageCursor> {
    headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(next_link)
        .map(PageCursor)
}

fn integer_header(headers: &HeaderMap, name: &'static str) -> Result<u64, ApiError> {
    let value = headers
        .get(name)
        .ok_or(ApiError::PaginationHeaderMissing(name))?;
    value
        .to_str()
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| ApiError::PaginationHeaderMalformed {
            name,
            value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })
}

/// Minimal RFC 5988 scan: returns the target of the `rel="next"` relation.
fn next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut segments = part.split(';');
        let target = match segments.next() {
            Some(target) => target.trim(),
            None => continue,
        };
        if !target.starts_with('<') || !target.ends_with('>') {
            continue;
        }
        for parameter in segments {
            if let Some(relation) = parameter.trim().strip_prefix("rel=") {
                if relation.trim_matches('"') == "next" {
                    return Some(target[1..target.len() - 1].to_string());
                }
            }
        }
    }
    None
}
