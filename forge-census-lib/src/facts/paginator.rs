//! Keyset pagination over listing endpoints.
//!
//! Each page carries a `Link` header; as long as it names a `rel="next"` target
//! we follow that URL verbatim. The cursor is opaque to us.

use super::client::{Auth, Client};
use super::{Project, TransportError};
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "   listing";

/// Default number of entities requested per page
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// URL of the first page of the project listing, ordered by ascending id
#[must_use]
pub fn projects_url(client: &Client, page_size: u8) -> String {
    client.url(&format!("/projects?pagination=keyset&per_page={page_size}&order_by=id&sort=asc"))
}

/// Fetch every project, in server order.
///
/// `on_page` is called with the number of projects received after each page.
pub async fn list_all_projects(client: &Client, page_size: u8, on_page: impl FnMut(usize)) -> Result<Vec<Project>, TransportError> {
    list_all(client, projects_url(client, page_size), on_page).await
}

/// Walk a listing endpoint until the server stops handing out a next link.
pub async fn list_all<T: DeserializeOwned>(
    client: &Client,
    first_url: String,
    mut on_page: impl FnMut(usize),
) -> Result<Vec<T>, TransportError> {
    let mut all = Vec::new();
    let mut next = Some(first_url);
    let mut page_num = 0u32;

    while let Some(url) = next {
        page_num += 1;

        let resp = client.get(&url, Auth::Anonymous).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::status(url, status));
        }

        next = next_link(resp.headers());

        let page: Vec<T> = resp.json().await.map_err(|e| TransportError::decode(url.as_str(), e))?;
        log::debug!(target: LOG_TARGET, "Page {page_num} returned {} item(s), more pages: {}", page.len(), next.is_some());

        on_page(page.len());
        all.extend(page);
    }

    log::info!(target: LOG_TARGET, "Listed {} item(s) across {page_num} page(s)", all.len());
    Ok(all)
}

/// Extract the `rel="next"` target from a response's `Link` header, if any
fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| parse_link_header(value, "next"))
}

/// Find the target of the link with relation `wanted` in an RFC 8288 `Link` value.
///
/// Example: `<https://host/api/v4/projects?id_after=100>; rel="next", <...>; rel="first"`
fn parse_link_header(link_header: &str, wanted: &str) -> Option<String> {
    for part in link_header.split(',') {
        let mut url = None;
        let mut matches = false;

        for segment in part.split(';') {
            let segment = segment.trim();
            if let Some(target) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(target);
            } else if let Some(rel) = segment.strip_prefix("rel=") {
                matches = rel.trim_matches('"').split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case(wanted));
            }
        }

        if matches && let Some(url) = url {
            return Some(url.to_string());
        }
    }

    None
}
