//! Catalog queries: search, show, and version lookup

use crate::client::CatalogClient;
use crate::entry::ProfileCatalogEntry;
use crate::error::{CatalogError, Result};

/// Search the catalog for profiles matching `name`. An empty result is
/// an error naming the query.
pub fn search(client: &dyn CatalogClient, name: &str) -> Result<Vec<ProfileCatalogEntry>> {
    let path = "profiles";
    let (body, status) = client.do_request(path, &[("name", name)])?;
    if status != 200 {
        return Err(CatalogError::Status {
            status,
            path: path.to_string(),
        });
    }
    let entries: Vec<ProfileCatalogEntry> = serde_json::from_slice(&body)?;
    if entries.is_empty() {
        return Err(CatalogError::NoMatches {
            name: name.to_string(),
        });
    }
    Ok(entries)
}

/// Fetch one profile's catalog entry.
pub fn show(
    client: &dyn CatalogClient,
    catalog: &str,
    profile: &str,
) -> Result<ProfileCatalogEntry> {
    fetch_entry(client, catalog, profile, &format!("profiles/{catalog}/{profile}"))
}

/// Fetch one profile's entry at an explicit version. `latest` resolves
/// server-side.
pub fn get_with_version(
    client: &dyn CatalogClient,
    catalog: &str,
    profile: &str,
    version: &str,
) -> Result<ProfileCatalogEntry> {
    fetch_entry(
        client,
        catalog,
        profile,
        &format!("profiles/{catalog}/{profile}/{version}"),
    )
}

fn fetch_entry(
    client: &dyn CatalogClient,
    catalog: &str,
    profile: &str,
    path: &str,
) -> Result<ProfileCatalogEntry> {
    let (body, status) = client.do_request(path, &[])?;
    match status {
        200 => Ok(serde_json::from_slice(&body)?),
        404 => Err(CatalogError::NotFound {
            catalog: catalog.to_string(),
            profile: profile.to_string(),
        }),
        status => Err(CatalogError::Status {
            status,
            path: path.to_string(),
        }),
    }
}
