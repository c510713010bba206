//! CLI commands

pub mod install;
pub mod search;
pub mod show;

use miette::{miette, Result};

use profctl_catalog::HttpCatalogClient;

/// Catalog-backed commands need a configured catalog URL.
pub fn catalog_client(catalog_url: Option<&str>) -> Result<HttpCatalogClient> {
    let url = catalog_url.ok_or_else(|| {
        miette!("no catalog configured; pass --catalog-url or set PROFCTL_CATALOG_URL")
    })?;
    HttpCatalogClient::new(url).map_err(|err| miette!("{err}"))
}
