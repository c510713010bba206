//! Transport used to reach the profile catalog service

use tracing::debug;
use url::Url;

use crate::error::Result;

/// One catalog request: relative path plus query pairs, answered with
/// the raw body and HTTP status.
pub trait CatalogClient {
    fn do_request(&self, path: &str, query: &[(&str, &str)]) -> Result<(Vec<u8>, u16)>;
}

/// Catalog client over plain HTTP
pub struct HttpCatalogClient {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpCatalogClient {
    pub fn new(base: &str) -> Result<Self> {
        // Url::join treats a base without a trailing slash as a file
        // and would drop its last path segment.
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        Ok(Self {
            base,
            client: reqwest::blocking::Client::new(),
        })
    }
}

impl CatalogClient for HttpCatalogClient {
    fn do_request(&self, path: &str, query: &[(&str, &str)]) -> Result<(Vec<u8>, u16)> {
        let mut url = self.base.join(path)?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        debug!(%url, "catalog request");
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        Ok((response.bytes()?.to_vec(), status))
    }
}
