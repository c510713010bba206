//! Search command - list catalog profiles matching a name

use console::style;
use miette::{miette, Result};

use profctl_catalog::search;

use super::catalog_client;

pub fn run(catalog_url: Option<&str>, name: &str) -> Result<()> {
    let client = catalog_client(catalog_url)?;
    let entries = search(&client, name).map_err(|err| miette!("{err}"))?;

    for entry in entries {
        println!(
            "{} {} {}",
            style(&entry.name).green(),
            style(entry.version.as_deref().unwrap_or("-")).dim(),
            entry.description.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}
