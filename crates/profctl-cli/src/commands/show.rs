//! Show command - print one profile's catalog entry

use console::style;
use miette::{miette, Result};

use profctl_catalog::show;

use super::catalog_client;

pub fn run(catalog_url: Option<&str>, catalog: &str, profile: &str) -> Result<()> {
    let client = catalog_client(catalog_url)?;
    let entry = show(&client, catalog, profile).map_err(|err| miette!("{err}"))?;

    println!("{}: {}", style("Name").bold(), entry.name);
    if let Some(description) = &entry.description {
        println!("{}: {}", style("Description").bold(), description);
    }
    if let Some(version) = &entry.version {
        println!("{}: {}", style("Version").bold(), version);
    }
    if let Some(url) = &entry.url {
        println!("{}: {}", style("URL").bold(), url);
    }
    if let Some(maintainer) = &entry.maintainer {
        println!("{}: {}", style("Maintainer").bold(), maintainer);
    }
    if !entry.prerequisites.is_empty() {
        println!(
            "{}: {}",
            style("Prerequisites").bold(),
            entry.prerequisites.join(", ")
        );
    }
    Ok(())
}
