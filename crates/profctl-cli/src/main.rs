//! profctl - install GitOps profiles from catalogs and git repositories

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

mod commands;
mod writer;

#[derive(Parser)]
#[command(name = "profctl")]
#[command(version)]
#[command(about = "Install GitOps profiles as Flux resources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Profile catalog service URL
    #[arg(long, global = true, env = "PROFCTL_CATALOG_URL")]
    catalog_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog for profiles by name
    Search {
        /// Profile name to search for
        name: String,
    },

    /// Show one profile's catalog entry
    Show {
        /// Catalog the profile is listed in
        catalog: String,

        /// Profile name
        profile: String,
    },

    /// Resolve a profile and write its artifacts to disk
    Install {
        /// Catalog entry as <catalog>/<profile>
        #[arg(conflicts_with = "profile_url")]
        profile: Option<String>,

        /// Profile version to install
        #[arg(long, default_value = "latest")]
        version: String,

        /// Install straight from a repository URL instead of the catalog
        #[arg(long)]
        profile_url: Option<String>,

        /// Branch the profile definition lives on
        #[arg(long, default_value = "main")]
        profile_branch: String,

        /// Path of the profile within the repository
        #[arg(long, default_value = ".")]
        profile_path: String,

        /// Local name for this subscription
        #[arg(long, default_value = "profctl-profile")]
        sub_name: String,

        /// Target namespace for the emitted objects
        #[arg(long, default_value = "default")]
        namespace: String,

        /// Directory artifacts are written into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Flux GitRepository to attach path-based artifacts to, as
        /// <namespace>/<name>
        #[arg(long)]
        git_repository: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { name } => commands::search::run(cli.catalog_url.as_deref(), &name),
        Commands::Show { catalog, profile } => {
            commands::show::run(cli.catalog_url.as_deref(), &catalog, &profile)
        }
        Commands::Install {
            profile,
            version,
            profile_url,
            profile_branch,
            profile_path,
            sub_name,
            namespace,
            out,
            git_repository,
        } => commands::install::run(commands::install::InstallArgs {
            catalog_url: cli.catalog_url,
            profile,
            version,
            profile_url,
            profile_branch,
            profile_path,
            sub_name,
            namespace,
            out,
            git_repository,
        }),
    }
}
