use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::build::{build_bilingual, build_site};
use folio::config::Config;
use folio::scrape::{read_urls, scrape_to_file, HttpFetcher};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Renders a personal portfolio site from a CSV table of articles.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory from which `folio.yaml` is searched for, walking up through
    /// parent directories
    #[arg(short, long, default_value = ".", global = true)]
    project: PathBuf,

    /// Output directory for pages; defaults to the directory holding
    /// `folio.yaml`
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the home page and one page per category
    Build,

    /// Render one index page per language from the bilingual template
    Bilingual,

    /// Scrape article metadata from a list of news-site URLs into a CSV
    Scrape {
        /// File with one article URL per line
        #[arg(short, long)]
        urls: PathBuf,

        /// Where to write the scraped CSV
        #[arg(long = "csv", default_value = "scraped_articles.csv")]
        csv: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build => {
            let config = Config::from_directory(&cli.project, cli.output.as_deref())?;
            let written = build_site(&config).context("Building site")?;
            info!(pages = written.len(), "Site built");
        }
        Command::Bilingual => {
            let config = Config::from_directory(&cli.project, cli.output.as_deref())?;
            let written = build_bilingual(&config).context("Building bilingual pages")?;
            info!(pages = written.len(), "Bilingual pages built");
        }
        Command::Scrape { urls, csv } => {
            let urls = read_urls(&urls)?;
            info!(count = urls.len(), "Loaded URL list");
            let fetcher = HttpFetcher::new()?;
            scrape_to_file(&fetcher, &urls, &csv)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli_build_defaults() {
        let cli = Cli::parse_from(["folio", "build"]);
        assert_eq!(PathBuf::from("."), cli.project);
        assert_eq!(None, cli.output);
        assert!(matches!(cli.command, Command::Build));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["folio", "bilingual", "-p", "site", "-o", "public"]);
        assert_eq!(PathBuf::from("site"), cli.project);
        assert_eq!(Some(PathBuf::from("public")), cli.output);
        assert!(matches!(cli.command, Command::Bilingual));
    }

    #[test]
    fn test_cli_scrape() {
        let cli = Cli::parse_from(["folio", "scrape", "--urls", "urls.txt"]);
        match cli.command {
            Command::Scrape { urls, csv } => {
                assert_eq!(PathBuf::from("urls.txt"), urls);
                assert_eq!(PathBuf::from("scraped_articles.csv"), csv);
            }
            other => panic!("wanted Scrape; found {:?}", other),
        }
    }
}
