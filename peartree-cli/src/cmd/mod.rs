use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use peartree_core::{BuildError, ContentScanner, Site, SiteBuilder};
use tracing::info;

use crate::config::PeartreeConfig;

pub mod build;
pub mod check;

/// Arguments shared by every subcommand that reads content.
pub fn add_content_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('i')
                .long("content")
                .value_name("DIR")
                .help("Directory of page files (*.toml, *.json) [default: ./content]"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory with a page.html layout [default: ./theme]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file [default: ./peartree.toml]"),
        )
}

/// Scans the content directory and validates it against the configured
/// business facts.
///
/// The outer error covers missing files and configuration. The inner result
/// is the validation outcome, which `check` reports rather than propagates.
pub fn prepare_site(config: &PeartreeConfig) -> Result<Result<Site, BuildError>> {
    let build = config.build_config();
    let content = ContentScanner::new(&build.content)
        .scan()
        .with_context(|| format!("could not read content from {}", build.content))?;
    info!(
        pages = content.pages.len(),
        unreadable = content.unreadable.len(),
        "content scanned"
    );

    let business = config
        .site
        .business()
        .with_context(|| format!("{} needs a [business] table", build.config))?
        .clone();

    let mut builder = SiteBuilder::new()
        .site_config(config.site.site.clone())
        .business_facts(business)
        .add_scanned(content);
    if Path::new(&build.theme).is_dir() {
        builder = builder.theme_dir(&build.theme);
    }

    Ok(builder.build())
}
