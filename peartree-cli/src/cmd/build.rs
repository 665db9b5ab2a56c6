use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::Path;
use tracing::info;

use crate::cmd::{add_content_args, prepare_site};
use crate::config::load_build_config;

pub fn make_subcommand() -> Command {
    add_content_args(Command::new("build"))
        .about("Validate content and write every landing page")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated pages [default: ./out]"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = load_build_config(args)?;
    let output_dir = Path::new(&config.build_config().output);

    let site = prepare_site(&config)??;
    site.render_all(output_dir)?;

    info!("Built {} page(s) in {}", site.pages().len(), output_dir.display());
    Ok(())
}
