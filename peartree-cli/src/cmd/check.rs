use anyhow::{Result, bail};
use clap::{Arg, ArgMatches, Command, builder::PossibleValuesParser};
use peartree_core::{BuildError, Site, ValidationError, Violation};
use serde::Serialize;

use crate::cmd::{add_content_args, prepare_site};
use crate::config::load_build_config;

pub fn make_subcommand() -> Command {
    add_content_args(Command::new("check"))
        .about("Validate content and report every problem without writing output")
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Report format")
                .value_parser(PossibleValuesParser::new(["text", "json"]))
                .default_value("text"),
        )
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    ok: bool,
    pages: usize,
    errors: &'a [ValidationError],
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = load_build_config(args)?;
    let json = args.get_one::<String>("format").is_some_and(|f| f == "json");

    let (pages, errors) = match prepare_site(&config)? {
        Ok(site) => (site.pages().len(), render_errors(&site)),
        Err(BuildError::InvalidPages(errors)) => (0, errors),
        Err(err) => return Err(err.into()),
    };

    let report = Report {
        ok: errors.is_empty(),
        pages,
        errors: &errors,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    if !report.ok {
        bail!("{} page(s) failed validation", errors.len());
    }
    Ok(())
}

/// Renders every page and collects the failures validation cannot see, such
/// as a missing hero or call to action.
fn render_errors(site: &Site) -> Vec<ValidationError> {
    site.pages()
        .iter()
        .filter_map(|page| {
            let err = site.render_page(page).err()?;
            Some(ValidationError::new(
                page.slug(),
                vec![Violation {
                    field: "structure".into(),
                    message: err.to_string(),
                }],
            ))
        })
        .collect()
}

fn print_text(report: &Report<'_>) {
    if report.ok {
        println!("{} page(s) OK", report.pages);
        return;
    }
    for error in report.errors {
        println!("{error}");
    }
}
