use anyhow::Result;
use clap::Command;

mod cmd;
mod config;

fn cli() -> Command {
    Command::new("peartree")
        .about("Landing page generator for Peartree Dental")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::check::make_subcommand())
}

fn main() -> Result<()> {
    // stdout is reserved for command output such as `check --format json`
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("check", args)) => cmd::check::execute(args),
        _ => unreachable!("clap requires a subcommand"),
    }
}
