use clap::Parser;
use color_eyre::eyre;
use helm_schema_cli::{Cli, logging};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::setup_logging(
        Some(cli.logging.log_level),
        Some(cli.logging.log_format),
        cli.logging.color.into(),
    )?;

    helm_schema_cli::run(&cli)?;
    Ok(())
}
