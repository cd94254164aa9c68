use clap::Parser;
use econosense::{Cli, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let output = run(&cli)?;
    print!("{output}");

    tracing::debug!("EconoSense finished");
    Ok(())
}
