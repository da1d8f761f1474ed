use clap::Parser;
use miette::Result;
use tilemap::cli::Cli;
use tilemap::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::with_verbosity(cli.verbosity());

    tilemap::cli::convert::run(&cli, &printer)?;

    Ok(())
}
