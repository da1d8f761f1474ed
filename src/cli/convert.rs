//! Convert command implementation.
//!
//! Loads the source image, builds the map document and writes it as JSON.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::map::write_map_json;
use crate::output::{display_path, Printer};
use crate::pipeline::convert_file;

use super::Cli;

/// Resolve the effective config: `--config`, else ./tilemap.yaml, else defaults.
fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(std::path::Path::new("."))?,
    };
    let config = cli.apply(base);
    config.validate()?;
    Ok(config)
}

/// Run a conversion and return the path of the written map.
pub fn run(cli: &Cli, printer: &Printer) -> Result<PathBuf> {
    let config = load_config(cli)?;
    let map = convert_file(&cli.image, &config, printer)?;

    let path = config.output_path();
    printer.status("Writing", &printer.cyan(&display_path(&path)));
    write_map_json(&map, &path, config.pretty)?;

    printer.success(
        "Finished",
        &format!("{} ({}x{})", config.file_name, map.width, map.height),
    );

    Ok(path)
}
