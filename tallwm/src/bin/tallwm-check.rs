use anyhow::{bail, Result};
use clap::{arg, command};
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = command!("tallwm Check")
        .about("Checks syntax of the configuration file")
        .help_template(tallwm::utils::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs received configuration file."),
            arg!([INPUT] "Sets the input file to use. Uses the default location otherwise."),
        ])
        .get_matches();

    let config_file = matches.get_one::<String>("INPUT").map(PathBuf::from);
    let verbose = matches.get_flag("verbose");

    println!(
        "\x1b[0;94m::\x1b[0m tallwm version: {}",
        env!("CARGO_PKG_VERSION")
    );
    println!("\x1b[0;94m::\x1b[0m Loading configuration . . .");
    let loaded = match &config_file {
        Some(path) => tallwm::load_from_path(path),
        None => tallwm::load(),
    };
    let config = match loaded {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            if verbose {
                dbg!(&config);
            }
            config
        }
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m Configuration failed. Reason: {err:#} \x1b[0m");
            bail!("configuration could not be loaded");
        }
    };

    if !config.check_all(verbose) {
        bail!("configuration is invalid");
    }
    Ok(())
}
