/**
 * Scopeify CLI - scopeify
 *
 * Main entry point for scoping stylesheets
 */
use std::path::PathBuf;
use std::process;

use scopeify_cli::args;
use scopeify_cli::config::{build_options, load_config};
use scopeify_cli::perform_scope::perform_scope;

fn main() {
    scopeify_cli::init_tracing();

    let matches = args::command().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => match load_config(path) {
            Ok(config) => Some(config),
            Err(err) => exit_with(err),
        },
        None => None,
    };

    let options = match build_options(config, &args::overrides(&matches)) {
        Ok(options) => options,
        Err(err) => exit_with(err),
    };

    let out_dir = matches.get_one::<PathBuf>("out-dir");
    match perform_scope(&args::files(&matches), &options, out_dir.map(PathBuf::as_path)) {
        Ok(Some(report)) => println!("{}", report),
        Ok(None) => {}
        Err(err) => exit_with(err),
    }
}

fn exit_with(err: anyhow::Error) -> ! {
    eprintln!("Error: {:#}", err);
    process::exit(1);
}
