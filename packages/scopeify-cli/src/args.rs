//! Command Line Arguments

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::config::CliOverrides;

pub fn command() -> Command {
    Command::new("scopeify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scope CSS class, id, element, keyframes and font-face names")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Stylesheets to scope (reads stdin when omitted)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Path to a scopeify JSON configuration"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Write <stem>.css and <stem>.map.json here instead of printing JSON"),
        )
        .arg(flag("no-classes", "Leave class names untouched"))
        .arg(flag("no-ids", "Leave ids untouched"))
        .arg(flag("no-elements", "Leave element and `*` selectors untouched"))
        .arg(flag("no-keyframes", "Leave keyframes names untouched"))
        .arg(flag("no-font-faces", "Leave font-face families untouched"))
        .arg(
            Arg::new("asterisk-name")
                .long("asterisk-name")
                .value_name("NAME")
                .help("Class name used for the `*` selector"),
        )
        .arg(
            Arg::new("stage")
                .long("stage")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Run a built-in stage before scoping (e.g. strip-comments)"),
        )
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).action(ArgAction::SetTrue).help(help)
}

pub fn files(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

pub fn overrides(matches: &ArgMatches) -> CliOverrides {
    CliOverrides {
        no_classes: matches.get_flag("no-classes"),
        no_ids: matches.get_flag("no-ids"),
        no_elements: matches.get_flag("no-elements"),
        no_keyframes: matches.get_flag("no-keyframes"),
        no_font_faces: matches.get_flag("no-font-faces"),
        asterisk_name: matches.get_one::<String>("asterisk-name").cloned(),
        stages: matches
            .get_many::<String>("stage")
            .map(|stages| stages.cloned().collect())
            .unwrap_or_default(),
    }
}
