// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("sccs2rcs")
        .version(env!("CARGO_PKG_VERSION"))
        .author("sccs2rcs Contributors")
        .about("Convert an SCCS history into an RCS history")
        .long_about(
            "Convert the SCCS history in ./SCCS into an RCS history in ./RCS, preserving \
             every delta's date, author, comment and branch position. ./SCCS is never \
             altered. If a step fails the run stops, prints its log, and ./RCS must be \
             removed before trying again.",
        )
        .arg(
            Arg::new("comments")
                .short('c')
                .long("comments")
                .value_name("FILE")
                .help("Description table for initial check-ins (lines of filename:description)"),
        )
        .arg(
            Arg::new("directory")
                .short('C')
                .long("directory")
                .value_name("DIR")
                .default_value(".")
                .help("Directory containing the SCCS directory to convert"),
        )
        .arg(
            Arg::new("tool_dir")
                .long("tool-dir")
                .value_name("DIR")
                .default_value("/usr/lib/cssc")
                .help("Extra directory searched for SCCS/RCS tools"),
        )
        .arg(
            Arg::new("show_log")
                .long("show-log")
                .action(ArgAction::SetTrue)
                .help("Print the full command log after a successful conversion"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Don't show progress bars"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("sccs2rcs.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
