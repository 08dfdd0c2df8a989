//! Build script rendering the `framesink` man page from the CLI definition.
//!
//! The page lands in `target/generated-man/` under the command's name and
//! section, with the package version recorded as its source.

use std::{fs, path::Path};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

const MAN_DIR: &str = "target/generated-man";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    let man = Man::new(cli::Cli::command())
        .section("1")
        .source(concat!("framesink ", env!("CARGO_PKG_VERSION")))
        .manual("framesink manual");

    let mut page = Vec::new();
    man.render(&mut page)?;

    let dir = Path::new(MAN_DIR);
    fs::create_dir_all(dir)?;
    fs::write(dir.join(man.get_filename()), page)?;
    Ok(())
}
