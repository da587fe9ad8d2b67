use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
// (name, takes --output)
const SUBCOMMANDS: &[(&str, bool)] = &[
    ("convert", true),
    ("substitute-ids", true),
    ("clamp-widths", true),
    ("linked-pages", false),
];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("adf2adoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Atlassian Document Format trees to AsciiDoc")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        );

    for (name, has_output) in SUBCOMMANDS {
        let mut sub = Command::new(*name).arg(
            Arg::new("input")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        );
        if *has_output {
            sub = sub.arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_hint(ValueHint::FilePath),
            );
        }
        cmd = cmd.subcommand(sub);
    }

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "adf2adoc", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "adf2adoc", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "adf2adoc", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
