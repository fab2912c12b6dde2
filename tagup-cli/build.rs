use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["ast-json", "ast-compact"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("tagup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting tagup markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the input file")
                .required_unless_present("list-transforms")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("transform")
                .help("Transform to apply (e.g., 'ast-json')")
                .required_unless_present("list-transforms")
                .value_parser(clap::builder::PossibleValuesParser::new(
                    AVAILABLE_TRANSFORMS,
                ))
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "tagup", &outdir)?;
    generate_to(Zsh, &mut cmd, "tagup", &outdir)?;
    generate_to(Fish, &mut cmd, "tagup", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
