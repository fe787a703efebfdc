//! A collection of tools for inspecting OpenDRIVE road networks, bundled as a single executable.

#[macro_use]
extern crate log;

mod summary;
mod validate;

use anyhow::Result;
use structopt::StructOpt;

use abstutil::Timer;
use opendrive::{ParseOptions, RecordingBuilder};

#[derive(StructOpt)]
#[structopt(name = "odcli", about = "The OpenDRIVE multi-tool")]
enum Command {
    /// Prints every call a map builder would receive from an OpenDRIVE file, as JSON
    DumpCalls {
        /// The path to an .xodr file
        #[structopt()]
        input: String,
        /// Write the JSON here instead of STDOUT
        #[structopt(long)]
        output: Option<String>,
        /// A JSON file with parsing options. Takes precedence over the flags.
        #[structopt(long)]
        options: Option<String>,
        #[structopt(flatten)]
        opts: ParseOptions,
    },
    /// Lists the roads in an OpenDRIVE file, with their lane sections and lanes
    Summary {
        /// The path to an .xodr file
        #[structopt()]
        input: String,
        /// A JSON file with parsing options. Takes precedence over the flags.
        #[structopt(long)]
        options: Option<String>,
        #[structopt(flatten)]
        opts: ParseOptions,
    },
    /// Checks that no road has more laneSections than laneOffsets
    Validate {
        /// The path to an .xodr file
        #[structopt()]
        input: String,
    },
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    // Short implementations can stay in this file, but please split larger subcommands to their
    // own module.
    match Command::from_args() {
        Command::DumpCalls {
            input,
            output,
            options,
            opts,
        } => dump_calls(input, output, resolve_options(options, opts)?)?,
        Command::Summary {
            input,
            options,
            opts,
        } => summary::run(input, resolve_options(options, opts)?)?,
        Command::Validate { input } => validate::run(input)?,
    }
    Ok(())
}

fn resolve_options(path: Option<String>, flags: ParseOptions) -> Result<ParseOptions> {
    match path {
        Some(path) => ParseOptions::load(&path),
        None => Ok(flags),
    }
}

fn dump_calls(input: String, output: Option<String>, opts: ParseOptions) -> Result<()> {
    let mut timer = Timer::new(format!("dump builder calls for {}", input));
    let mut builder = RecordingBuilder::new();
    opendrive::load(&input, &mut builder, &opts, &mut timer)?;
    let json = serde_json::to_string_pretty(&builder.calls)?;
    match output {
        Some(path) => {
            fs_err::write(&path, json)?;
            info!(
                "Wrote {} calls to {}",
                abstutil::prettyprint_usize(builder.calls.len()),
                path
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
