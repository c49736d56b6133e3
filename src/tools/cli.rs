use std::fmt::{Display, Formatter};

use clap::Parser;
use log::info;

use crate::error::{Error, Result};

/// Command line interpretation - uses the external clap crate.
/// (Define author, version and about here.)
#[derive(Parser, Debug)]
#[command(
    author = "Joffrey Bion <joffrey.bion@gmail.com>",
    version,
    about = "A block-sorting text compressor (BWT + MTF + Huffman)",
    long_about = None)]
pub struct Args {
    /// Compress source into destination
    #[arg(short = 'c', long = "compress")]
    compress: bool,

    /// Decompress source into destination
    #[arg(short = 'd', long = "decompress")]
    decompress: bool,

    /// Round-trip self test: compress <source>.txt to <source>.pck, then
    /// decompress that to <source>-R.txt
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Source file (base name without extension in test mode)
    source: String,

    /// Destination file; defaults to <source>.pck
    destination: Option<String>,

    /// Sets verbosity. No -v shows errors only, -vvv is chatty
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Compress, Decompress, SelfTest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    SelfTest,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options controlling program behavior.
#[derive(Debug)]
pub struct JpOpts {
    /// What to do with the input
    pub op_mode: Mode,
    /// Name of the file to read for input
    pub source: String,
    /// Name of the file to write; derived from source when not given
    pub destination: String,
}

/// Parse the command line into a [`JpOpts`], setting the log level as a side
/// effect.
pub fn jpopts_init() -> Result<JpOpts> {
    let args = Args::parse();

    // Set the log level from the -v count
    match args.verbose {
        0 => log::set_max_level(log::LevelFilter::Error),
        1 => log::set_max_level(log::LevelFilter::Info),
        2 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let op_mode = match (args.compress, args.decompress, args.test) {
        (true, false, false) => Mode::Compress,
        (false, true, false) => Mode::Decompress,
        (false, false, true) => Mode::SelfTest,
        _ => {
            return Err(Error::Usage {
                message: "exactly one of -c, -d or -t must be given".to_string(),
            })
        }
    };
    if op_mode == Mode::SelfTest && args.destination.is_some() {
        return Err(Error::Usage {
            message: "test mode derives its file names from <source>".to_string(),
        });
    }

    let destination = args
        .destination
        .unwrap_or_else(|| format!("{}.pck", args.source));

    info!("---- jpack initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", op_mode);
    info!("Getting input from the file {}", args.source);
    info!("---- jpack initialization end ----");

    Ok(JpOpts {
        op_mode,
        source: args.source,
        destination,
    })
}
