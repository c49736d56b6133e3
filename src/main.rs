//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use jpack::compression::compressor::{compress, uncompress};
use jpack::tools::cli::{jpopts_init, Mode};
use jpack::Result;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )
    .expect("no other logger is installed");

    match run() {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("jpack: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let opts = jpopts_init()?;
    match opts.op_mode {
        Mode::Compress => compress(&opts.source, &opts.destination),
        Mode::Decompress => uncompress(&opts.source, &opts.destination),
        Mode::SelfTest => self_test(&opts.source),
    }
}

/// Round-trip self test: compress <base>.txt, decompress the result, leaving
/// <base>.pck and <base>-R.txt behind for comparison.
fn self_test(base: &str) -> Result<()> {
    let source = format!("{base}.txt");
    let packed = format!("{base}.pck");
    let restored = format!("{base}-R.txt");
    compress(&source, &packed)?;
    uncompress(&packed, &restored)?;
    info!("Self test wrote '{packed}' and '{restored}'.");
    Ok(())
}
