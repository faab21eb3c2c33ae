mod report;

use std::{fs::File, io, path::PathBuf, process::exit};

use caramel_class_file::{ClassFile, ClassFileError, DecodeOptions, WideConstantSlots};
use clap::Parser;
use memmap::Mmap;
use thiserror::Error;

use crate::report::Report;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The class file to decode
    #[arg(value_name = "FILE")]
    file: PathBuf,

    #[arg(long)]
    /// Give Long and Double constants a single constant pool slot instead of two
    single_slot: bool,

    #[arg(long)]
    /// Check that every member and attribute name refers to a Utf8 entry before printing
    verify: bool,
}

impl Cli {
    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            wide_constants: if self.single_slot {
                WideConstantSlots::Single
            } else {
                WideConstantSlots::Double
            },
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    ClassFile(#[from] ClassFileError),
}

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: cli.file.clone(),
        source,
    };

    let file = File::open(&cli.file).map_err(io_error)?;
    // Empty files cannot be mapped.
    if file.metadata().map_err(io_error)?.len() == 0 {
        return decode(cli, &[]);
    }

    let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
    log::debug!("mapped {} bytes from {}", mmap.len(), cli.file.display());

    decode(cli, &mmap)
}

fn decode(cli: &Cli, bytes: &[u8]) -> Result<(), CliError> {
    let class_file = ClassFile::parse_with(bytes, cli.decode_options())?;
    if cli.verify {
        class_file.check_name_references()?;
    }

    print!("{}", Report::new(&class_file)?);
    Ok(())
}
