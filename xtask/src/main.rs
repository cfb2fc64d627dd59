// Desktop/tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod test;
mod wav;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use g711::Law;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Si3000 driver development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Companding law on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LawArg {
    /// G.711 mu-law (what the driver's `sample_compress` emits)
    Mu,
    /// G.711 A-law
    A,
}

impl From<LawArg> for Law {
    fn from(arg: LawArg) -> Self {
        match arg {
            LawArg::Mu => Law::MuLaw,
            LawArg::A => Law::ALaw,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check the driver crates for the host and for thumbv7em-none-eabihf (no_std)
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Compress a mono 16-bit WAV into a raw stream of companded bytes
    Encode {
        /// Companding law
        #[arg(long, value_enum, default_value = "mu")]
        law: LawArg,
        /// Input WAV file
        input: PathBuf,
        /// Output byte stream
        output: PathBuf,
    },
    /// Expand a raw companded byte stream into an 8 kHz mono 16-bit WAV
    Decode {
        /// Companding law
        #[arg(long, value_enum, default_value = "mu")]
        law: LawArg,
        /// Input byte stream
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Encode { law, input, output } => wav::encode(law.into(), &input, &output),
        Commands::Decode { law, input, output } => wav::decode(law.into(), &input, &output),
    }
}
