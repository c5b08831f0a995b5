use clap::{Parser, Subcommand};

use crate::fuzz::Fuzz;

mod build;
mod doc;
mod fuzz;
mod run;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the cli frontend
    Build {
        /// Build with release profile
        #[arg(short, long, default_value_t = false)]
        release: bool,

        /// Build with target architecture
        #[arg(short, long, default_value = "x86_64-unknown-uefi")]
        target: String,

        /// Space separated list of features (parsers) to enable
        #[arg(short, long)]
        features: Option<Vec<String>>,

        /// Build with no default features (disables every parser not given in features)
        #[arg(long, default_value_t = false)]
        no_default_features: bool,
    },

    /// Build docs for bootentry-core crate
    Doc {
        /// Document private items in crate
        #[arg(short, long, default_value_t = false)]
        private: bool,

        /// Open in web browser after documenting
        #[arg(short, long, default_value_t = false)]
        open: bool,
    },

    /// Run bootentry-cli in VM with uefi-run
    Run {
        /// Path to the OVMF code file
        #[arg(long)]
        ovmf_code: Option<String>,

        /// Build with release profile
        #[arg(short, long, default_value_t = false)]
        release: bool,

        /// Add an additional file to the root of the image (such as an entry, or a kernel)
        #[arg(long)]
        add_file: Option<Vec<String>>,
    },

    /// Run unit tests and clippy on host
    Test,

    /// Fuzz one of the parsers
    Fuzz {
        #[command(subcommand)]
        command: Fuzz,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Build {
            release,
            target,
            features,
            no_default_features,
        } => build::build_cli(release, &target, features, no_default_features)?,
        Commands::Doc { private, open } => doc::doc_crate(private, open)?,
        Commands::Run {
            ovmf_code,
            release,
            add_file,
        } => run::run_cli(ovmf_code.as_deref(), release, add_file.as_deref())?,
        Commands::Test => test::test_on_host()?,
        Commands::Fuzz { command } => fuzz::fuzz_parsers(command)?,
    }
    Ok(())
}
