use anyhow::Result;
use clap::{Parser, Subcommand};
use irpulse_cli::commands;
use irpulse_cli::settings::{Settings, DEFAULT_STORE_PATH};
use irpulse_cli::Backend;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "irpulse")]
#[command(about = "irpulse - Record, store and send infrared remote codes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Code store file
    #[arg(short, long, global = true, default_value = DEFAULT_STORE_PATH)]
    codes: PathBuf,

    /// GPIO line for sending and receiving (defaults: send 13, receive 4)
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u8).range(0..=27))]
    gpio: Option<u8>,

    /// Replay a JSON edge capture instead of using hardware
    #[arg(long, global = true)]
    replay: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Receive a code and store it under each name
    Rec {
        /// Code names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Send stored codes
    Send {
        /// Seconds to wait between codes
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(0..=1000))]
        wait: u64,

        /// Code names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List stored codes
    List,

    /// Delete stored codes
    Del {
        /// Code names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Decode a stored code and write it to a JSON file
    Dec {
        /// Output JSON file
        #[arg(short, long)]
        file: String,

        /// Code name
        name: String,
    },

    /// Encode a JSON file and store the result
    Enc {
        /// Input JSON file
        #[arg(short, long)]
        file: String,

        /// Code name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let settings = Settings::new(cli.codes)
        .with_gpio(cli.gpio)
        .with_replay(cli.replay);

    // Execute command
    match cli.command {
        Commands::Rec { names } => {
            let mut backend = Backend::from_settings(&settings)?;
            commands::rec::execute(&settings, backend.source.as_mut(), &names).map(drop)
        }

        Commands::Send { wait, names } => {
            let settings = settings.with_wait(Duration::from_secs(wait));
            let mut backend = Backend::from_settings(&settings)?;
            commands::send::execute(&settings, backend.sink.as_mut(), &names).map(drop)
        }

        Commands::List => commands::list::execute(&settings),

        Commands::Del { names } => commands::del::execute(&settings, &names).map(drop),

        Commands::Dec { file, name } => commands::dec::execute(&settings, &file, &name),

        Commands::Enc { file, name } => commands::enc::execute(&settings, &file, &name),
    }
}
