// SPDX-FileCopyrightText: 2026 Passkeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passkeep - a personal credential vault.
//!
//! Binary entry point: loads and validates configuration, then dispatches
//! to the selected subcommand.

use clap::{Parser, Subcommand};

mod serve;

/// Passkeep - a personal credential vault.
#[derive(Parser, Debug)]
#[command(name = "passkeep", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run migrations and start the vault server.
    Serve,
    /// Print a fresh base64 cipher/signing key pair for the config file.
    Keygen,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match passkeep_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            passkeep_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Keygen) => {
            if let Err(e) = run_keygen() {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("passkeep: use --help for available commands");
        }
    }
}

/// Print a fresh key pair in the format the `[keys]` config section expects.
fn run_keygen() -> Result<(), passkeep_core::PasskeepError> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let cipher_key = passkeep_vault::CipherEngine::generate_key()?;
    let signing_key = passkeep_vault::CipherEngine::generate_key()?;

    println!("[keys]");
    println!("cipher_key = \"{}\"", STANDARD.encode(cipher_key));
    println!("signing_key = \"{}\"", STANDARD.encode(signing_key));
    Ok(())
}
