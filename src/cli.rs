//! CLI argument parsing for the vigenere tool

use crate::analysis::AcceptancePolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "vigenere")]
#[command(version)]
#[command(about = "Vigenere cipher encryption, decryption and cryptanalysis", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt a plaintext file with a key
    Encrypt {
        /// Key (letters A-Z, case-insensitive)
        #[arg(short, long)]
        key: String,

        /// Plaintext input file
        #[arg(short, long, default_value = "plaintext.txt")]
        input: PathBuf,

        /// Ciphertext output file
        #[arg(short, long, default_value = "ciphertext.txt")]
        output: PathBuf,
    },

    /// Decrypt a ciphertext file with a key
    Decrypt {
        /// Key (letters A-Z, case-insensitive)
        #[arg(short, long)]
        key: String,

        /// Ciphertext input file
        #[arg(short, long, default_value = "ciphertext.txt")]
        input: PathBuf,

        /// Plaintext output file
        #[arg(short, long, default_value = "decrypted.txt")]
        output: PathBuf,
    },

    /// Estimate the key length of a ciphertext and recover the key
    Analyze {
        /// Ciphertext input file
        #[arg(short, long, default_value = "ciphertext.txt")]
        input: PathBuf,

        /// TOML analysis configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Largest key length to try (overrides the config file)
        #[arg(long, value_name = "N")]
        max_key_length: Option<usize>,

        /// Key length acceptance policy (overrides the config file)
        #[arg(long, value_enum)]
        policy: Option<AcceptancePolicy>,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print the average IC of every key length tried
        #[arg(long)]
        show_trials: bool,

        /// Write the ciphertext decrypted with the recovered key to this file
        #[arg(long, value_name = "FILE")]
        decrypt_to: Option<PathBuf>,
    },
}
