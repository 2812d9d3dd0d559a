use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vigenere::analysis::{self, AnalysisConfig};
use vigenere::cipher::{self, Key};
use vigenere::cli::{Cli, Command, OutputFormat};
use vigenere::json_output::JsonAnalysisReport;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read input as raw bytes; only ASCII letters matter, so any encoding works
fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn parse_key(key: &str) -> Result<Key> {
    Key::new(key.trim()).context("Invalid key")
}

/// Build the analysis configuration: defaults, then config file, then flags
fn load_config(
    config_path: Option<&Path>,
    max_key_length: Option<usize>,
    policy: Option<analysis::AcceptancePolicy>,
) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(max_key_length) = max_key_length {
        config.max_key_length = max_key_length;
    }
    if let Some(policy) = policy {
        config.policy = policy;
    }

    config.validate()?;
    Ok(config)
}

fn run_analysis(
    input: &Path,
    config_path: Option<&Path>,
    max_key_length: Option<usize>,
    policy: Option<analysis::AcceptancePolicy>,
    format: OutputFormat,
    show_trials: bool,
    decrypt_to: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path, max_key_length, policy)?;
    let ciphertext = read_input(input)?;
    let report = analysis::analyze_bytes(&ciphertext, &config)?;

    match format {
        OutputFormat::Text => print!("{}", report.to_report_string(show_trials)),
        OutputFormat::Json => {
            let json = JsonAnalysisReport::from(&report)
                .to_json_string()
                .context("Failed to serialize analysis report")?;
            println!("{}", json);
        }
    }

    if let Some(path) = decrypt_to {
        match report.decrypt_bytes(&ciphertext)? {
            Some(plaintext) => {
                write_output(path, &plaintext)?;
                eprintln!("Decrypted text written to {}", path.display());
            }
            None => eprintln!("No key recovered; {} not written", path.display()),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    match args.command {
        Command::Encrypt { key, input, output } => {
            let key = parse_key(&key)?;
            let plaintext = read_input(&input)?;
            write_output(&output, &cipher::encrypt_bytes(&plaintext, &key))?;
            println!("Encryption completed. Output written to {}", output.display());
        }
        Command::Decrypt { key, input, output } => {
            let key = parse_key(&key)?;
            let ciphertext = read_input(&input)?;
            write_output(&output, &cipher::decrypt_bytes(&ciphertext, &key))?;
            println!("Decryption completed. Output written to {}", output.display());
        }
        Command::Analyze {
            input,
            config,
            max_key_length,
            policy,
            format,
            show_trials,
            decrypt_to,
        } => {
            run_analysis(
                &input,
                config.as_deref(),
                max_key_length,
                policy,
                format,
                show_trials,
                decrypt_to.as_deref(),
            )?;
        }
    }

    Ok(())
}
