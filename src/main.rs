use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use sonic_dna::{
    CachedGenerator, ExtractOptions, PatternGenerator, SonicConfig, SonicDna, TemplateGenerator,
    extract_dna_with_config,
};
use tracing_subscriber::EnvFilter;

/// Derive a Sonic DNA fingerprint from a live-coding pattern.
#[derive(Debug, Parser)]
#[command(name = "sonic-dna", version, about)]
struct Cli {
    /// Pattern source. Read from stdin when omitted and no --prompt is given.
    pattern: Option<String>,

    /// Generate the pattern from a text prompt instead.
    #[arg(long, conflicts_with = "pattern")]
    prompt: Option<String>,

    /// Reuse this salt, e.g. to reproduce a registered hash.
    #[arg(long)]
    salt: Option<String>,

    /// Stamp the record with the current time.
    #[arg(long)]
    timestamp: bool,

    /// Use the non-cryptographic demo digest.
    #[arg(long)]
    demo: bool,

    /// YAML configuration file.
    #[arg(long, value_name = "YAML")]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output {
    /// Generated source, present only with --prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(flatten)]
    record: SonicDna,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SonicConfig::from_file(path)?,
        None => SonicConfig::default(),
    };
    init_tracing(&config);

    let (source, generated) = match &cli.prompt {
        Some(prompt) => {
            let generator =
                CachedGenerator::new(TemplateGenerator, Arc::new(config.prompt_cache()));
            let code = generator.generate(prompt)?.code;
            (code.clone(), Some(code))
        }
        None => match cli.pattern {
            Some(pattern) => (pattern, None),
            None => (io::read_to_string(io::stdin())?, None),
        },
    };

    let mut opts = ExtractOptions::default();
    if let Some(salt) = cli.salt {
        opts = opts.with_salt(salt);
    }
    if cli.timestamp {
        opts = opts.with_timestamp();
    }
    if cli.demo {
        opts = opts.demo();
    }

    let record = extract_dna_with_config(&source, &config.dna, &opts)?;
    let output = Output {
        pattern: generated,
        record,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(config: &SonicConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_ascii_lowercase()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
