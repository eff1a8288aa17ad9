//! Larder CLI entrypoint.
//!
//! Reads receipt fragments from files or stdin and prints the matches as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;

use larder::config::Config;
use larder::receipt::split_fragments;
use larder::startup::build_processor;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Match grocery receipt lines to canonical food items.
///
/// Settings default to the `LARDER_*` environment variables; flags win.
#[derive(Debug, Parser)]
#[command(name = "larder", version, about)]
struct Cli {
    /// Input files (one fragment per line). Reads stdin when omitted.
    files: Vec<PathBuf>,

    /// Inputs are JSON arrays of strings instead of plain lines.
    #[arg(long)]
    json: bool,

    /// Inputs are raw receipt text; totals, tax and payment lines are dropped.
    #[arg(long, conflicts_with = "json")]
    receipt: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Ignore any configured model and rank by token overlap only.
    #[arg(long)]
    lexical_only: bool,

    /// Similarity cutoff in [0, 1].
    #[arg(long)]
    threshold: Option<f32>,

    /// Maximum number of suggestions per unmatched line.
    #[arg(long)]
    top_k: Option<usize>,

    /// Embedding model directory (config.json, tokenizer.json, model.safetensors).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Catalog JSON file.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(model) = &self.model {
            config.model_path = Some(model.clone());
        }
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if self.lexical_only {
            config.model_path = None;
        }
    }

    fn read_inputs(&self) -> anyhow::Result<Vec<(String, String)>> {
        if self.files.is_empty() {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            return Ok(vec![("<stdin>".to_string(), content)]);
        }

        self.files
            .iter()
            .map(|path| {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok((path.display().to_string(), content))
            })
            .collect()
    }

    fn fragments(&self) -> anyhow::Result<Vec<String>> {
        let mut fragments = Vec::new();
        for (source, content) in self.read_inputs()? {
            if self.json {
                let parsed: Vec<String> = serde_json::from_str(&content)
                    .with_context(|| format!("{source}: expected a JSON array of strings"))?;
                fragments.extend(parsed);
            } else if self.receipt {
                fragments.extend(split_fragments(&content));
            } else {
                fragments.extend(content.lines().map(str::to_string));
            }
        }
        Ok(fragments)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    tracing::info!(
        threshold = config.threshold,
        top_k = config.top_k,
        model = ?config.model_path,
        catalog = ?config.catalog_path,
        "Larder starting"
    );

    let processor = build_processor(&config)?;
    let fragments = cli.fragments()?;
    let response = processor.process(&fragments);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(())
}
