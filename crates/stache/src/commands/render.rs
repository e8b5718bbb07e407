//! Render command - render one template to stdout

use super::parser_for;
use crate::cli::RenderArgs;
use crate::config::Config;
use anyhow::{Context as _, Result};
use colored::Colorize;
use stache_core::{Value, WriteSink};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Render a template against an optional data file
///
/// # Arguments
///
/// * `args` - Template, data file and partial lookup flags
/// * `config_path` - Explicit config file, if any
/// * `verbose` - Print progress to stderr if true
pub fn run(args: RenderArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let parser = parser_for(&args.template, &args.lookup, &config)?;

    if verbose {
        eprintln!("{} Parsing {}", "→".cyan(), args.template.display());
    }
    let template = parser
        .parse_file(&args.template)
        .with_context(|| format!("Failed to parse {}", args.template.display()))?;

    let data = match &args.data {
        Some(path) => {
            if verbose {
                eprintln!("{} Loading data from {}", "→".cyan(), path.display());
            }
            load_data(path)?
        }
        None => Value::Null,
    };

    let stream = args.stream || config.render.stream;
    if stream {
        let mut sink = WriteSink::new(BufWriter::new(io::stdout()));
        futures::executor::block_on(template.output_to(&mut sink, &data))
            .context("Failed to write output")?;
    } else {
        let output = template.render(&data);
        let mut out = io::stdout().lock();
        out.write_all(output.as_bytes())
            .and_then(|()| out.flush())
            .context("Failed to write output")?;
    }

    if verbose {
        eprintln!("{} Rendered {}", "✓".green().bold(), args.template.display());
    }
    Ok(())
}

/// Load a data file as JSON (`.json`) or TOML (anything else)
pub(crate) fn load_data(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        Ok(Value::from(json))
    } else {
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        Ok(Value::from(toml::Value::Table(table)))
    }
}
