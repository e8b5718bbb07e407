//! Check command - parse templates and report errors

use super::parser_for;
use crate::cli::CheckArgs;
use crate::config::Config;
use anyhow::{Result, bail};
use colored::Colorize;
use std::path::Path;

/// Parse every template, reporting each one
///
/// Fails when at least one template does not parse.
pub fn run(args: CheckArgs, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let mut failed = 0;

    for template in &args.templates {
        if verbose {
            eprintln!("{} Checking {}", "→".cyan(), template.display());
        }
        let parser = parser_for(template, &args.lookup, &config)?;
        match parser.parse_file(template) {
            Ok(_) => println!(
                "{} {} is a valid template",
                "✓".green().bold(),
                template.display()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red().bold(), template.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} template(s) failed to parse", failed, args.templates.len());
    }
    Ok(())
}
