use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use unmark_core::{Document, ExtractConfig, extract, read_file, read_stdin};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract plain text from HTML, optionally narrowed by CSS selectors
#[derive(Parser, Debug)]
#[command(name = "unmark")]
#[command(version)]
#[command(about = "Extract plain text from HTML by CSS selector", long_about = None)]
struct Args {
    /// CSS selectors to extract, in order (default: the whole document)
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Remove elements matching this selector before extracting (repeatable)
    #[arg(short, long, value_name = "SELECTOR")]
    remove: Vec<String>,

    /// Input HTML file, or "-" for stdin (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Collapse whitespace and drop blank lines
    #[arg(short, long)]
    minify: bool,

    /// Keep this tag's markup in the output; accepts bundle names (repeatable)
    #[arg(short, long = "keep", value_name = "TAG")]
    keep: Vec<String>,

    /// Keep every attribute on kept tags
    #[arg(short, long)]
    all_attributes: bool,

    /// Only output the first matching element
    #[arg(short = '1', long)]
    first: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List tag bundles usable with --keep and exit
    #[arg(long)]
    list_bundles: bool,

    /// Print progress and debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig::builder()
            .targets(self.selectors.iter().cloned())
            .removals(self.remove.iter().cloned())
            .minify(self.minify)
            .remove_blank_lines(self.minify)
            .keep_tags(self.keep.iter().cloned())
            .keep_all_attributes(self.all_attributes)
            .first_only(self.first)
            .build()
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,unmark=debug,unmark_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.list_bundles {
        echo::print_bundles();
        return Ok(());
    }

    init_tracing(args.verbose);
    let started = Instant::now();

    if args.verbose {
        echo::print_banner();
    }

    let html = match args.input.as_deref() {
        None | Some("-") => {
            if args.verbose {
                echo::print_step(1, 3, "Reading from stdin");
            }
            read_stdin().context("Failed to read from stdin")?
        }
        Some(path) => {
            if args.verbose {
                echo::print_step(1, 3, &format!("Reading from file {}", path.bright_white()));
            }
            read_file(path).with_context(|| format!("Failed to read file: {}", path))?
        }
    };

    tracing::debug!(bytes = html.len(), "read input");

    if args.verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
        echo::print_step(2, 3, "Extracting text");
    }

    let config = args.extract_config();
    let mut doc = Document::parse(&html).context("Failed to parse HTML")?;
    let text = extract(&mut doc, &config).context("Failed to extract text")?;

    if args.verbose {
        echo::print_detail("Selectors", &config.targets.join(", "));
        if !config.keep_tags.is_empty() {
            echo::print_detail("Keep", &config.keep_tags.join(", "));
        }
        if text.is_empty() {
            echo::print_warning("No text extracted");
        }
        echo::print_step(3, 3, "Writing output");
        echo::print_timing("Elapsed", started.elapsed());
    }

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", text))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            if args.verbose {
                echo::print_success(&format!("Output written to {}", path.display().bright_white()));
            }
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_implies_blank_line_removal() {
        let args = Args::parse_from(["unmark", "-m", "p"]);
        let config = args.extract_config();
        assert!(config.minify);
        assert!(config.remove_blank_lines);
        assert_eq!(config.targets, vec!["p".to_string()]);
    }

    #[test]
    fn test_default_target_without_selectors() {
        let args = Args::parse_from(["unmark"]);
        assert_eq!(args.extract_config().targets, vec!["html".to_string()]);
    }

    #[test]
    fn test_repeatable_options() {
        let args = Args::parse_from(["unmark", "-r", ".ad", "--remove", "nav", "-k", "headings", "-k", "a", "-1", "-a"]);
        let config = args.extract_config();
        assert_eq!(config.removals, vec![".ad".to_string(), "nav".to_string()]);
        assert_eq!(config.keep_tags, vec!["headings".to_string(), "a".to_string()]);
        assert!(config.first_only);
        assert!(config.keep_all_attributes);
    }
}
