use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use rayon::prelude::*;
use spellfix::cli::output::{self, OutputFormat};
use spellfix::{rule, AutoCorrect, CheckResult, Config, RegionKind};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "spellfix")]
#[command(version, about = "Auto-correct common misspellings in markdown prose", long_about = rule::DESCRIPTION)]
struct Cli {
    /// Files or directories to check (`-` reads stdin)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Rewrite files in place (stdin is written corrected to stdout)
    #[arg(short, long)]
    fix: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if misspellings are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Comma separated list of lowercase words to never correct
    #[arg(long, value_name = "WORDS")]
    ignore_words: Option<String>,

    /// Extra `misspelling->correction` file (repeatable)
    #[arg(long = "dictionary", value_name = "FILE")]
    dictionaries: Vec<PathBuf>,

    /// Region kind to leave untouched; replaces the configured list (repeatable)
    #[arg(long, value_name = "KIND")]
    protect: Vec<RegionKind>,

    /// Log debug details to stderr (or set SPELLFIX_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the dictionary correction for words
    Lookup {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// List protected region kinds in detection order
    Regions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellfix", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(
        cli.ignore_words.clone(),
        cli.dictionaries.clone(),
        cli.protect.clone(),
    )?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let dictionary = config.dictionary()?;
    let rule = AutoCorrect::new(&dictionary)
        .with_ignore(config.ignore_set())
        .with_regions(config.protect.clone());
    let colored = !cli.no_color && cli.format == OutputFormat::Text;

    let inputs = collect_inputs(&cli.files, &config);
    let results: Vec<(PathBuf, Result<CheckResult>)> = inputs
        .par_iter()
        .map(|path| (path.clone(), process_input(&rule, path, cli.fix)))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(result) => reports.push((output::display_name(&path), result)),
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    let total: usize = reports.iter().map(|(_, r)| r.misspellings.len()).sum();
    let stdout_holds_document = cli.fix && cli.files.iter().any(|p| p == Path::new("-"));

    match cli.format {
        OutputFormat::Json if !stdout_holds_document => {
            println!("{}", output::render_json(&reports)?);
        }
        OutputFormat::Text if !stdout_holds_document => {
            for (name, result) in &reports {
                output::print_misspellings(name, result, colored);
            }
            if cli.fix {
                let files_fixed = reports.iter().filter(|(_, r)| r.fixed).count();
                output::print_fix_summary(total, files_fixed, colored);
            } else {
                output::print_check_summary(total, reports.len(), colored);
            }
        }
        _ => {}
    }

    if total > 0 && !cli.no_fail && !cli.fix {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SPELLFIX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Expand directories into the markdown files below them.
fn collect_inputs(paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let files = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("skipping unreadable entry: {}", e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file() && config.matches_extension(entry.path()))
                .map(|entry| entry.into_path());
            inputs.extend(files);
        } else {
            inputs.push(path.clone());
        }
    }

    inputs
}

fn process_input(rule: &AutoCorrect<'_>, path: &Path, fix: bool) -> Result<CheckResult> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;

        let (corrected, misspellings) = rule.apply_with_report(&content)?;
        if fix {
            io::stdout()
                .write_all(corrected.as_bytes())
                .context("Failed to write stdout")?;
        }
        return Ok(CheckResult {
            misspellings,
            fixed: fix && corrected != content,
        });
    }

    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let (corrected, misspellings) = rule
        .apply_with_report(&content)
        .with_context(|| format!("Failed to correct {}", path.display()))?;

    let fixed = fix && corrected != content;
    if fixed {
        fs::write(path, corrected)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    Ok(CheckResult { misspellings, fixed })
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Lookup { words } => {
            let dictionary = config.dictionary()?;
            for word in words {
                let lowercased = word.to_lowercase();
                match dictionary.get(&lowercased) {
                    Some(correction) => println!("{} → {}", word, correction),
                    None => {
                        let similar = dictionary.misspellings_with_prefix(&lowercased);
                        if similar.is_empty() {
                            println!("{}: not a known misspelling", word);
                        } else {
                            println!("{}: not a known misspelling (did you mean {})", word, similar.join(", "));
                        }
                    }
                }
            }
        }
        Commands::Regions => {
            println!("{}", rule::NAME);
            for kind in &config.protect {
                println!("  {}", kind);
            }
        }
    }
    Ok(())
}
