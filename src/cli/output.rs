use crate::CheckResult;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMisspelling {
    file: String,
    line: usize,
    column: usize,
    word: String,
    correction: String,
    context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_misspellings: usize,
    files_fixed: usize,
    misspellings: Vec<JsonMisspelling>,
}

/// Print per-file findings as colored/plain text.
pub fn print_misspellings(file_name: &str, result: &CheckResult, colored_output: bool) {
    if result.misspellings.is_empty() {
        return;
    }

    let status = if result.fixed { " (fixed)" } else { "" };
    if colored_output {
        println!("\n{}{}", file_name.bold().underline(), status.green());
    } else {
        println!("\n{}{}", file_name, status);
    }

    for m in &result.misspellings {
        let line_info = format!("{}:{}", m.line, m.column);

        if colored_output {
            println!(
                "  {} {} {} {}",
                line_info.blue().bold(),
                m.word.red().bold(),
                "→".dimmed(),
                m.correction.green()
            );
            println!("    {}", format_context(&m.context, &m.word, colored_output));
        } else {
            println!("  {} {} → {}", line_info, m.word, m.correction);
            println!("    {}", m.context);
        }
    }
}

/// Render every file's findings as one JSON document.
pub fn render_json(results: &[(String, CheckResult)]) -> serde_json::Result<String> {
    let misspellings: Vec<JsonMisspelling> = results
        .iter()
        .flat_map(|(file, result)| {
            result.misspellings.iter().map(move |m| JsonMisspelling {
                file: file.clone(),
                line: m.line,
                column: m.column,
                word: m.word.clone(),
                correction: m.correction.clone(),
                context: m.context.clone(),
            })
        })
        .collect();

    let output = JsonOutput {
        files_checked: results.len(),
        total_misspellings: misspellings.len(),
        files_fixed: results.iter().filter(|(_, result)| result.fixed).count(),
        misspellings,
    };

    serde_json::to_string_pretty(&output)
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn print_check_summary(total: usize, files: usize, colored: bool) {
    println!();
    if total == 0 {
        if colored {
            println!("{}", "✓ No misspellings found!".green().bold());
        } else {
            println!("✓ No misspellings found!");
        }
    } else {
        let noun = plural(total, "misspelling", "misspellings");
        let file_word = plural(files, "file", "files");
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total.to_string().red().bold(),
                noun,
                files,
                file_word
            );
        } else {
            println!("✗ {} {} found in {} {}", total, noun, files, file_word);
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, files: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = plural(total_fixed, "correction", "corrections");
        let file_word = plural(files, "file", "files");
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files,
                file_word
            );
        } else {
            println!("✓ {} {} applied to {} {}", total_fixed, fix_word, files, file_word);
        }
    }
}

/// Display name used for a path in reports.
pub fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
