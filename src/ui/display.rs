//! Styled terminal output: banner, messages, and file tables.

use std::path::Path;

use anyhow::Result;
use bytesize::ByteSize;
use console::{Term, style};
use figlet_rs::FIGfont;

use crate::config::APP_NAME;

/// Prints the application banner.
pub fn print_banner() {
    match FIGfont::standard() {
        Ok(font) => {
            if let Some(figure) = font.convert(APP_NAME) {
                println!("{}", style(figure).green().bold());
                return;
            }
            println!("{}", style(APP_NAME).green().bold());
        }
        Err(_) => println!("{}", style(APP_NAME).green().bold()),
    }
}

/// Clears the terminal screen.
pub fn clear_screen() -> Result<()> {
    let term = Term::stdout();
    term.clear_screen().map_err(|e| anyhow::anyhow!("failed to clear screen: {e}"))
}

/// Displays the discovered candidate files with their sizes.
pub fn show_file_table(files: &[std::path::PathBuf]) {
    if files.is_empty() {
        return;
    }

    println!();
    println!("{} {}", style("✓").green(), style(format!("Found {} candidate file(s):", files.len())).bold());
    println!();
    println!("  {:>4}  {:40}  {:>10}", style("No").bold(), style("Path").bold(), style("Size").bold());
    println!("  {}", "-".repeat(60));

    for (i, file) in files.iter().enumerate() {
        let size = std::fs::metadata(file).map(|m| m.len()).unwrap_or(0);
        let shown = truncate_left(&file.display().to_string(), 40);
        println!("  {:>4}  {:40}  {:>10}", style(i + 1).bold(), style(shown).green(), ByteSize(size));
    }

    println!();
}

/// Keeps the tail of an over-long path, cutting on a char boundary so
/// multi-byte path components can never split mid-character.
fn truncate_left(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }

    let skip = count - (max_chars - 3);
    let start = text.char_indices().nth(skip).map_or(0, |(index, _)| index);
    format!("...{}", &text[start..])
}

/// Announces a successful operation and where the artifact landed.
pub fn show_success(action: &str, output: &Path) {
    println!();
    println!(
        "{} {}",
        style("✓").green(),
        style(format!("{action} completed: {}", output.display())).bold()
    );
}

/// Shows a failed operation with the tool's diagnostics, verbatim.
pub fn show_failure(action: &str, diagnostics: &str) {
    eprintln!();
    eprintln!("{} {}", style("✗").red(), style(format!("{action} failed")).bold());
    if !diagnostics.trim().is_empty() {
        eprintln!("{}", style(diagnostics.trim_end()).red());
    }
}

/// Reports a recoverable per-operation error (validation, credentials).
pub fn show_error(error: &anyhow::Error) {
    eprintln!("{} {}", style("✗").red(), style(error).red().bold());
}

/// Confirms deletion of the source file.
pub fn show_source_deleted(path: &Path) {
    println!("{} {}", style("✓").green(), style(format!("Source file deleted: {}", path.display())).bold());
}

/// Points the user at the operation log once, at startup.
pub fn show_log_location(path: &Path) {
    println!("{}", style(format!("Operation log: {}", path.display())).dim());
}
