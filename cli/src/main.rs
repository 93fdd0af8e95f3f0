//! pagewise CLI - resilient PDF text extraction tool

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagewise::batch::default_output_path;
use pagewise::detect::has_pdf_extension;
use pagewise::{
    detect_format_from_path, render, BatchProcessor, ExtractOptions, Extractor, JsonFormat,
    LopdfDecoder,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pagewise")]
#[command(version)]
#[command(about = "Extract PDF text page by page, surviving unreadable pages", long_about = None)]
struct Cli {
    /// Input PDF file (prompted for when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Where to save the extracted text
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Save to the default location without asking
    #[arg(short, long)]
    yes: bool,

    /// Keep page text exactly as decoded (no trimming)
    #[arg(long)]
    raw: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and print a PDF's text, then optionally save it
    Extract {
        /// Input PDF file (prompted for when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Where to save the extracted text
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save to the default location without asking
        #[arg(short, long)]
        yes: bool,

        /// Keep page text exactly as decoded (no trimming)
        #[arg(long)]
        raw: bool,
    },

    /// Extract several PDFs, one after another
    Batch {
        /// Input PDF files (prompted for when omitted)
        #[arg(value_name = "FILES")]
        inputs: Vec<PathBuf>,

        /// Do not write <name>_extracted.txt files
        #[arg(long)]
        no_save: bool,
    },

    /// Write the extraction result as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            yes,
            raw,
        }) => cmd_extract(input, output.as_deref(), yes, raw),
        Some(Commands::Batch { inputs, no_save }) => cmd_batch(inputs, !no_save),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_extract(cli.input, cli.output.as_deref(), cli.yes, cli.raw),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(input: Option<PathBuf>, output: Option<&Path>, yes: bool, raw: bool) -> CliResult {
    let input = match input {
        Some(path) => path,
        None => {
            println!("{}", "pagewise - PDF Text Extractor".cyan().bold());
            println!("{}", "=".repeat(render::RULE_WIDTH).dimmed());
            PathBuf::from(prompt("Enter the path to your PDF file: ")?)
        }
    };

    if !has_pdf_extension(&input) {
        return Err(format!("File must be a PDF - {}", input.display()).into());
    }

    let options = if raw {
        ExtractOptions::new().raw()
    } else {
        ExtractOptions::new()
    };

    let mut extractor = Extractor::open_with_options(&input, options)?;
    println!("\n{} {}", "Processing:".cyan(), extractor.name());
    println!("Please wait...\n");

    let result = extractor.extract_all()?;

    println!(
        "{} {} of {} pages contain text",
        "Extracted:".green().bold(),
        result.pages_with_text(),
        result.page_count()
    );
    if result.failed_count() > 0 {
        println!(
            "{} {} page(s) could not be decoded: {:?}",
            "Warning:".yellow().bold(),
            result.failed_count(),
            result.failed_pages()
        );
    }
    println!();
    print!("{}", render::report(result));

    let destination = match output {
        Some(path) => Some(path.to_path_buf()),
        None if yes => Some(default_output_path(&input)),
        None => ask_destination(&input)?,
    };

    if let Some(path) = destination {
        log::debug!("exporting {} to {}", extractor.name(), path.display());
        extractor.export(&path)?;
        println!("{} {}", "Text saved to:".green(), path.display());
    }

    Ok(())
}

/// Ask whether to save and where; `None` when the user declines.
fn ask_destination(input: &Path) -> io::Result<Option<PathBuf>> {
    let answer = prompt("\nWould you like to save the extracted text to a file? (y/n): ")?;
    if !is_yes(&answer) {
        return Ok(None);
    }

    let default = default_output_path(input);
    let chosen = prompt(&format!("Save to [{}]: ", default.display()))?;
    if chosen.is_empty() {
        Ok(Some(default))
    } else {
        Ok(Some(PathBuf::from(chosen)))
    }
}

fn cmd_batch(inputs: Vec<PathBuf>, save: bool) -> CliResult {
    let paths = if inputs.is_empty() {
        collect_paths_interactively()?
    } else {
        inputs
    };

    if paths.is_empty() {
        return Err("No valid PDF files provided".into());
    }

    println!(
        "\n{} {} PDF(s)",
        "Processing".cyan().bold(),
        paths.len()
    );

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    log::debug!("batch of {} file(s), save_individual={}", paths.len(), save);
    let summary = BatchProcessor::new(paths)
        .with_save_individual(save)
        .run_with::<LopdfDecoder, _>(|_, entry| {
            pb.set_message(entry.file_name.clone());
            pb.inc(1);
        });
    pb.finish_with_message("Done!");

    println!("\n{}", summary.render());

    if summary.successful() == 0 {
        return Err("No documents could be extracted".into());
    }
    Ok(())
}

fn collect_paths_interactively() -> io::Result<Vec<PathBuf>> {
    println!("Enter PDF file paths (one per line).");
    println!("Press Enter on an empty line, or type 'done', to finish:\n");

    let mut paths = Vec::new();
    loop {
        let line = prompt(&format!("PDF #{}: ", paths.len() + 1))?;
        if line.is_empty() || line.eq_ignore_ascii_case("done") {
            break;
        }

        let path = PathBuf::from(&line);
        if path.exists() && has_pdf_extension(&path) {
            println!("  {} {}", "Added:".green(), line);
            paths.push(path);
        } else {
            println!("  {} invalid path or not a PDF file", "Skipped:".yellow());
        }
    }
    Ok(paths)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pagewise::to_json(input, format)?;

    if let Some(path) = output {
        std::fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let mut extractor = Extractor::open(input)?;
    let format = detect_format_from_path(input)?;
    let result = extractor.extract_all()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Pages".bold(), result.page_count());
    println!("{}: {}", "Pages with text".bold(), result.pages_with_text());

    let failed = result.failed_pages();
    if failed.is_empty() {
        println!("{}: none", "Failed pages".bold());
    } else {
        println!("{}: {:?}", "Failed pages".bold(), failed);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Words".bold(), result.word_count());
    println!("{}: {}", "Characters".bold(), result.char_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagewise".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resilient PDF text extraction tool");
    println!();
    println!("License: MIT");
}

/// Print `message` and read one line from stdin.
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(clean_input(&line))
}

/// Trim whitespace and the quotes terminals add around dragged-in paths.
fn clean_input(line: &str) -> String {
    line.trim().trim_matches('"').trim().to_string()
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("  \"C:\\docs\\memo.pdf\"\n"), "C:\\docs\\memo.pdf");
        assert_eq!(clean_input("report.pdf\r\n"), "report.pdf");
        assert_eq!(clean_input("\n"), "");
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_cli_positional_args() {
        let cli = Cli::try_parse_from(["pagewise", "memo.pdf", "memo.txt", "--yes"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("memo.pdf")));
        assert_eq!(cli.output, Some(PathBuf::from("memo.txt")));
        assert!(cli.yes);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_batch_subcommand() {
        let cli = Cli::try_parse_from(["pagewise", "batch", "a.pdf", "b.pdf", "--no-save"]).unwrap();
        match cli.command {
            Some(Commands::Batch { inputs, no_save }) => {
                assert_eq!(inputs.len(), 2);
                assert!(no_save);
            }
            _ => panic!("expected batch subcommand"),
        }
    }

    #[test]
    fn test_extract_rejects_non_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();

        let err = cmd_extract(Some(path), None, true, false).unwrap_err();
        assert!(err.to_string().contains("File must be a PDF"));
    }
}
