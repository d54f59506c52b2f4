//! PDF Stamp CLI tool
//!
//! A command-line tool for stamping one PDF's first page onto another.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use pdf_stamp::pdf::{composite_files, count_pages, decode, page_size};

/// PDF Stamp - overlay a header PDF's first page onto another PDF
#[derive(Parser)]
#[command(name = "pdf-stamp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Stamp a letterhead onto a report at half size
    pdf-stamp stamp report.pdf letterhead.pdf --scale 0.5 -o merged.pdf

    # Stamp at natural size and open the result
    pdf-stamp stamp report.pdf letterhead.pdf --open

    # Check page dimensions before picking a scale
    pdf-stamp info letterhead.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overlay a header PDF's first page onto a target PDF's first page
    Stamp {
        /// Target PDF (receives the overlay on its first page)
        target: PathBuf,

        /// Header PDF (its first page is drawn onto the target)
        header: PathBuf,

        /// Uniform scale factor applied to the header page
        #[arg(short, long, default_value_t = 1.0)]
        scale: f32,

        /// Output PDF file path
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stamp { target, header, scale, output, open } => {
            cmd_stamp(target, header, scale, output, open)
        }
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Open a file with the system default application
fn open_file(path: &PathBuf) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Stamp the header onto the target and write the merged PDF
fn cmd_stamp(
    target: PathBuf,
    header: PathBuf,
    scale: f32,
    output: PathBuf,
    open: bool,
) -> Result<()> {
    for path in [&target, &header] {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }

    eprintln!("Processing PDFs...");

    composite_files(&target, &header, scale, &output)
        .with_context(|| format!("Failed to stamp {} onto {}", header.display(), target.display()))?;

    eprintln!("Merged to: {}", output.display());

    if open {
        open_file(&output)?;
    }

    Ok(())
}

/// Show page count and first-page dimensions of a PDF
fn cmd_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let bytes = std::fs::read(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let doc = decode(&bytes)?;

    let pages = count_pages(&doc)?;

    println!("File: {}", input.display());
    println!("Pages: {}", pages);

    if let Some(&first_page_id) = doc.get_pages().values().next() {
        let size = page_size(&doc, first_page_id)?;
        println!("First page: {} x {} pt", size.width, size.height);
    }

    Ok(())
}
