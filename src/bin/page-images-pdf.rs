//! Page Images PDF CLI tool
//!
//! Collects the images of a webpage, lets you pick some, and saves them as one PDF.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use page_images_pdf::collect::{FetchOptions, HttpFetcher};
use page_images_pdf::logging::init_logger;
use page_images_pdf::pdf::inspect_pdf;
use page_images_pdf::prompt::{prepare_session, Request, StdinPrompter};
use page_images_pdf::shell::{self, ShellOptions, ShellOutcome};

/// Page Images PDF - Save the images of a webpage as one PDF
#[derive(Parser)]
#[command(name = "page-images-pdf")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "EXAMPLES:
    # Ask for everything interactively
    page-images-pdf

    # Pick images from an article, default extensions, title as file name
    page-images-pdf https://www.example.com/article.html

    # Only PNG and JPEG, custom name, skip the window and keep every image
    page-images-pdf https://www.example.com/article.html -e png jpg -o notes --all

    # Show what a produced PDF contains
    page-images-pdf info notes.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct RunArgs {
    /// Page to collect images from; prompted for when omitted
    url: Option<String>,

    /// Accepted image extensions (default: webp jpg png jpeg)
    #[arg(short, long, num_args = 1..)]
    extensions: Vec<String>,

    /// Output PDF name; ".pdf" is appended when missing (default: page title)
    #[arg(short, long)]
    output: Option<String>,

    /// Save every image without showing the selection window
    #[arg(long)]
    all: bool,

    /// Open the output file after creation
    #[arg(long)]
    open: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(input),
        None => cmd_collect(cli.run),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Collect, select and save
///
/// Prompts are only shown when no URL was given on the command line; with a
/// URL, missing options take their defaults.
fn cmd_collect(args: RunArgs) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&FetchOptions {
        user_agent: args.user_agent,
        timeout: args.timeout.map(Duration::from_secs),
    })?;

    let request = Request {
        url: args.url,
        extensions: args.extensions,
        output: args.output,
        show_progress: true,
    };
    let Some(session) = prepare_session(&mut StdinPrompter, &fetcher, request)? else {
        eprintln!("Cancelled.");
        return Ok(());
    };

    let selection = if args.all {
        session.select_all()
    } else {
        match shell::run(&session, &ShellOptions::default())? {
            ShellOutcome::Save(selection) => selection,
            ShellOutcome::Cancelled => {
                eprintln!("Window closed, nothing saved.");
                return Ok(());
            }
        }
    };

    let report = session.save(&selection).context("Failed to save PDF")?;
    println!(
        "PDF created: {} ({} pages)",
        report.path.display(),
        report.page_count
    );

    if args.open {
        open_file(&report.path)?;
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let metadata = inspect_pdf(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    for (number, (width, height)) in metadata.page_sizes.iter().enumerate() {
        println!("  Page {}: {} x {} pt", number + 1, width, height);
    }

    Ok(())
}
