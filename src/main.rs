//! # lpprint CLI
//!
//! Command-line interface for dithered raster printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print the calibration gradient
//! lpprint gradient
//!
//! # Print a photo scaled to the paper width
//! lpprint image cat.jpg
//!
//! # Print a tweet card (date defaults to today)
//! lpprint card avatar.png ferris "Hello from the printer" "Jan 5, 2025"
//!
//! # Save a preview instead of printing
//! lpprint --png preview.png image cat.jpg
//!
//! # Another printer node and a wider head
//! lpprint --device /dev/usb/lp1 --width 576 gradient
//! ```
//!
//! Set `RUST_LOG=lpprint=debug` to trace each write phase.
//!
//! Ctrl-C while the printer is being written to cancels at the next phase
//! boundary; a second Ctrl-C (or one at any other time) exits with 130.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lpprint::{
    PrintError, PrinterConfig,
    compose::{Card, CardFaces, load_image},
    preview,
    printer::{PrintSummary, Printer},
    transport::{EXIT_INTERRUPTED, Interrupt, SignalAction},
};

/// lpprint - Thermal line printer utility
#[derive(Parser, Debug)]
#[command(name = "lpprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer device path [default: /dev/usb/lp0]
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    /// Print width in dots [default: 384]
    #[arg(long, global = true)]
    width: Option<usize>,

    /// TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// TTF font for card text (built-in bitmap font otherwise)
    #[arg(long, global = true, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Output to PNG file instead of printing
    #[arg(long, global = true, value_name = "FILE")]
    png: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a light-to-dark calibration gradient
    Gradient {
        /// Height in rows
        #[arg(long, default_value = "200")]
        height: usize,
    },

    /// Print an image file scaled to the paper width
    Image {
        /// Image file (PNG, JPEG, GIF, BMP, ...)
        path: PathBuf,
    },

    /// Print a tweet card
    Card {
        /// Profile picture
        profile: PathBuf,
        /// Username, printed as @username
        username: String,
        /// Body text, wrapped to the paper width
        text: String,
        /// Date line (defaults to today)
        date: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrintError> {
    let cli = Cli::parse();

    let mut config = PrinterConfig::load_or_default(cli.config.as_deref())?;
    if let Some(device) = cli.device {
        config.device = device;
    }
    if let Some(width) = cli.width {
        config.width_dots = width;
    }
    if cli.font.is_some() {
        config.font = cli.font;
    }
    config.validate()?;

    let interrupt = Interrupt::new();
    let handler = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if handler.on_signal() == SignalAction::Exit {
            std::process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("\nCancelling print, Ctrl-C again to quit...");
    }) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let mut printer = Printer::new(config).with_cancel(interrupt.token());
    let width = printer.config().width_dots;

    let raster = match cli.command {
        Commands::Gradient { height } => printer.ramp(height),
        Commands::Image { path } => {
            let grid = load_image(&path, width)?;
            printer.rasterize(&grid)
        }
        Commands::Card {
            profile,
            username,
            text,
            date,
        } => {
            let faces = CardFaces::load(printer.config().font.as_deref())?;
            let card = Card {
                profile,
                username,
                text,
                date: date.unwrap_or_else(today),
            };
            println!("Rendering tweet: {}", card.username);
            let grid = card.render(&faces, width)?;
            printer.rasterize(&grid)
        }
    };

    println!("{}", PrintSummary::of(&raster));

    if let Some(png_path) = cli.png {
        preview::save_png(&png_path, &raster)?;
        println!("Saved to {}", png_path.display());
        return Ok(());
    }

    {
        let _armed = interrupt.arm();
        printer.print_raster(raster)?;
    }
    println!("Sent OK.");
    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%b %-d, %Y").to_string()
}
