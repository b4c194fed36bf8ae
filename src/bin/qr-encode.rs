use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use qr_ppm::encoder::EcLevel;
use qr_ppm::img::RenderConfig;
use qr_ppm::{term, Imager, QrCodeEncoder};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "qr-encode",
    about = "Encode text as a QR code image",
    after_help = "Example: qr-encode \"Hello, World!\" qrcode.ppm 8 4 H"
)]
struct Args {
    /// The string to encode
    #[arg(allow_hyphen_values = true)]
    text: String,

    /// Output image file, `.png` writes PNG, anything else plain PPM
    #[arg(default_value = "qrcode.ppm")]
    output_file: PathBuf,

    /// Size of each QR module in pixels
    #[arg(default_value_t = RenderConfig::DEFAULT_MODULE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    module_size: u32,

    /// Margin around the QR code in modules
    #[arg(default_value_t = RenderConfig::DEFAULT_MARGIN)]
    margin: u32,

    /// Error correction level L/M/Q/H
    #[arg(default_value_t = EcLevel::L)]
    error_level: EcLevel,

    /// Force a symbol version instead of the smallest that fits
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
    symbol_version: Option<u8>,

    /// Also print the module grid to stdout
    #[arg(long, value_enum)]
    print: Option<Print>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Print {
    /// Block characters, one line per row
    Blocks,
    /// `1`/`0` per module, no separators
    Bits,
}

fn run(args: Args) -> Result<()> {
    let config = RenderConfig::new(args.module_size, args.margin)?;
    let imager = Imager::new(config)
        .with_level(args.error_level)
        .with_version(args.symbol_version);

    let grid = imager
        .encode(&QrCodeEncoder, &args.text)
        .context("Failed to generate QR code!")?;

    match args.print {
        Some(Print::Blocks) => print!("{}", term::blocks(&grid)),
        Some(Print::Bits) => println!("{}", term::bits(&grid)),
        None => {}
    }

    let summary = imager
        .save_grid(&grid, &args.output_file)
        .with_context(|| format!("Failed to save image to: {}", args.output_file.display()))?;

    println!("QR code saved to: {}", summary.path.display());
    println!(
        "Image size: {}x{} pixels",
        summary.image_width, summary.image_height
    );
    println!(
        "QR code version: {}x{} modules",
        summary.modules, summary.modules
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qr_ppm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
