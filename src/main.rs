//! qirender CLI
//!
//! Renders a module matrix, written as text art, to PNG, JPEG or SVG.
//!
//! # Usage
//!
//! ```bash
//! # 300px PNG into ./generated with a timestamp name
//! qirender --matrix symbol.txt --format png
//!
//! # Green-on-black SVG read from stdin
//! some-encoder "Hello" | qirender --matrix - --format svg --foreground "#0F0" --background "#000" --name hello
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use qirender::helper::{save_artifact, DEFAULT_DIRECTORY};
use qirender::render::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE};
use qirender::{render, Color, ModuleMatrix, OutputFormat, RenderError, RenderRequest};

#[derive(Parser)]
#[command(name = "qirender")]
#[command(about = "Render a QR module matrix to PNG, JPEG or SVG", long_about = None)]
struct Cli {
    /// Text-art matrix file (`#`/`1` dark, `.`/`0` light), or `-` for stdin
    #[arg(short, long)]
    matrix: PathBuf,

    /// Output format: png, jpg or svg
    #[arg(short, long)]
    format: String,

    /// Width and height in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Foreground color (#RGB or #RRGGBB)
    #[arg(long, default_value = DEFAULT_FOREGROUND)]
    foreground: String,

    /// Background color (#RGB or #RRGGBB)
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    background: String,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_DIRECTORY)]
    output: String,

    /// File name without extension (defaults to a timestamp)
    #[arg(short, long)]
    name: Option<String>,

    /// Print the matrix to the terminal before rendering
    #[arg(long)]
    preview: bool,
}

fn run(cli: Cli) -> Result<PathBuf, RenderError> {
    let foreground = Color::parse(&cli.foreground)?;
    let background = Color::parse(&cli.background)?;
    let format = OutputFormat::parse(&cli.format)?;

    let text = if cli.matrix.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&cli.matrix)?
    };
    let matrix: ModuleMatrix = text.parse()?;
    if cli.preview {
        print!("{}", matrix.to_console_string(4));
    }

    let artifact = render(&RenderRequest {
        matrix,
        size_pixels: cli.size,
        foreground,
        background,
        format,
    })?;
    let path = save_artifact(&artifact, Some(&cli.output), cli.name.as_deref())?;
    info!("saved {} ({})", path.display(), artifact.content_type());
    Ok(path)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("qirender: {}", e);
            ExitCode::FAILURE
        }
    }
}
