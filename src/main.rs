use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use genstudio::{
    format::{format_byte_size, format_duration, round_to_multiple, round_to_step, truncate, SizeInfo},
    logger::{self, LogLevel, LoggerConfig},
    ClientConfig, ConsolePlatform, GenerationClient, ShareOutcome, StatusKind,
};

const GALLERY_PROMPT_CHARS: usize = 50;

#[derive(Parser)]
#[command(name = "genstudio", version, about = "Generate images and browse the gallery of a genstudio service")]
struct Cli {
    /// Service address, e.g. http://localhost:8083
    #[arg(long, global = true, env = "GENSTUDIO_BASE_URL")]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "GENSTUDIO_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an image, save it on the service and show the refreshed gallery
    Generate {
        prompt: String,
        #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
        width: i64,
        #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
        height: i64,
        /// Round both dimensions to the nearest multiple of 64 before submitting
        #[arg(long)]
        snap: bool,
        /// Copy the generated image into this file
        #[arg(long)]
        copy_to: Option<PathBuf>,
        /// Print a share message for the generated image
        #[arg(long)]
        share: bool,
    },
    /// List stored images, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fetch a stored image by filename
    Fetch {
        filename: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download a stored image as an attachment
    Download {
        filename: String,
        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Round a value to the nearest multiple
    Round {
        value: u32,
        #[arg(long, default_value_t = 64)]
        multiple: u32,
    },
    /// Show aspect ratio and megapixels for a canvas size
    SizeInfo { width: u32, height: u32 },
}

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let level = match cli.log_level.parse::<LogLevel>() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    let logger_config = if cli.json_logs {
        LoggerConfig::production().with_level(level)
    } else {
        LoggerConfig::new().with_level(level)
    };
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
        process::exit(1);
    }
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    logger::log_client_config(&config);

    if let Err(e) = run(cli.command, config).await {
        log::debug!("{} command failed: {}", e.kind(), e);
        eprintln!("Error: {}", e.user_message());
        process::exit(1);
    }
}

async fn run(command: Command, config: ClientConfig) -> genstudio::Result<()> {
    match command {
        Command::Round { value, multiple } => {
            println!("{}", round_to_multiple(value, multiple));
            Ok(())
        }
        Command::SizeInfo { width, height } => {
            println!("{}", SizeInfo::new(width, height));
            Ok(())
        }
        Command::Generate {
            prompt,
            width,
            height,
            snap,
            copy_to,
            share,
        } => {
            let mut platform = ConsolePlatform::new();
            if let Some(path) = &copy_to {
                platform = platform.with_image_sink(path);
            }
            let mut client = GenerationClient::new(config)?.with_platform(Arc::new(platform));

            let (width, height) = if snap {
                (snap_dimension("Width", width), snap_dimension("Height", height))
            } else {
                (width, height)
            };
            if let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) {
                println!("{}", SizeInfo::new(w, h));
            }

            let outcome = client.submit(&prompt, Some(width), Some(height)).await?;
            print_status(&client);

            let image = &outcome.image;
            println!("File:       {}", image.filename);
            println!("Size:       {} pixels", image.dimensions_label());
            println!("Prompt:     {}", image.prompt);
            println!("Model:      {}", image.model_label());
            println!(
                "Generation: {} s (request took {:.2} s)",
                format_duration(outcome.duration_seconds.or(image.duration_seconds)),
                outcome.elapsed.as_secs_f64()
            );
            println!("File size:  {}", format_byte_size(image.file_size_bytes.unwrap_or(0)));
            if let Some(created) = image.created() {
                println!("Created:    {}", created.format("%Y-%m-%d %H:%M:%S"));
            }
            println!("View:       {}", client.image_url(&image.filename));
            println!("Download:   {}", client.download_url(&image.filename));

            match &outcome.gallery {
                Ok(images) => println!("Gallery now holds {} images", images.len()),
                Err(e) => eprintln!("Gallery refresh failed: {}", e.user_message()),
            }

            if copy_to.is_some() {
                client.copy_current_to_clipboard().await?;
                print_status(&client);
            }
            if share {
                match client.share_current().await {
                    Ok(ShareOutcome::NotCompleted(reason)) => log::info!("Share not completed: {}", reason),
                    Ok(_) => {}
                    Err(e) => return Err(e),
                }
            }
            Ok(())
        }
        Command::List { limit } => {
            let client = GenerationClient::new(config)?;
            let images = client.list().await?;
            if images.is_empty() {
                println!("Gallery is empty. Create the first image!");
                return Ok(());
            }
            let shown = limit.unwrap_or(images.len());
            for image in images.iter().take(shown) {
                println!(
                    "{}  {:>11}  {:>10}  {:>8}s  {}",
                    image.filename,
                    image.dimensions_label(),
                    image
                        .file_size_bytes
                        .map(format_byte_size)
                        .unwrap_or_else(|| "?".to_string()),
                    format_duration(image.duration_seconds),
                    truncate(&image.prompt, GALLERY_PROMPT_CHARS)
                );
            }
            if shown < images.len() {
                println!("... and {} more", images.len() - shown);
            }
            Ok(())
        }
        Command::Fetch { filename, output } => {
            let client = GenerationClient::new(config)?;
            let bytes = client.fetch_image(&filename).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&filename));
            write_file(&path, &bytes).await?;
            println!("Saved {} ({})", path.display(), format_byte_size(bytes.len() as u64));
            Ok(())
        }
        Command::Download { filename, output } => {
            let client = GenerationClient::new(config)?;
            let image = client.download_image(&filename).await?;
            let path = output.join(&image.filename);
            write_file(&path, &image.bytes).await?;
            println!(
                "Downloaded {} ({})",
                path.display(),
                format_byte_size(image.bytes.len() as u64)
            );
            Ok(())
        }
    }
}

fn snap_dimension(label: &str, value: i64) -> i64 {
    let Ok(raw) = u32::try_from(value) else {
        return value;
    };
    let rounded = round_to_step(raw);
    if rounded != raw {
        println!("{} rounded to {}px (multiple of 64)", label, rounded);
    }
    i64::from(rounded)
}

fn print_status(client: &GenerationClient) {
    if let Some(message) = client.status().current() {
        match message.kind {
            StatusKind::Success => println!("{}", message.text),
            StatusKind::Error => eprintln!("{}", message.text),
        }
    }
}

async fn write_file(path: &std::path::Path, bytes: &[u8]) -> genstudio::Result<()> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        genstudio::ClientError::Io(format!("Cannot write {}: {}", path.display(), e))
    })
}
