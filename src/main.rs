// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! wavhide - hide a file inside a PCM WAV file.
//!
//! ```bash
//! wavhide hide --cover song.wav --secret notes.txt --output out.wav --compress --password pw
//! wavhide extract --input out.wav --output-dir ./recovered --password pw
//! wavhide capacity song.wav --secret notes.txt --compress
//! ```
//!
//! The password can also be supplied through `WAVHIDE_PASSWORD`. Logging
//! defaults to `info` and follows `RUST_LOG`; `-v` / `-vv` raise it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::{Builder, Env};
use log::LevelFilter;

use wavhide::{HideOptions, ProgressEvent, Reporter, Stage};

/// Command-line interface definition
#[derive(Parser, Debug)]
#[command(author, version, about = "Hide files in the least significant bits of WAV audio")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Hide a file inside a cover WAV file
    Hide {
        /// Cover WAV file (PCM, 8/16/24/32-bit)
        #[arg(short, long)]
        cover: PathBuf,
        /// File to hide
        #[arg(short, long)]
        secret: PathBuf,
        /// Where to write the stego WAV file
        #[arg(short, long)]
        output: PathBuf,
        /// Name to store in the header (defaults to the secret's file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Encrypt the payload with this password
        #[arg(short, long, env = "WAVHIDE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Brotli-compress the payload before embedding
        #[arg(long)]
        compress: bool,
    },
    /// Recover a hidden file from a stego WAV file
    Extract {
        /// Stego WAV file
        #[arg(short, long)]
        input: PathBuf,
        /// Directory to write the recovered file into
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,
        /// Password, if the payload was encrypted
        #[arg(short, long, env = "WAVHIDE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show how much data a cover WAV file can hold
    Capacity {
        /// Cover WAV file
        cover: PathBuf,
        /// Also report whether this file would fit
        #[arg(short, long)]
        secret: Option<PathBuf>,
        /// Size --secret as Brotli-compressed
        #[arg(long, requires = "secret")]
        compress: bool,
        /// Size --secret as encrypted
        #[arg(long, requires = "secret")]
        encrypt: bool,
    },
}

/// Initialize logging: `[HH:MM:SS] [LEVEL] message`-style lines on stderr.
///
/// `RUST_LOG` is honored; `-v` flags override it.
fn init_logger(verbose: u8) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(buf, "[{}] [{}] {}", buf.timestamp_seconds(), record.level(), record.args())
    });
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Logs each stage once, as it starts.
fn stage_logger() -> impl FnMut(ProgressEvent) {
    let mut last: Option<Stage> = None;
    move |event: ProgressEvent| {
        if last != Some(event.stage) {
            last = Some(event.stage);
            log::info!("{} ({:.0}%)", event.stage.label(), event.fraction * 100.0);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Hide { cover, secret, output, name, password, compress } => {
            hide(&cover, &secret, &output, name, password, compress)
        }
        Commands::Extract { input, output_dir, password } => {
            extract(&input, &output_dir, password.as_deref())
        }
        Commands::Capacity { cover, secret, compress, encrypt } => {
            capacity(&cover, secret.as_deref(), compress, encrypt)
        }
    }
}

fn hide(
    cover: &Path,
    secret_path: &Path,
    output: &Path,
    name: Option<String>,
    password: Option<String>,
    compress: bool,
) -> anyhow::Result<()> {
    let secret = std::fs::read(secret_path)
        .with_context(|| format!("reading secret {}", secret_path.display()))?;
    let name = match name {
        Some(n) => n,
        None => secret_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("secret path has no file name; pass --name")?,
    };

    let mut options = HideOptions::new().with_compression(compress);
    if let Some(pw) = password {
        options = options.with_password(pw);
    }

    let mut sink = stage_logger();
    let mut reporter = Reporter::new(&mut sink);
    wavhide::hide_file(cover, &secret, &name, output, &options, &mut reporter)
        .with_context(|| format!("hiding {} in {}", secret_path.display(), cover.display()))?;

    log::info!("hid '{}' ({} bytes) in {}", name, secret.len(), output.display());
    Ok(())
}

fn extract(input: &Path, output_dir: &Path, password: Option<&str>) -> anyhow::Result<()> {
    let mut sink = stage_logger();
    let mut reporter = Reporter::new(&mut sink);
    let extracted = wavhide::extract_file(input, password, &mut reporter)
        .with_context(|| format!("extracting from {}", input.display()))?;

    // Never let a stored name escape the output directory.
    let file_name = Path::new(&extracted.filename)
        .file_name()
        .map(|n| n.to_owned())
        .unwrap_or_else(|| "extracted.bin".into());
    if !output_dir.is_dir() {
        bail!("output directory {} does not exist", output_dir.display());
    }
    let target = output_dir.join(file_name);
    std::fs::write(&target, &extracted.data)
        .with_context(|| format!("writing {}", target.display()))?;

    log::info!("recovered '{}' ({} bytes) to {}", extracted.filename, extracted.data.len(), target.display());
    Ok(())
}

fn capacity(cover: &Path, secret: Option<&Path>, compress: bool, encrypt: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(cover).with_context(|| format!("reading {}", cover.display()))?;
    let audio = wavhide::WavAudio::from_bytes(&bytes)?;
    let cap = wavhide::wav_capacity(&bytes)?;
    let fmt = audio.format();

    println!("{}", cover.display());
    println!(
        "  format:        {} ch, {} Hz, {}-bit, {:.2} s",
        fmt.channels,
        fmt.sample_rate,
        fmt.bits_per_sample,
        audio.duration_secs()
    );
    println!("  carrier bits:  {}", cap.carrier_bits);
    println!("  max payload:   {} bytes", cap.max_payload_bytes);
    println!("  max encrypted: {} bytes (uncompressed)", cap.max_secret_bytes(true));

    if let Some(path) = secret {
        let data = std::fs::read(path).with_context(|| format!("reading secret {}", path.display()))?;
        let needed = wavhide::stego::capacity::payload_len(&data, compress, encrypt);
        let verdict = if cap.fits(needed) { "fits" } else { "does not fit" };
        println!("  {}: {} bytes -> {} byte payload, {}", path.display(), data.len(), needed, verdict);
    }
    Ok(())
}
