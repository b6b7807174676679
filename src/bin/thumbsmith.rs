use std::{
    io::{BufRead as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "thumbsmith", version)]
struct Cli {
    /// Folder of source images. Prompted for when omitted.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Title text. Prompted for when omitted.
    #[arg(long)]
    title: Option<String>,

    /// Subtitle text. Prompted for when omitted.
    #[arg(long)]
    subtitle: Option<String>,

    /// JSON render config; absent keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override the font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Override how output file names are derived.
    #[arg(long, value_enum)]
    naming: Option<NamingChoice>,

    /// Where to write the caption-box debug image.
    #[arg(long, default_value = "debug_black_box.png")]
    debug_box: PathBuf,

    /// Do not write the caption-box debug image.
    #[arg(long)]
    no_debug_box: bool,

    /// Exit non-zero if any file failed.
    #[arg(long)]
    strict: bool,

    /// Print the font family and SHA-256 of the font bytes before rendering.
    #[arg(long)]
    dump_font: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NamingChoice {
    Preserve,
    Jpg,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = build_config(&cli)?;
    if cli.dump_font {
        dump_font_diagnostics(&config.font_path)?;
    }

    let folder = match cli.folder {
        Some(f) => f,
        None => PathBuf::from(prompt("Enter the path to the images folder: ")?),
    };
    let title = match cli.title {
        Some(t) => t,
        None => prompt("Enter the title text for the thumbnails: ")?,
    };
    let subtitle = match cli.subtitle {
        Some(s) => s,
        None => prompt("Enter the subtitle text for the thumbnails: ")?,
    };
    tracing::debug!(folder = %folder.display(), title = %title, subtitle = %subtitle, "inputs");

    let mut compositor = thumbsmith::Compositor::new(config)?;
    if !cli.no_debug_box {
        compositor.set_sink(Box::new(thumbsmith::FileSink::new(cli.debug_box)));
    }

    let report = thumbsmith::process_folder(&mut compositor, &folder, &title, &subtitle)
        .with_context(|| format!("process folder '{}'", folder.display()))?;

    eprintln!("{}", report.summary());
    if cli.strict && !report.is_success() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn build_config(cli: &Cli) -> anyhow::Result<thumbsmith::RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => thumbsmith::RenderConfig::from_path(path)?,
        None => thumbsmith::RenderConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(font) = &cli.font {
        config.font_path = font.clone();
    }
    if let Some(naming) = cli.naming {
        config.output_naming = match naming {
            NamingChoice::Preserve => thumbsmith::OutputNaming::PreserveExtension,
            NamingChoice::Jpg => thumbsmith::OutputNaming::JpgExtension,
        };
    }
    config.validate()?;
    Ok(config)
}

fn prompt(label: &str) -> anyhow::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn dump_font_diagnostics(path: &std::path::Path) -> anyhow::Result<()> {
    let engine = thumbsmith::TextLayoutEngine::from_path(path)
        .with_context(|| format!("load font '{}'", path.display()))?;
    eprintln!("font diagnostics:");
    eprintln!("  path:    {}", path.display());
    eprintln!("  family:  {}", engine.family_name());
    eprintln!("  sha256:  {}", sha256_hex(engine.font_bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
