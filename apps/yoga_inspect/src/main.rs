mod plan;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use yoga_config::{load_inspect_settings, OutputFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Canonical record as JSON.
    Json,
    /// Section render plan, one line per section.
    Sections,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Sections => OutputFormat::Sections,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize a yoga analysis payload and show the result")]
struct Args {
    /// Payload file, or `-` for stdin.
    input: PathBuf,

    /// Output format (overrides the config file).
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Single-line JSON output.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Print the raw payload before the normalized output.
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Config file (default: configs/yoga_inspect.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read payload from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read payload {}", path.display()))
}

fn to_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize output")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = load_inspect_settings(args.config.as_deref())?;
    if let Some(format) = args.format {
        settings.format = format.into();
    }
    if args.compact {
        settings.pretty = false;
    }
    log::debug!("inspect settings: {:?}", settings);

    let text = read_input(&args.input)?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("Payload {} is not valid JSON", args.input.display()))?;

    if args.raw {
        println!("{}", to_json(&raw, settings.pretty)?);
        println!("---");
    }

    let record = yoga_canon::normalize(&raw);
    if !record.is_recognized() {
        log::warn!("payload shape not recognized; only chart data and passthrough are available");
    }

    match settings.format {
        OutputFormat::Json => {
            let out = plan::filtered(&record, &settings);
            println!("{}", to_json(&out, settings.pretty)?);
        }
        OutputFormat::Sections => {
            for line in plan::render_plan(&record, &settings) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
