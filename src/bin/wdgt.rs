use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use wdgt_rs::widget::present;
use wdgt_rs::{Conversation, Kind, RenderConfig, Rendered, preview, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wdgt",
    version,
    about = "Render conversational-analytics widget payloads as charts, tables, and cards"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one response (or a JSON array of responses) and print it as text.
    Render(RenderArgs),
    /// List the recognized widget kinds and their legacy codes.
    Kinds,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON file with a response object or an array of them ("-" for stdin).
    input: PathBuf,
    /// Locale for displayed numbers (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Palette override, colors separated by comma or semicolon (e.g. "#111,#222").
    #[arg(long)]
    palette: Option<String>,
    /// Which response the --csv/--preview outputs use (default: the last one).
    #[arg(long)]
    index: Option<usize>,
    /// Save all rendered widgets as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Save the selected table or leaderboard widget as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Draw the selected bar or pie widget (.svg or .png).
    #[arg(long)]
    preview: Option<PathBuf>,
    /// Width of the preview (default 900).
    #[arg(long, default_value_t = 900)]
    width: u32,
    /// Height of the preview (default 520).
    #[arg(long, default_value_t = 520)]
    height: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Kinds => {
            for k in Kind::ALL {
                println!("{:<13} {:<7} {}", k.as_str(), k.legacy_code(), k.icon());
            }
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut s).context("read stdin")?;
        Ok(s)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }
}

fn selected<'a>(rendered: &'a [Rendered], index: Option<usize>) -> Result<&'a Rendered> {
    let idx = index.unwrap_or(rendered.len().saturating_sub(1));
    rendered
        .get(idx)
        .ok_or_else(|| anyhow::anyhow!("no response at index {idx} ({} total)", rendered.len()))
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let cfg = RenderConfig::from_options(&args.locale, args.palette.as_deref())?;
    let conv = Conversation::from_json(&read_input(&args.input)?)?;
    let rendered = conv.render(&cfg.palette);

    for (i, r) in rendered.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", present::to_text(r, &cfg.formatter));
    }

    if let Some(path) = args.json.as_ref() {
        storage::save_json(&rendered, path)?;
        eprintln!("Saved {} widgets to {}", rendered.len(), path.display());
    }

    if args.csv.is_some() || args.preview.is_some() {
        let target = selected(&rendered, args.index)?;
        let widget = target.outcome.widget().ok_or_else(|| {
            anyhow::anyhow!(
                "selected widget is not renderable: {}",
                target.outcome.reason().unwrap_or_default()
            )
        })?;
        if let Some(path) = args.csv.as_ref() {
            storage::save_table_csv(widget, path)?;
            eprintln!("Wrote table to {}", path.display());
        }
        if let Some(path) = args.preview.as_ref() {
            preview::draw_preview(widget, path, args.width, args.height)?;
            eprintln!("Wrote preview to {}", path.display());
        }
    }

    Ok(())
}
