use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use beancard::{
    CANONICAL_SIZE, CardDocument, ColorRecommender, DisplayNameState, ExportTarget, FontBook,
    GeminiClient, ResizeFeed, ResponsiveScaler, encode_png,
};

#[derive(Parser, Debug)]
#[command(name = "beancard", version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the canonical 1200x1200 PNG.
    Export(ExportArgs),
    /// Render a scaled preview PNG for a container width.
    Preview(PreviewArgs),
    /// Print the CSS rendition of the card background.
    Css(DocArgs),
    /// Ask Gemini for a five-color palette (falls back to the default palette).
    Palette(PaletteArgs),
    /// Translate the display name to English.
    Translate(DocArgs),
}

#[derive(Parser, Debug)]
struct DocArgs {
    /// Input card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; the file is named after the bean.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Font directory (defaults to $BEANCARD_FONT_DIR).
    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Container width in pixels.
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font directory (defaults to $BEANCARD_FONT_DIR).
    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PaletteArgs {
    /// Input card JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Store the recommended colors back into the card JSON.
    #[arg(long)]
    write: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Css(args) => cmd_css(args),
        Command::Palette(args) => cmd_palette(args).await,
        Command::Translate(args) => cmd_translate(args).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_doc(path: &Path) -> anyhow::Result<CardDocument> {
    let doc = CardDocument::from_path(path)
        .with_context(|| format!("load card '{}'", path.display()))?;
    doc.validate()
        .with_context(|| format!("validate card '{}'", path.display()))?;
    Ok(doc)
}

fn load_fonts(dir: Option<PathBuf>) -> anyhow::Result<FontBook> {
    let dir = dir.or_else(|| std::env::var_os(beancard::env::FONT_DIR_ENV).map(PathBuf::from));
    match dir {
        Some(dir) => FontBook::from_dir(&dir)
            .with_context(|| format!("load fonts from '{}'", dir.display())),
        None => {
            tracing::warn!("no font directory given; only background-only cards can render");
            Ok(FontBook::new())
        }
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let doc = load_doc(&args.in_path)?;
    let comp = doc.to_composition()?;
    let mut target = ExportTarget::mount(load_fonts(args.fonts)?);
    let path = target
        .export_to_dir(&comp, &args.out_dir)
        .context("export card")?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let doc = load_doc(&args.in_path)?;
    let comp = doc.to_composition()?;
    if !args.width.is_finite() || args.width <= 0.0 {
        anyhow::bail!("--width must be a positive number of pixels, got {}", args.width);
    }

    let feed = ResizeFeed::new();
    let scaler = ResponsiveScaler::attach_canonical(feed.clone())?;
    feed.push_width(args.width);
    let width = (scaler.scale() * f64::from(CANONICAL_SIZE)).round() as u32;

    let mut target = ExportTarget::mount(load_fonts(args.fonts)?);
    let frame = target.preview(&comp, width).context("render preview")?;
    let png = encode_png(frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {} (scale {:.3})", args.out.display(), scaler.scale());
    Ok(())
}

fn cmd_css(args: DocArgs) -> anyhow::Result<()> {
    let comp = load_doc(&args.in_path)?.to_composition()?;
    println!("{}", comp.background.to_css());
    Ok(())
}

async fn cmd_palette(args: PaletteArgs) -> anyhow::Result<()> {
    let mut doc = load_doc(&args.in_path)?;
    let client = GeminiClient::from_env().context("configure Gemini client")?;

    let mut recommender = ColorRecommender::new();
    let colors = recommender.recommend(&client, &doc.bean).await?;
    println!("{}", serde_json::to_string_pretty(&colors)?);

    if args.write {
        doc.colors = colors;
        std::fs::write(&args.in_path, doc.to_json_pretty()?)
            .with_context(|| format!("write card '{}'", args.in_path.display()))?;
        eprintln!("updated {}", args.in_path.display());
    }
    Ok(())
}

async fn cmd_translate(args: DocArgs) -> anyhow::Result<()> {
    let doc = load_doc(&args.in_path)?;
    let client = GeminiClient::from_env().context("configure Gemini client")?;

    let mut state = DisplayNameState::new(doc.resolved_display_name());
    match state.toggle_language(&client).await {
        Ok(name) => println!("{name}"),
        Err(err) if err.is_recoverable() => {
            eprintln!("translation failed ({err}); keeping '{}'", state.current());
            println!("{}", state.current());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
