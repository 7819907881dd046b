mod config;

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bigtext::{GlyphTable, TextRenderer};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::config::Config;

/// Extension replacing `txt` on files written by `batch`.
const OUTPUT_EXTENSION: &str = "braille.txt";

#[derive(Parser, Debug)]
#[command(author, version, about = "Render text with bitmap sprite-sheet fonts as Braille art")]
struct Cli {
    /// Sprite sheet image (overrides the config file)
    #[arg(long, global = true)]
    font: Option<PathBuf>,
    /// Config file path (defaults to ./bigtext.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render text given on the command line to stdout
    Render(RenderArgs),
    /// Render a text file and write the result to disk
    Convert(ConvertArgs),
    /// Render every .txt file under a directory
    Batch(BatchArgs),
    /// Print the glyph table of the font
    Inspect,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Words to render, joined with spaces
    #[arg(required = true)]
    text: Vec<String>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input text file, or "-" for stdin
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory searched recursively for .txt files
    input: PathBuf,
    /// Output directory for rendered files
    #[arg(short, long)]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let font_path = cli
        .font
        .clone()
        .or(config.font.path.clone())
        .context("no font given; pass --font or set [font] path in bigtext.toml")?;
    let options = config.extraction_options()?;
    let table = GlyphTable::from_path(&font_path, &options)
        .with_context(|| format!("failed to load font {:?}", font_path))?;
    log::info!("loaded font {:?} ({} rows per glyph)", font_path, table.rows_per_glyph());

    let renderer = TextRenderer::new(Arc::new(table));
    match cli.command {
        Commands::Render(args) => render(&renderer, args),
        Commands::Convert(args) => convert(&renderer, args),
        Commands::Batch(args) => batch(&renderer, args),
        Commands::Inspect => inspect(&renderer),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn render(renderer: &TextRenderer, args: RenderArgs) -> Result<()> {
    println!("{}", renderer.render(&args.text.join(" ")));
    Ok(())
}

fn convert(renderer: &TextRenderer, args: ConvertArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    write_output(&args.output, &renderer.render(&text))
}

fn batch(renderer: &TextRenderer, args: BatchArgs) -> Result<()> {
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let inputs = text_files(&args.input, &args.out_dir)?;
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
        )?
        .progress_chars("=> "),
    );

    for input in &inputs {
        let text = read_input(input)?;
        let output = output_path(&args.input, &args.out_dir, input);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {:?}", parent))?;
        }
        write_output(&output, &renderer.render(&text))?;
        log::debug!("rendered {:?} to {:?}", input, output);
        progress.inc(1);
    }

    progress.finish_with_message(format!("Files written to {:?}", args.out_dir));
    Ok(())
}

/// Mirror `input`'s position under `root` into `out_dir`, e.g. `a/x.txt` to `a/x.braille.txt`.
fn output_path(root: &Path, out_dir: &Path, input: &Path) -> PathBuf {
    let relative = match input.strip_prefix(root) {
        Ok(relative) if relative.file_name().is_some() => relative,
        _ => input.file_name().map_or(Path::new("output.txt"), Path::new),
    };
    out_dir.join(relative).with_extension(OUTPUT_EXTENSION)
}

fn inspect(renderer: &TextRenderer) -> Result<()> {
    let table = renderer.font().context("no font bound")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{} glyphs, {} rows per glyph", table.len(), table.rows_per_glyph())?;
    for (ch, glyph) in table.iter() {
        let label = if ch.is_ascii_graphic() || ch == ' ' {
            format!("{ch:?}")
        } else {
            format!("{:#04x}", ch as u32)
        };
        writeln!(out, "{label} ({} columns)", glyph.columns())?;
        for row in glyph.rows() {
            writeln!(out, "  |{row}|")?;
        }
    }
    Ok(())
}

/// `.txt` files under `path`, skipping `out_dir` and earlier batch outputs.
fn text_files(path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_entry(|entry| entry.path() != out_dir)
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")))
        .filter(|path| !is_batch_output(path))
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no .txt files found in {:?}", path);
    }
    Ok(entries)
}

fn is_batch_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(&format!(".{OUTPUT_EXTENSION}")))
}

fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .with_context(|| format!("failed to read {:?}", path))?;
    }
    Ok(text)
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    writeln!(file, "{}", rendered)?;
    Ok(())
}
