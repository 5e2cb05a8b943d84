//! CLI for converting between lines of text and slide decks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use powerpointless_core::{
    create_subtitles, extract_subtitles, join_lines_with_newline, Deck, DocumentFormat,
};
use powerpointless_pptx::PptxDeck;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Turn lines of text into slides, and slides back into lines of text.
#[derive(Parser, Debug)]
#[command(name = "powerpointless")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a presentation with one slide per line of text
    CreateSubtitles {
        /// Template presentation (default: built-in blank template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Text file with one subtitle per line, or - for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Presentation to write, or - for stdout
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract the text of every slide, one line per text box
    ExtractSubtitles {
        /// Presentation to read, or - for stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Text file to write, or - for stdout
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::CreateSubtitles {
            template,
            input,
            output,
        } => create(template.as_deref(), &input, &output),
        Command::ExtractSubtitles { input, output } => extract(&input, &output),
    }
}

fn create(template: Option<&Path>, input: &Path, output: &Path) -> Result<()> {
    if template.is_some_and(is_stdio) && is_stdio(input) {
        bail!("Only one of --template and --input can read from stdin");
    }

    let deck = match template {
        Some(path) => {
            let data = read_input(path)?;
            PptxDeck::from_bytes(&data)
                .with_context(|| format!("Failed to load template {}", path.display()))?
        }
        None => PptxDeck::default_template().context("Failed to load built-in template")?,
    };

    let text = read_input(input)?;
    let lines = text
        .as_slice()
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .with_context(|| format!("{} is not valid UTF-8 text", input.display()))?;
    log::debug!("Read {} line(s) from {}", lines.len(), input.display());

    let format = output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension);
    if !is_stdio(output) && format != Some(DocumentFormat::Pptx) {
        log::warn!("{} will be written as a .pptx package", output.display());
    }

    let deck = create_subtitles(deck, &lines).context("Failed to create slides")?;
    log::info!("Deck now has {} slide(s)", deck.slide_count());

    if is_stdio(output) {
        let data = deck.to_bytes().context("Failed to write presentation")?;
        write_output(output, &data)
    } else {
        deck.save_path(output)
            .with_context(|| format!("Failed to write {}", output.display()))
    }
}

fn extract(input: &Path, output: &Path) -> Result<()> {
    let data = read_input(input)?;
    let deck = PptxDeck::from_bytes(&data)
        .with_context(|| format!("Failed to load presentation {}", input.display()))?;

    let lines = extract_subtitles(&deck);
    log::info!("Extracted {} line(s) from {}", lines.len(), input.display());

    write_output(output, join_lines_with_newline(&lines).as_bytes())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole file, or stdin for `-`.
fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("Failed to read from stdin")?;
        return Ok(data);
    }

    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `data` to a file, or stdout for `-`.
fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to write to stdout")?;
        return Ok(());
    }

    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}
