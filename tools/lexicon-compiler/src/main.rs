use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tbta_lexicon::{compile_lexicon, lexicon_from_archive, load_lexicon};
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON concept lexicon to an rkyv archive")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let lexicon = load_lexicon(&cli.input)
        .with_context(|| format!("reading lexicon {}", cli.input.display()))?;

    info!(
        version = lexicon.version,
        concepts = lexicon.concepts.len(),
        "compiling lexicon"
    );
    let bytes = compile_lexicon(&lexicon)?;

    // The archive must load back to the same lexicon before it is written
    let check = lexicon_from_archive(&bytes)?;
    anyhow::ensure!(check == lexicon, "compiled archive does not match its source");

    fs::write(&cli.output, &bytes)
        .with_context(|| format!("writing archive {}", cli.output.display()))?;

    info!(output = %cli.output.display(), bytes = bytes.len(), "archive written");
    Ok(())
}
