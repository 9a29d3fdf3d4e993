//! Verse decoder CLI
//!
//! Decodes AnalyzedVerse strings into clause trees, and resolves the words of
//! a whole verse store against a concept lexicon.

mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tbta_lexicon::{annotate, load_lexicon, ConceptIndex, Coverage, MatchTier, ResolvedWord, Resolver};
use tbta_parser::{analyze, find_feature, Node};
use tbta_protocol::Feature;
use tracing::{info, warn, Level};

use crate::store::{Selection, VerseRecord};

#[derive(Parser)]
#[command(name = "verse-decoder")]
#[command(about = "Decodes TBTA AnalyzedVerse encodings", long_about = None)]
struct Cli {
    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tree of one AnalyzedVerse string as JSON
    Decode {
        /// Encoded verse; read from stdin when omitted
        analyzed: Option<String>,

        /// Include the extracted words
        #[arg(long)]
        words: bool,

        /// List the nodes carrying a feature (e.g. "Number") instead of the tree
        #[arg(long, value_parser = parse_feature, conflicts_with = "words")]
        feature: Option<Feature>,

        #[arg(long)]
        pretty: bool,
    },

    /// Decode and resolve every verse of a JSONL verse store
    Batch {
        /// Verse store, one JSON record per line
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Concept lexicon (.json or compiled archive)
        #[arg(short, long, value_name = "FILE", required_unless_present = "no_resolve")]
        lexicon: Option<PathBuf>,

        /// Decode only; leave every word unresolved
        #[arg(long, conflicts_with = "lexicon")]
        no_resolve: bool,

        /// Output JSONL; stdout when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Book (`GEN`) or verse (`GEN 1:1`) to restrict the run to
        #[arg(long)]
        only: Option<Selection>,
    },
}

#[derive(Serialize)]
struct VerseOutput<'r> {
    reference: String,
    text: &'r str,
    structure: Vec<Node>,
    words: Vec<ResolvedWord>,
}

enum Outcome<'r> {
    Decoded(VerseOutput<'r>, Coverage),
    Skipped,
    Malformed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Decode { analyzed, words, feature, pretty } => decode(analyzed, words, feature, pretty),
        Commands::Batch { input, lexicon, no_resolve: _, output, only } => {
            batch(input, lexicon, output, only.unwrap_or(Selection::All))
        }
    }
}

fn parse_feature(name: &str) -> Result<Feature, String> {
    Feature::from_name(name).ok_or_else(|| format!("unknown feature `{}`", name))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn decode(analyzed: Option<String>, words: bool, feature: Option<Feature>, pretty: bool) -> Result<()> {
    let raw = match analyzed {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let analysis = analyze(&raw);
    let json = match feature {
        Some(feature) => to_json(&find_feature(&analysis.structure, feature), pretty)?,
        None if words => to_json(&analysis, pretty)?,
        None => to_json(&analysis.structure, pretty)?,
    };
    println!("{}", json);
    Ok(())
}

fn process<'r>(
    number: usize,
    record: &'r VerseRecord,
    only: &Selection,
    resolver: &Resolver<'_, ConceptIndex>,
) -> Outcome<'r> {
    let reference = match record.reference() {
        Ok(reference) => reference,
        Err(e) => {
            warn!(line = number, "{:#}", e);
            return Outcome::Malformed;
        }
    };
    if !only.contains(&reference) {
        return Outcome::Skipped;
    }

    let analysis = analyze(&record.analyzed_verse);
    let words = annotate(analysis.words, resolver);

    let mut coverage = Coverage::default();
    coverage.record(&words);

    Outcome::Decoded(
        VerseOutput {
            reference: reference.to_string(),
            text: &record.text,
            structure: analysis.structure,
            words,
        },
        coverage,
    )
}

fn batch(input: PathBuf, lexicon: Option<PathBuf>, output: Option<PathBuf>, only: Selection) -> Result<()> {
    let index = match &lexicon {
        Some(path) => ConceptIndex::new(
            load_lexicon(path).with_context(|| format!("loading lexicon {}", path.display()))?,
        ),
        None => {
            // Only reachable with --no-resolve
            info!("resolution disabled, decoding only");
            ConceptIndex::default()
        }
    };
    if lexicon.is_some() && index.is_empty() {
        warn!("lexicon has no concepts, words will not resolve");
    }
    let resolver = Resolver::new(&index);

    let text = fs::read_to_string(&input)
        .with_context(|| format!("reading verse store {}", input.display()))?;

    let mut malformed = 0usize;
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match VerseRecord::parse(line) {
            Ok(record) => records.push((i + 1, record)),
            Err(e) => {
                warn!(line = i + 1, "{:#}", e);
                malformed += 1;
            }
        }
    }
    info!(verses = records.len(), concepts = index.len(), "decoding verse store");

    let outcomes: Vec<Outcome<'_>> = records
        .par_iter()
        .map(|(number, record)| process(*number, record, &only, &resolver))
        .collect();

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut coverage = Coverage::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Decoded(verse, tally) => {
                writeln!(out, "{}", serde_json::to_string(&verse)?)?;
                coverage = coverage.merge(tally);
            }
            Outcome::Skipped => {}
            Outcome::Malformed => malformed += 1,
        }
    }
    out.flush()?;

    report(&coverage, malformed);
    Ok(())
}

fn report(coverage: &Coverage, malformed: usize) {
    info!(
        verses = coverage.verses,
        words = coverage.words,
        malformed,
        "batch complete"
    );
    info!(
        "part of speech: {}/{} ({:.1}%)",
        coverage.with_part_of_speech,
        coverage.words,
        coverage.pos_rate()
    );
    info!(
        "resolved: {}/{} ({:.1}%), unresolved: {}",
        coverage.resolved,
        coverage.words,
        coverage.resolution_rate(),
        coverage.unresolved
    );
    for tier in MatchTier::ALL {
        let count = coverage.by_tier.get(&tier).copied().unwrap_or(0);
        info!("  tier {} {:?}: {}", tier.rank(), tier, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("verse-decoder").chain(args.iter().copied()))
    }

    #[test]
    fn test_batch_requires_lexicon() {
        assert!(parse(&["batch", "--input", "verses.jsonl"]).is_err());
        assert!(parse(&["batch", "--input", "verses.jsonl", "--lexicon", "lexicon.json"]).is_ok());
    }

    #[test]
    fn test_batch_no_resolve_is_explicit() {
        let cli = parse(&["batch", "--input", "verses.jsonl", "--no-resolve"]).unwrap();
        match cli.command {
            Commands::Batch { lexicon, no_resolve, .. } => {
                assert!(lexicon.is_none());
                assert!(no_resolve);
            }
            Commands::Decode { .. } => panic!("expected batch"),
        }

        let both = ["batch", "-i", "v.jsonl", "-l", "lexicon.json", "--no-resolve"];
        assert!(parse(&both).is_err());
    }

    #[test]
    fn test_decode_feature_names() {
        let cli = parse(&["decode", "--feature", "participant tracking", "x"]).unwrap();
        match cli.command {
            Commands::Decode { feature, .. } => assert_eq!(feature, Some(Feature::ParticipantTracking)),
            Commands::Batch { .. } => panic!("expected decode"),
        }
        assert!(parse(&["decode", "--feature", "Tense", "x"]).is_err());
    }
}
