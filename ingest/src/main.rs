use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use engine::corpus::{save_documents, save_meta, CorpusPaths, MetaFile};
use engine::normalize::{compute_term_frequencies, normalize};
use engine::Document;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    text: String,
    #[serde(with = "time::serde::rfc3339")]
    taken_at: OffsetDateTime,
    #[serde(default)]
    comment_count: u64,
    #[serde(default)]
    like_count: u64,
}

#[derive(Parser)]
#[command(name = "ingest")]
#[command(about = "Process raw post records into a searchable corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process raw JSON/JSONL post files (or a directory of them) into a
    /// corpus directory
    Process {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output corpus directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process { input, output } => process_corpus(&input, &output),
    }
}

fn process_corpus(input: &str, output: &str) -> Result<()> {
    let input_path = Path::new(input);
    let out_paths = CorpusPaths::new(output);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }

    let mut documents: Vec<Document> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut documents, &mut seen_ids)?;
        } else {
            read_json(&file, &mut documents, &mut seen_ids)?;
        }
    }

    let num_docs = documents.len() as u64;
    tracing::info!(num_docs, "processed documents");

    save_documents(&out_paths, &documents)?;
    let meta = MetaFile {
        num_docs,
        created_at: OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&out_paths, &meta)?;

    tracing::info!(output, "corpus build complete");
    Ok(())
}

fn read_jsonl(file: &Path, documents: &mut Vec<Document>, seen_ids: &mut HashSet<String>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawPost = serde_json::from_str(&line)?;
        ingest_post(raw, documents, seen_ids)?;
    }
    Ok(())
}

fn read_json(file: &Path, documents: &mut Vec<Document>, seen_ids: &mut HashSet<String>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let raw: RawPost = serde_json::from_value(v)?;
                ingest_post(raw, documents, seen_ids)?;
            }
        }
        serde_json::Value::Object(_) => {
            let raw: RawPost = serde_json::from_value(json)?;
            ingest_post(raw, documents, seen_ids)?;
        }
        _ => {}
    }
    Ok(())
}

// A malformed or duplicate record aborts the whole run; a corpus with a
// silently dropped post would no longer match the index built from it.
fn ingest_post(
    raw: RawPost,
    documents: &mut Vec<Document>,
    seen_ids: &mut HashSet<String>,
) -> Result<()> {
    if !seen_ids.insert(raw.id.clone()) {
        bail!("duplicate post id {:?} in raw data", raw.id);
    }
    documents.push(process_post(raw));
    Ok(())
}

/// Run one raw post through the same normalizer the engine applies to
/// queries, and fix its term-frequency table.
fn process_post(raw: RawPost) -> Document {
    let tokens = normalize(&raw.text);
    let term_frequencies = compute_term_frequencies(&tokens);
    Document {
        id: raw.id,
        term_frequencies,
        normalized_text: tokens.join(" "),
        taken_at: raw.taken_at,
        comment_count: raw.comment_count,
        like_count: raw.like_count,
    }
}
