use anyhow::Result;
use clap::{Parser, ValueEnum};
use engine::corpus::{load_corpus, CorpusPaths};
use engine::{MatchMode, RankBy, SearchEngine};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    And,
    Or,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankArg {
    Similarity,
    Likes,
    Comments,
    Recency,
    None,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::And => MatchMode::And,
            ModeArg::Or => MatchMode::Or,
        }
    }
}

impl From<RankArg> for RankBy {
    fn from(rank: RankArg) -> Self {
        match rank {
            RankArg::Similarity => RankBy::Similarity,
            RankArg::Likes => RankBy::LikeCount,
            RankArg::Comments => RankBy::CommentCount,
            RankArg::Recency => RankBy::Recency,
            RankArg::None => RankBy::None,
        }
    }
}

#[derive(Parser)]
#[command(name = "query")]
#[command(about = "Search a processed post corpus", long_about = None)]
struct Args {
    /// Corpus directory produced by `ingest process`
    #[arg(long, default_value = "./corpus")]
    corpus: String,
    /// Whether all query terms must match, or just one
    #[arg(long, value_enum, default_value_t = ModeArg::And)]
    mode: ModeArg,
    /// Ranking criterion for the result list
    #[arg(long, value_enum, default_value_t = RankArg::Similarity)]
    rank: RankArg,
    /// Query text
    query: Vec<String>,
}

fn permalink(id: &str) -> String {
    format!("https://instagram.com/p/{id}")
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = CorpusPaths::new(&args.corpus);
    let (documents, meta) = load_corpus(&paths)?;
    tracing::info!(num_docs = meta.num_docs, created_at = %meta.created_at, "corpus loaded");
    let engine = SearchEngine::build(documents)?;

    let query = args.query.join(" ");
    let start = std::time::Instant::now();
    let results = engine.search(&query, args.mode.into(), args.rank.into());
    let took_s = start.elapsed().as_secs_f64();

    let summary = engine.summarize(&results);
    tracing::info!(took_s, total = summary.total, "search complete");

    println!("Found {} result(s):", summary.total);
    for (i, id) in summary.ids.iter().enumerate() {
        println!("({}) {}", i + 1, permalink(id));
    }
    Ok(())
}
