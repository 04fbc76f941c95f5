//! Command-line front end for trademark conflict checks.
//!
//! Usage:
//!     markencheck compare "Accelari" "Acelari GmbH"
//!     markencheck check "Accelari" --classes 9,42 --offices DE,EU
//!     markencheck check "Accelari" --candidates hits.json --format json
//!     markencheck variants "Müller" --max 6
//!     markencheck info 12345

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use markencheck_backend_tmsearch::{InfoRequest, SearchBackend, TmSearchBackend, TmSearchConfig};
use markencheck_explain::{explain_candidate, explain_similarity, summarize_assessment, summarize_candidate};
use markencheck_features::{calculate_similarity, is_likely_conflict};
use markencheck_model::{CandidateMark, SearchQuery, SimilarityResult};
use markencheck_query::{generate_variants, office_name, validate, CandidateFilter, DEFAULT_MAX_VARIANTS};
use markencheck_risk::{assess, RiskConfig};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "markencheck")]
#[command(about = "Check brand names for trademark conflicts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry search API base URL (overrides TMSEARCH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two names directly
    Compare {
        /// The name to check
        query: String,

        /// The registered mark to compare against
        trademark: String,

        /// Combined score from which the names count as conflicting
        #[arg(short, long)]
        threshold: Option<u8>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Assess the collision risk of a name against registered marks
    Check {
        /// Mark text to check
        name: String,

        /// Nice classes to filter (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        classes: Vec<u16>,

        /// Offices or countries to filter (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        offices: Vec<String>,

        /// Score a JSON array of candidates instead of querying the registry
        #[arg(long)]
        candidates: Option<PathBuf>,

        /// Maximum conflicts to report
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Minimum combined similarity for a candidate to count
        #[arg(long)]
        relevance_floor: Option<u8>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate spelling variants to search for
    Variants {
        /// Mark text
        name: String,

        /// Maximum variants, including the exact spelling
        #[arg(short, long, default_value_t = DEFAULT_MAX_VARIANTS)]
        max: usize,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the registry record of a single mark
    Info {
        /// Provider mark id
        mid: u64,
    },
}

#[derive(Serialize)]
struct Comparison<'a> {
    query: &'a str,
    trademark: &'a str,
    similarity: &'a SimilarityResult,
    likely_conflict: bool,
    explanation: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("markencheck=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            query,
            trademark,
            threshold,
            format,
        } => run_compare(&query, &trademark, threshold, format)?,
        Commands::Check {
            name,
            classes,
            offices,
            candidates,
            limit,
            relevance_floor,
            format,
        } => {
            let query = SearchQuery::new(name)
                .with_classes(classes)
                .with_offices(offices)
                .with_limit(limit);
            let mut config = RiskConfig {
                max_conflicts: limit,
                ..RiskConfig::default()
            };
            if let Some(floor) = relevance_floor {
                config.relevance_floor = floor;
            }
            run_check(cli.base_url, &query, candidates.as_deref(), &config, format).await?;
        }
        Commands::Variants { name, max, format } => run_variants(&name, max, format)?,
        Commands::Info { mid } => run_info(cli.base_url, mid).await?,
    }

    Ok(())
}

fn backend(base_url: Option<String>) -> Result<TmSearchBackend> {
    let mut config = TmSearchConfig::from_env();
    if let Some(url) = base_url {
        config.base_url = url;
    }
    TmSearchBackend::new(config).context("Failed to create registry search client")
}

fn run_compare(query: &str, trademark: &str, threshold: Option<u8>, format: OutputFormat) -> Result<()> {
    let similarity = calculate_similarity(query, trademark);
    let comparison = Comparison {
        query,
        trademark,
        similarity: &similarity,
        likely_conflict: is_likely_conflict(query, trademark, threshold),
        explanation: explain_similarity(&similarity),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => {
            println!("{} vs. {}", query, trademark);
            println!(
                "Phonetic: {}% | Visual: {}% | Combined: {}%",
                similarity.phonetic, similarity.visual, similarity.combined
            );
            println!("Core word match: {}", if similarity.core_word_match { "yes" } else { "no" });
            println!("{}", comparison.explanation);
            if comparison.likely_conflict {
                println!("Likely conflict");
            }
        }
    }

    Ok(())
}

fn load_candidates(path: &Path) -> Result<Vec<CandidateMark>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid candidate list in {}", path.display()))
}

async fn run_check(
    base_url: Option<String>,
    query: &SearchQuery,
    candidates_file: Option<&Path>,
    config: &RiskConfig,
    format: OutputFormat,
) -> Result<()> {
    let query = validate(query).context("Invalid query")?;

    let candidates = match candidates_file {
        Some(path) => load_candidates(path)?,
        None => {
            let backend = backend(base_url)?;
            let results = backend
                .search(&query)
                .await
                .with_context(|| format!("{} search failed", backend.name()))?;
            info!(total = results.total, returned = results.candidates.len(), "Retrieved candidates");
            results.candidates
        }
    };

    let before = candidates.len();
    let candidates = CandidateFilter::from_query(&query).apply(candidates);
    debug!(before, after = candidates.len(), "Applied office and class filter");

    let assessment = assess(&query, candidates, config);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("{}", summarize_assessment(&assessment));
    for (i, conflict) in assessment.conflicts.iter().enumerate() {
        let mark = &conflict.candidate;
        println!("\n{}. {} ({})", i + 1, mark.name, mark.id);
        println!(
            "   Office: {} | Classes: {:?} | Status: {:?}",
            office_name(&mark.office),
            mark.nice_classes,
            mark.status
        );
        println!(
            "   Similarity: {}% (phonetic {}%, visual {}%)",
            conflict.similarity.combined, conflict.similarity.phonetic, conflict.similarity.visual
        );
        println!("   {}", summarize_candidate(conflict));
        for explanation in explain_candidate(conflict, &query.mark_text) {
            println!("   - {}", explanation.summary);
        }
    }

    println!("\n---");
    println!(
        "Considered: {} | Critical: {} | Medium: {} | Low: {}",
        assessment.total_candidates,
        assessment.counts.critical,
        assessment.counts.medium,
        assessment.counts.low
    );
    if assessment.vendor_false_positives > 0 {
        println!("Discarded vendor false positives: {}", assessment.vendor_false_positives);
    }

    Ok(())
}

fn run_variants(name: &str, max: usize, format: OutputFormat) -> Result<()> {
    let variants = generate_variants(name, max);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&variants)?),
        OutputFormat::Text => {
            for variant in &variants {
                println!("{:<24} {:?}: {}", variant.term, variant.kind, variant.rationale);
            }
        }
    }

    Ok(())
}

async fn run_info(base_url: Option<String>, mid: u64) -> Result<()> {
    let backend = backend(base_url)?;
    let mark = backend
        .info(&InfoRequest::Mid(mid))
        .await
        .with_context(|| format!("Lookup of mark {} failed", mid))?;

    println!("{}", serde_json::to_string_pretty(&mark)?);
    Ok(())
}
