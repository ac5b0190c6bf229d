use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::InMemoryCatalog;
use crate::cli::OutputFormat;
use crate::core::protein::Protein;
use crate::matching::converter::ConverterRegistry;
use crate::matching::engine::{ReconcileSummary, ReconciliationEngine};
use crate::matching::jobs::JobRequest;
use crate::parsing;

#[derive(Args)]
pub struct ReconcileArgs {
    /// Proteins: FASTA (checksums computed from sequences), or TSV/CSV of id and checksum
    #[arg(short, long, required = true)]
    pub proteins: PathBuf,

    /// Lookup dump with one `checksum<TAB>hit` per line (may be gzipped)
    #[arg(long, required = true)]
    pub hits: PathBuf,

    /// Signature catalog JSON file
    #[arg(short, long, required = true)]
    pub catalog: PathBuf,

    /// Analysis job and release to use, as NAME=VERSION (repeatable).
    /// Without any, hits from every release are accepted
    #[arg(short, long = "job", value_name = "NAME=VERSION")]
    pub jobs: Vec<JobRequest>,

    /// Only report proteins that received at least one match
    #[arg(long)]
    pub matched_only: bool,
}

/// Execute reconcile subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or the job selection is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReconcileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut proteins = parsing::parse_protein_file(&args.proteins)?;
    let entries = parsing::hits::parse_hits_file(&args.hits)?;
    let catalog = InMemoryCatalog::load_from_file(&args.catalog)?;

    if verbose {
        let hit_count: usize = entries.iter().map(|e| e.hits.len()).sum();
        eprintln!(
            "Loaded {} proteins, {} hits for {} sequences, {} catalog signatures",
            proteins.len(),
            hit_count,
            entries.len(),
            catalog.len()
        );
    }

    if catalog.is_empty() {
        eprintln!("Warning: Catalog is empty, no hits can be resolved.");
    }

    let jobs = (!args.jobs.is_empty()).then_some(args.jobs.as_slice());
    let registry = ConverterRegistry::standard();
    if verbose {
        eprintln!("Using match converters for {} libraries", registry.len());
    }
    let engine = ReconciliationEngine::new(&catalog).with_converters(registry);
    let summary = engine.populate_protein_matches(&mut proteins, &entries, jobs)?;

    let reported: Vec<&Protein> = proteins
        .iter()
        .filter(|p| !args.matched_only || !p.matches.is_empty())
        .collect();

    match format {
        OutputFormat::Text => print_text(&reported, &summary),
        OutputFormat::Json => print_json(&reported, &summary)?,
        OutputFormat::Tsv => print_tsv(&reported),
    }

    Ok(())
}

fn print_text(proteins: &[&Protein], summary: &ReconcileSummary) {
    println!("Reconciliation Results");
    println!("{}", "=".repeat(60));

    for protein in proteins {
        println!(
            "\n{} ({} match{})",
            protein.label(),
            protein.matches.len(),
            if protein.matches.len() == 1 { "" } else { "es" }
        );
        for m in &protein.matches {
            let header = format!(
                "  {} {}  {} ({})",
                m.signature.library(),
                m.signature.version(),
                m.accession(),
                m.signature.name.as_deref().unwrap_or("-")
            );
            if m.locations.is_empty() {
                println!("{header}  no location");
            }
            for loc in &m.locations {
                println!("{header}  {}-{} {}", loc.start, loc.end, loc.hmm_bounds);
            }
        }
    }

    println!("\nSummary:");
    println!("  Hits processed: {}", summary.records);
    println!("  Attached: {}", summary.attached);
    println!("  Excluded (computed locally): {}", summary.excluded);
    println!("  Release not requested: {}", summary.version_rejected);
    println!("  Not in catalog: {}", summary.not_in_catalog);
    println!("  Ambiguous in catalog: {}", summary.ambiguous);
    println!("  Library not convertible: {}", summary.not_convertible);
    println!("  No converter: {}", summary.no_converter);
    println!("  Declined by converter: {}", summary.declined);
    println!("  Unknown protein: {}", summary.unknown_protein);
    println!("  Unparseable: {}", summary.unparseable);
}

fn print_json(proteins: &[&Protein], summary: &ReconcileSummary) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "proteins": proteins,
        "summary": summary,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(proteins: &[&Protein]) {
    println!("protein\tchecksum\tlibrary\tversion\taccession\tstart\tend\tscore\tevalue\thmm_bounds");
    for protein in proteins {
        for m in &protein.matches {
            if m.locations.is_empty() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t-\t-\t-\t-\t-",
                    protein.label(),
                    protein.checksum,
                    m.signature.library(),
                    m.signature.version(),
                    m.accession(),
                );
            }
            for loc in &m.locations {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    protein.label(),
                    protein.checksum,
                    m.signature.library(),
                    m.signature.version(),
                    m.accession(),
                    loc.start,
                    loc.end,
                    format_optional(loc.score),
                    format_optional(loc.evalue),
                    loc.hmm_bounds,
                );
            }
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
