use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::InMemoryCatalog;
use crate::cli::OutputFormat;
use crate::core::library::SignatureLibrary;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List library releases in the catalog
    List {
        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Only show this library (e.g. "PFAM")
        #[arg(long)]
        library: Option<SignatureLibrary>,
    },

    /// Show every entry for a signature accession
    Show {
        /// Signature accession (e.g. "PF00001")
        #[arg(required = true)]
        accession: String,

        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the accession is unknown.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, library } => {
            let catalog = InMemoryCatalog::load_from_file(&catalog)?;
            if verbose {
                eprintln!("Loaded catalog with {} signatures", catalog.len());
            }
            list_releases(&catalog, library, format)
        }
        CatalogCommands::Show { accession, catalog } => {
            let catalog = InMemoryCatalog::load_from_file(&catalog)?;
            show_signature(&catalog, &accession, format)
        }
    }
}

fn list_releases(
    catalog: &InMemoryCatalog,
    library: Option<SignatureLibrary>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let releases: Vec<_> = catalog
        .releases()
        .into_iter()
        .filter(|(release, _)| library.map_or(true, |lib| release.library == lib))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{:<24} {:<12} {:>10} Lookup", "Library", "Version", "Signatures");
            println!("{}", "-".repeat(60));
            for (release, count) in &releases {
                let lookup = if release.library.is_locally_computed() {
                    "local only"
                } else if release.library.is_lookup_convertible() {
                    "yes"
                } else {
                    "no"
                };
                println!(
                    "{:<24} {:<12} {:>10} {}",
                    release.library.name(),
                    release.version,
                    count,
                    lookup
                );
            }
            println!("\nTotal: {} releases", releases.len());
        }
        OutputFormat::Json => {
            let output: Vec<_> = releases
                .iter()
                .map(|(release, count)| {
                    serde_json::json!({
                        "library": release.library,
                        "version": release.version,
                        "signatures": count,
                        "locally_computed": release.library.is_locally_computed(),
                        "lookup_convertible": release.library.is_lookup_convertible(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("library\tversion\tsignatures");
            for (release, count) in &releases {
                println!("{}\t{}\t{}", release.library, release.version, count);
            }
        }
    }

    Ok(())
}

fn show_signature(
    catalog: &InMemoryCatalog,
    accession: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let signatures = catalog.find_by_accession(accession);
    if signatures.is_empty() {
        anyhow::bail!("Signature '{accession}' not found in catalog");
    }

    match format {
        OutputFormat::Text => {
            for sig in &signatures {
                println!("{} ({})", sig.accession, sig.release);
                if let Some(name) = &sig.name {
                    println!("  Name: {name}");
                }
                if let Some(description) = &sig.description {
                    println!("  Description: {description}");
                }
            }
            if signatures.len() > 1 {
                let mut releases: Vec<_> = signatures.iter().map(|s| &s.release).collect();
                releases.sort_by_key(|r| (r.library, r.version.clone()));
                if releases.windows(2).any(|w| w[0] == w[1]) {
                    println!("\nWarning: the same release holds this signature more than once");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&signatures)?);
        }
        OutputFormat::Tsv => {
            println!("accession\tlibrary\tversion\tname");
            for sig in &signatures {
                println!(
                    "{}\t{}\t{}\t{}",
                    sig.accession,
                    sig.library(),
                    sig.version(),
                    sig.name.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
