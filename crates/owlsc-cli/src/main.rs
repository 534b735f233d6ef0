//! owlsc CLI
//!
//! Command-line front end for the OWL → SC projection:
//! - `scs`: ingest an ontology file and emit SCs text
//! - `inspect`: show the classified model as JSON
//! - `project`: dry-run the graph store projection against an in-memory store

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use owlsc_core::{
    classify, scs, ClassifiedModel, GraphStoreProjector, MemoryGraphStore, OntologySource,
    OwlScConfig, ParentMatch, ProjectionReport,
};
use owlsc_ingest_rdfowl::RdfFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "owlsc")]
#[command(author, version, about = "owlsc: OWL/RDF ontologies as SC semantic networks")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an ontology (.ttl/.nt/.nq/.trig/.owl/.rdf) into SCs text.
    Scs {
        /// Input ontology file
        input: PathBuf,
        /// Output SCs file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// JSON run configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Match parents on exact local names instead of containment
        #[arg(long)]
        exact_parents: bool,
    },

    /// Print the classified model (classes, individuals, relations) as JSON.
    Inspect {
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Project into an in-memory graph store and print the report.
    Project {
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scs {
            input,
            out,
            config,
            exact_parents,
        } => {
            let mut config = load_config(config.as_deref())?;
            if exact_parents {
                config.classifier.parent_match = ParentMatch::Exact;
            }
            cmd_scs(&input, out.as_deref(), &config)?;
        }
        Commands::Inspect { input, config } => {
            cmd_inspect(&input, &load_config(config.as_deref())?)?;
        }
        Commands::Project { input, config } => {
            cmd_project(&input, &load_config(config.as_deref())?)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<OwlScConfig> {
    match path {
        Some(path) => Ok(OwlScConfig::load(path)?),
        None => Ok(OwlScConfig::default()),
    }
}

fn classify_file(input: &Path, config: &OwlScConfig) -> Result<ClassifiedModel> {
    let triples = RdfFile::new(input).triples()?;
    let model = classify(&triples, &config.classifier);
    eprintln!(
        "  {} {} triples: {} classes, {} individuals, {} relations",
        "→".yellow(),
        triples.len(),
        model.classes.len(),
        model.individuals.len(),
        model.relations.len()
    );
    Ok(model)
}

fn cmd_scs(input: &Path, out: Option<&Path>, config: &OwlScConfig) -> Result<()> {
    eprintln!("{} {}", "Translating".green().bold(), input.display());

    let model = classify_file(input, config)?;
    let text = scs::encode(&model);

    match out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(out, &text).with_context(|| format!("failed to write {}", out.display()))?;
            eprintln!("  {} {}", "→".cyan(), out.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_inspect(input: &Path, config: &OwlScConfig) -> Result<()> {
    let model = classify_file(input, config)?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}

fn cmd_project(input: &Path, config: &OwlScConfig) -> Result<()> {
    eprintln!("{} {}", "Projecting".green().bold(), input.display());

    let model = classify_file(input, config)?;
    let mut projector = GraphStoreProjector::new(MemoryGraphStore::new(), config.projector.clone());
    let report = projector.project(&model);
    let store = projector.into_client();

    print_report(&report);
    eprintln!(
        "  {} store: {} nodes, {} links, {} edges",
        "→".cyan(),
        store.node_count(),
        store.link_count(),
        store.edge_count()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_report(report: &ProjectionReport) {
    eprintln!(
        "  {} {} classes, {} individuals, {} new nodes",
        "→".cyan(),
        report.classes,
        report.individuals,
        report.created_nodes
    );
    eprintln!(
        "  {} {} hierarchy edges, {} memberships, {} relations",
        "→".cyan(),
        report.hierarchy_edges,
        report.memberships,
        report.relations
    );
    if report.repaired > 0 {
        eprintln!("  {} {} existing nodes completed", "→".yellow(), report.repaired);
    }
    if report.skipped > 0 {
        eprintln!("  {} {} steps skipped", "!".red().bold(), report.skipped);
        for warning in &report.warnings {
            eprintln!("    {} {warning}", "-".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_parents_flag_parses() {
        let cli = Cli::try_parse_from(["owlsc", "-vv", "scs", "onto.ttl", "--exact-parents"])
            .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scs {
                input,
                out,
                exact_parents,
                ..
            } => {
                assert_eq!(input, PathBuf::from("onto.ttl"));
                assert!(out.is_none());
                assert!(exact_parents);
            }
            _ => panic!("expected scs command"),
        }
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn scs_command_writes_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("tiny.nt");
        fs::write(
            &input,
            "<http://my.valeksdelal.meeew/Thing> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .\n",
        )
        .expect("write input");
        let out = dir.path().join("out/tiny.scs");

        cmd_scs(&input, Some(&out), &OwlScConfig::default()).expect("scs");

        let text = fs::read_to_string(&out).expect("read output");
        assert!(text.starts_with("concept_thing<-sc_node_not_relation;;\n"));
    }
}
