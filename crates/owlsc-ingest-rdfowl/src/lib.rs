//! RDF/OWL ingestion (ontology source for owlsc).
//!
//! Uses **Sophia** to parse common RDF serializations into the owlsc term
//! model:
//! - N-Triples (`.nt`)
//! - Turtle (`.ttl`)
//! - N-Quads (`.nq`)
//! - TriG (`.trig`)
//! - RDF/XML (`.rdf`, `.owl`, `.xml`)
//!
//! Datasets are flattened: graph names of quads are dropped. Statements
//! that cannot be expressed as plain triples (RDF-star, variables, literal
//! or blank predicates) are skipped.

use anyhow::{anyhow, Context, Result};
use owlsc_core::{OntologySource, RawTriple, Term as OwlTerm};
use sophia::api::prelude::*;
use sophia::api::term::TermKind;
use std::convert::Infallible;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    NQuads,
    TriG,
    RdfXml,
}

impl RdfFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "nt" | "ntriples" => Ok(RdfFormat::NTriples),
            "ttl" | "turtle" => Ok(RdfFormat::Turtle),
            "nq" | "nquads" => Ok(RdfFormat::NQuads),
            "trig" => Ok(RdfFormat::TriG),
            "rdf" | "owl" | "xml" => Ok(RdfFormat::RdfXml),
            other => Err(anyhow!("unsupported RDF format: .{other}")),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "N-Triples",
            RdfFormat::Turtle => "Turtle",
            RdfFormat::NQuads => "N-Quads",
            RdfFormat::TriG => "TriG",
            RdfFormat::RdfXml => "RDF/XML",
        }
    }
}

fn convert_term<T: sophia::api::term::Term>(term: T) -> Option<OwlTerm> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| OwlTerm::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| OwlTerm::BlankNode(id.as_str().to_string())),
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            // Language-tagged literals carry rdf:langString; keep just the tag.
            let datatype = match language {
                Some(_) => None,
                None => term.datatype().map(|dt| dt.as_str().to_string()),
            };
            Some(OwlTerm::Literal(owlsc_core::Literal {
                lexical,
                datatype,
                language,
            }))
        }
        TermKind::Triple | TermKind::Variable => None,
    }
}

fn convert_statement<S, P, O>(s: S, p: P, o: O) -> Option<RawTriple>
where
    S: sophia::api::term::Term,
    P: sophia::api::term::Term,
    O: sophia::api::term::Term,
{
    let predicate = convert_term(p)?;
    predicate.as_iri()?;
    Some(RawTriple::new(convert_term(s)?, predicate, convert_term(o)?))
}

fn collect_triples<S: TripleSource>(mut source: S, format: RdfFormat) -> Result<Vec<RawTriple>> {
    let mut out = Vec::new();
    let mut skipped = 0usize;
    source
        .try_for_each_triple(|t| -> std::result::Result<(), Infallible> {
            match convert_statement(t.s(), t.p(), t.o()) {
                Some(triple) => out.push(triple),
                None => skipped += 1,
            }
            Ok(())
        })
        .map_err(|e| anyhow!("failed to parse {}: {e}", format.name()))?;
    log_parsed(format, out.len(), skipped);
    Ok(out)
}

fn collect_quads<S: QuadSource>(mut source: S, format: RdfFormat) -> Result<Vec<RawTriple>> {
    let mut out = Vec::new();
    let mut skipped = 0usize;
    source
        .try_for_each_quad(|q| -> std::result::Result<(), Infallible> {
            match convert_statement(q.s(), q.p(), q.o()) {
                Some(triple) => out.push(triple),
                None => skipped += 1,
            }
            Ok(())
        })
        .map_err(|e| anyhow!("failed to parse {}: {e}", format.name()))?;
    log_parsed(format, out.len(), skipped);
    Ok(out)
}

fn log_parsed(format: RdfFormat, triples: usize, skipped: usize) {
    if skipped > 0 {
        tracing::debug!(format = format.name(), skipped, "skipped non-triple statements");
    }
    tracing::debug!(format = format.name(), triples, "parsed RDF");
}

/// Parse `bytes` in `format`, preserving statement order.
pub fn parse_triples(bytes: &[u8], format: RdfFormat) -> Result<Vec<RawTriple>> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));

    match format {
        RdfFormat::NTriples => {
            collect_triples(sophia::turtle::parser::nt::parse_bufread(reader), format)
        }
        RdfFormat::Turtle => {
            collect_triples(sophia::turtle::parser::turtle::parse_bufread(reader), format)
        }
        RdfFormat::NQuads => collect_quads(sophia::turtle::parser::nq::parse_bufread(reader), format),
        RdfFormat::TriG => collect_quads(sophia::turtle::parser::trig::parse_bufread(reader), format),
        RdfFormat::RdfXml => collect_triples(sophia::xml::parser::parse_bufread(reader), format),
    }
}

pub fn parse_triples_from_file(path: &Path) -> Result<Vec<RawTriple>> {
    let format = RdfFormat::from_path(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_triples(&bytes, format).with_context(|| format!("in {}", path.display()))
}

/// Ontology file on disk; the format follows the extension.
#[derive(Debug, Clone)]
pub struct RdfFile {
    path: PathBuf,
}

impl RdfFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OntologySource for RdfFile {
    type Error = anyhow::Error;

    fn triples(&self) -> Result<Vec<RawTriple>> {
        parse_triples_from_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owlsc_core::vocab::{RDFS_LABEL, RDF_TYPE};

    const SAMPLE_NT: &str = r#"
<http://example.org/Steel> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Metal> .
<http://example.org/Metal> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/Material> .
<http://example.org/Steel> <http://www.w3.org/2000/01/rdf-schema#label> "Steel"@en .
_:b0 <http://example.org/weight> "7.8"^^<http://www.w3.org/2001/XMLSchema#decimal> .
"#;

    #[test]
    fn parses_ntriples_in_order() {
        let triples = parse_triples(SAMPLE_NT.as_bytes(), RdfFormat::NTriples).expect("triples");

        assert_eq!(triples.len(), 4);
        assert_eq!(
            triples[0],
            RawTriple::iris(
                "http://example.org/Steel",
                RDF_TYPE,
                "http://example.org/Metal"
            )
        );
        assert_eq!(triples[2].predicate_iri(), Some(RDFS_LABEL));
        assert_eq!(triples[2].object, OwlTerm::literal("Steel", Some("en")));
    }

    #[test]
    fn keeps_datatypes_and_blank_nodes() {
        let triples = parse_triples(SAMPLE_NT.as_bytes(), RdfFormat::NTriples).expect("triples");

        assert!(matches!(triples[3].subject, OwlTerm::BlankNode(_)));
        let lit = triples[3].object.as_literal().expect("literal");
        assert_eq!(lit.lexical, "7.8");
        assert_eq!(
            lit.datatype.as_deref(),
            Some("http://www.w3.org/2001/XMLSchema#decimal")
        );
        assert_eq!(lit.language, None);
    }

    #[test]
    fn parses_trig_flattening_graphs() {
        let trig = r#"
@prefix ex: <http://example.org/> .
ex:g1 { ex:a ex:knows ex:b . }
ex:c ex:knows ex:d .
"#;
        let triples = parse_triples(trig.as_bytes(), RdfFormat::TriG).expect("trig");
        assert_eq!(triples.len(), 2);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = parse_triples(b"<http://a> <http://b> .", RdfFormat::NTriples).unwrap_err();
        assert!(err.to_string().contains("N-Triples"));
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            RdfFormat::from_path(Path::new("onto.OWL")).unwrap(),
            RdfFormat::RdfXml
        );
        assert_eq!(
            RdfFormat::from_path(Path::new("a.ttl")).unwrap(),
            RdfFormat::Turtle
        );
        assert!(RdfFormat::from_path(Path::new("a.json")).is_err());
    }
}
