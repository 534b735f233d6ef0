//! RDF term model consumed by the classifier.
//!
//! Triples arrive from an ontology source already split into terms; every
//! component is one of three closed variants and is inspected by matching,
//! never by probing its runtime type.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Plain or language-tagged literal.
    pub fn literal(lexical: impl Into<String>, language: Option<&str>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: language.map(str::to_string),
        })
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::BlankNode(_) | Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Iri(_) | Term::BlankNode(_) => None,
        }
    }

    /// Final path segment of an IRI.
    ///
    /// Returns `None` for blank nodes, literals and IRIs without a usable
    /// segment (e.g. `http://example.org/`).
    pub fn local_name(&self) -> Option<&str> {
        self.as_iri().and_then(local_name)
    }
}

/// Segment after the last `/` or `#` of `iri`, if non-empty.
pub fn local_name(iri: &str) -> Option<&str> {
    let local = iri.rsplit(['#', '/']).next().unwrap_or(iri);
    if local.is_empty() || local.len() == iri.len() {
        None
    } else {
        Some(local)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.lexical))?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{lang}")
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// One (subject, predicate, object) statement as supplied by the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTriple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl RawTriple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Triple whose three components are IRIs.
    pub fn iris(subject: &str, predicate: &str, object: &str) -> Self {
        Self::new(Term::iri(subject), Term::iri(predicate), Term::iri(object))
    }

    pub fn predicate_iri(&self) -> Option<&str> {
        self.predicate.as_iri()
    }
}

/// N-Triples line (terminated with ` .`).
impl fmt::Display for RawTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
