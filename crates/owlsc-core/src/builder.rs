//! Authoring helper producing triple sets in the private namespace.
//!
//! IRIs are laid out as paths: subclasses and individuals nest under the IRI
//! of their parent class, relations live under `<ns>/relation/`.

use std::collections::{BTreeSet, HashMap};

use crate::term::{RawTriple, Term};
use crate::vocab::{OWL_CLASS, RDFS_LABEL, RDFS_SUBCLASS_OF, RDF_TYPE};

const LABEL_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct OntologyBuilder {
    namespace: String,
    class_iris: HashMap<String, String>,
    triples: Vec<RawTriple>,
}

impl OntologyBuilder {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.trim_end_matches('/').to_string(),
            class_iris: HashMap::new(),
            triples: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Top-level class at `<ns>/<name>`.
    pub fn class(&mut self, name: &str) -> &mut Self {
        let iri = format!("{}/{name}", self.namespace);
        self.declare_class(name, iri);
        self
    }

    /// Class nested under `parent`; an unknown parent is placed at top level.
    pub fn subclass(&mut self, parent: &str, name: &str) -> &mut Self {
        let parent_iri = self.class_iri(parent);
        let iri = format!("{parent_iri}/{name}");
        self.declare_class(name, iri.clone());
        self.triples
            .push(RawTriple::iris(&iri, RDFS_SUBCLASS_OF, &parent_iri));
        self
    }

    pub fn individual(&mut self, class: &str, name: &str) -> &mut Self {
        let class_iri = self.class_iri(class);
        let iri = format!("{class_iri}/{name}");
        self.triples.push(RawTriple::iris(&iri, RDF_TYPE, &class_iri));
        self.label(&iri, name);
        self
    }

    /// `subject relation object`, with `subject`/`object` given as
    /// namespace-relative paths (e.g. `Thing/Animal/Rex`).
    pub fn relation(&mut self, subject: &str, relation: &str, object: &str) -> &mut Self {
        let triple = RawTriple::iris(
            &self.path_iri(subject),
            &format!("{}/relation/{relation}", self.namespace),
            &self.path_iri(object),
        );
        self.triples.push(triple);
        self
    }

    /// Retract every triple whose subject or object IRI contains `fragment`.
    /// Returns the number of triples removed.
    pub fn remove(&mut self, fragment: &str) -> usize {
        let before = self.triples.len();
        let mentions = |term: &Term| term.as_iri().is_some_and(|iri| iri.contains(fragment));
        self.triples
            .retain(|t| !mentions(&t.subject) && !mentions(&t.object));
        self.class_iris.retain(|_, iri| !iri.contains(fragment));
        before - self.triples.len()
    }

    /// Sorted namespace-relative paths of every IRI used as subject or object.
    pub fn nodes(&self) -> Vec<String> {
        let prefix = format!("{}/", self.namespace);
        self.triples
            .iter()
            .flat_map(|t| [&t.subject, &t.object])
            .filter_map(Term::as_iri)
            .filter_map(|iri| iri.strip_prefix(&prefix))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn triples(&self) -> &[RawTriple] {
        &self.triples
    }

    pub fn build(&self) -> Vec<RawTriple> {
        self.triples.clone()
    }

    fn declare_class(&mut self, name: &str, iri: String) {
        self.triples.push(RawTriple::iris(&iri, RDF_TYPE, OWL_CLASS));
        self.label(&iri, name);
        self.class_iris.insert(name.to_string(), iri);
    }

    fn label(&mut self, iri: &str, name: &str) {
        self.triples.push(RawTriple::new(
            Term::iri(iri),
            Term::iri(RDFS_LABEL),
            Term::literal(name, Some(LABEL_LANGUAGE)),
        ));
    }

    fn class_iri(&self, name: &str) -> String {
        self.class_iris
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.path_iri(name))
    }

    fn path_iri(&self, path: &str) -> String {
        format!("{}/{path}", self.namespace)
    }
}
