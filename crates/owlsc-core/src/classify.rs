//! Triple classification: classes, individuals and custom relations.
//!
//! The classifier is a pure function of the triple slice and the options.
//! Parent resolution scans triples in source order and keeps the *first*
//! match; with [`ParentMatch::Containment`] a name that is a substring of
//! another entity's name can pick up that entity's parent.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::{ClassifierOptions, ParentMatch};
use crate::naming::{class_identifier, individual_identifier};
use crate::term::{RawTriple, Term};
use crate::vocab::{OWL_CLASS, RDFS_LABEL, RDFS_SUBCLASS_OF, RDF_TYPE, ROOT_CLASS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedClass {
    /// Name the class is known by: its first label, else its IRI segment.
    pub local_name: String,
    pub display_label: String,
    pub language: Option<String>,
    pub parent_local_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIndividual {
    pub local_name: String,
    pub owner_class_local_name: Option<String>,
}

/// A statement whose predicate lives in the private namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRelationTriple {
    pub object_local_name: String,
    pub predicate_local_name: String,
    pub subject_local_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedModel {
    pub classes: Vec<ClassifiedClass>,
    pub individuals: Vec<ClassifiedIndividual>,
    pub relations: Vec<CustomRelationTriple>,
}

impl ClassifiedModel {
    pub fn is_class(&self, name: &str) -> bool {
        let id = class_identifier(name);
        self.classes
            .iter()
            .any(|c| class_identifier(&c.local_name) == id)
    }

    /// Identifier a relation endpoint refers to: the class identifier when
    /// `name` names a known class, otherwise the individual identifier.
    pub fn endpoint_identifier(&self, name: &str) -> String {
        if self.is_class(name) {
            class_identifier(name)
        } else {
            individual_identifier(name)
        }
    }
}

/// Classify `triples` into a [`ClassifiedModel`].
pub fn classify(triples: &[RawTriple], options: &ClassifierOptions) -> ClassifiedModel {
    let classes = collect_classes(triples, options.parent_match);
    let class_names: HashSet<&str> = classes.iter().map(|c| c.local_name.as_str()).collect();

    let individuals: Vec<ClassifiedIndividual> = typed_subjects(triples)
        .into_iter()
        .filter(|name| !class_names.contains(name))
        .map(|name| ClassifiedIndividual {
            local_name: name.to_string(),
            owner_class_local_name: individual_parent(triples, name, options.parent_match)
                .map(str::to_string),
        })
        .collect();

    let class_ids: HashSet<String> = classes.iter().map(|c| class_identifier(&c.local_name)).collect();
    for individual in &individuals {
        let id = individual_identifier(&individual.local_name);
        if class_ids.contains(&id) {
            tracing::debug!(
                individual = %individual.local_name,
                identifier = %id,
                "individual identifier coincides with a class identifier"
            );
        }
    }

    let relations = custom_relations(triples, &options.namespace);

    tracing::debug!(
        classes = classes.len(),
        individuals = individuals.len(),
        relations = relations.len(),
        "classified triple set"
    );

    ClassifiedModel {
        classes,
        individuals,
        relations,
    }
}

/// Local names of every `rdf:type` subject, first occurrence order.
fn typed_subjects(triples: &[RawTriple]) -> Vec<&str> {
    let mut seen = HashSet::new();
    triples
        .iter()
        .filter(|t| t.predicate_iri() == Some(RDF_TYPE))
        .filter_map(|t| t.subject.local_name())
        .filter(|name| seen.insert(*name))
        .collect()
}

fn collect_classes(triples: &[RawTriple], parent_match: ParentMatch) -> Vec<ClassifiedClass> {
    let mut seen_iris = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut out = Vec::new();

    for t in triples {
        if t.predicate_iri() != Some(RDF_TYPE) || t.object.as_iri() != Some(OWL_CLASS) {
            continue;
        }
        // Anonymous classes (restrictions, unions) have no name to project.
        let Term::Iri(iri) = &t.subject else {
            continue;
        };
        if !seen_iris.insert(iri.as_str()) {
            continue;
        }

        let (label, language) = match first_label(triples, &t.subject) {
            Some((label, language)) => (label.to_string(), language.map(str::to_string)),
            None => match t.subject.local_name() {
                Some(local) => (local.to_string(), None),
                None => continue,
            },
        };
        if !seen_names.insert(label.clone()) {
            tracing::debug!(class = %label, iri = %iri, "duplicate class label, keeping first");
            continue;
        }

        out.push(ClassifiedClass {
            local_name: label.clone(),
            display_label: label,
            language,
            parent_local_name: None,
        });
    }

    let names: HashSet<String> = out.iter().map(|c| c.local_name.clone()).collect();
    for class in &mut out {
        class.parent_local_name = class_parent(triples, &class.local_name, parent_match)
            .filter(|parent| {
                let known = names.contains(*parent) && *parent != class.local_name;
                if !known {
                    tracing::debug!(
                        class = %class.local_name,
                        parent = %parent,
                        "dropping parent that is not a classified class"
                    );
                }
                known
            })
            .map(str::to_string);
    }

    out
}

fn first_label<'a>(triples: &'a [RawTriple], subject: &Term) -> Option<(&'a str, Option<&'a str>)> {
    triples
        .iter()
        .filter(|t| &t.subject == subject && t.predicate_iri() == Some(RDFS_LABEL))
        .find_map(|t| t.object.as_literal())
        .map(|lit| (lit.lexical.as_str(), lit.language.as_deref()))
}

fn class_parent<'a>(
    triples: &'a [RawTriple],
    name: &str,
    parent_match: ParentMatch,
) -> Option<&'a str> {
    if name == ROOT_CLASS {
        return None;
    }
    triples
        .iter()
        .filter(|t| t.predicate_iri() == Some(RDFS_SUBCLASS_OF))
        .find(|t| {
            t.subject
                .local_name()
                .is_some_and(|s| parent_match.matches(s, name))
                && t.object.local_name().is_some()
        })
        .and_then(|t| t.object.local_name())
}

/// Object of the first IRI-to-IRI triple about `name`, whatever its predicate.
fn individual_parent<'a>(
    triples: &'a [RawTriple],
    name: &str,
    parent_match: ParentMatch,
) -> Option<&'a str> {
    triples
        .iter()
        .find(|t| {
            t.subject
                .local_name()
                .is_some_and(|s| parent_match.matches(s, name))
                && t.object.local_name().is_some()
        })
        .and_then(|t| t.object.local_name())
}

fn custom_relations(triples: &[RawTriple], namespace: &str) -> Vec<CustomRelationTriple> {
    triples
        .iter()
        .filter_map(|t| {
            let predicate = t.predicate_iri()?;
            if !predicate.contains(namespace)
                || predicate == RDF_TYPE
                || predicate == RDFS_SUBCLASS_OF
            {
                return None;
            }
            Some(CustomRelationTriple {
                object_local_name: t.object.local_name()?.to_string(),
                predicate_local_name: t.predicate.local_name()?.to_string(),
                subject_local_name: t.subject.local_name()?.to_string(),
            })
        })
        .collect()
}
