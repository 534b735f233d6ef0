//! SCs text encoding of a classified model.
//!
//! Statement order: class declarations with identifiers, class hierarchy,
//! individual declarations with identifiers, class membership, then relation
//! kind declarations interleaved with relation instances. Every element is
//! declared before a later statement refers to it.

use crate::classify::ClassifiedModel;
use crate::naming::{
    class_identifier, individual_identifier, relation_identifier, relation_kind, RelationKind,
};
use crate::vocab::{NREL_MAIN_IDTF, SC_NODE_NOROLE_RELATION, SC_NODE_NOT_RELATION, SC_NODE_ROLE_RELATION};

/// Encode `model` as SCs, one `;;`-terminated statement per line.
pub fn encode(model: &ClassifiedModel) -> String {
    let mut output = String::new();

    for class in &model.classes {
        let id = class_identifier(&class.local_name);
        output.push_str(&declaration(&id));
        output.push_str(&identifier(&id, &class.display_label, class.language.as_deref()));
    }

    for class in &model.classes {
        if let Some(parent) = &class.parent_local_name {
            output.push_str(&format!(
                "{}->{};;\n",
                class_identifier(parent),
                class_identifier(&class.local_name)
            ));
        }
    }

    for individual in &model.individuals {
        let id = individual_identifier(&individual.local_name);
        output.push_str(&declaration(&id));
        output.push_str(&identifier(&id, &individual.local_name, None));
    }

    for individual in &model.individuals {
        if let Some(owner) = &individual.owner_class_local_name {
            output.push_str(&format!(
                "{}->{};;\n",
                class_identifier(owner),
                individual_identifier(&individual.local_name)
            ));
        }
    }

    for relation in &model.relations {
        let predicate = relation_identifier(&relation.predicate_local_name);
        match relation_kind(&predicate) {
            RelationKind::NonRole => {
                output.push_str(&format!("{predicate}<-{SC_NODE_NOROLE_RELATION};;\n"))
            }
            RelationKind::Role => {
                output.push_str(&format!("{predicate}<-{SC_NODE_ROLE_RELATION};;\n"))
            }
            RelationKind::Unclassified => {}
        }
        // Object first: `object => predicate: subject`.
        output.push_str(&format!(
            "{}=>{}: {};;\n",
            model.endpoint_identifier(&relation.object_local_name),
            predicate,
            model.endpoint_identifier(&relation.subject_local_name)
        ));
    }

    output
}

fn declaration(id: &str) -> String {
    format!("{id}<-{SC_NODE_NOT_RELATION};;\n")
}

fn identifier(id: &str, label: &str, language: Option<&str>) -> String {
    match language {
        Some(lang) => format!("{id}=>{NREL_MAIN_IDTF}:[{label}](*<-lang_{lang};;*);;\n"),
        None => format!("{id}=>{NREL_MAIN_IDTF}:[{label}];;\n"),
    }
}
