//! IRIs and store keynodes the projection depends on.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

/// Namespace under which custom relations (and authored entities) live.
pub const DEFAULT_NAMESPACE: &str = "http://my.valeksdelal.meeew/";

/// Reserved root class; never has a parent.
pub const ROOT_CLASS: &str = "Thing";

// Keynodes expected in the target semantic network.
pub const SC_NODE_NOT_RELATION: &str = "sc_node_not_relation";
pub const SC_NODE_NOROLE_RELATION: &str = "sc_node_norole_relation";
pub const SC_NODE_ROLE_RELATION: &str = "sc_node_role_relation";
pub const NREL_MAIN_IDTF: &str = "nrel_main_idtf";

pub fn lang_keynode(language: &str) -> String {
    format!("lang_{language}")
}
