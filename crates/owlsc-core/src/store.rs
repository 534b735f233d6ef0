//! Graph store contract used by the projector, plus an in-process store.
//!
//! Every element (node, content link, edge) is addressed by a [`Handle`];
//! edges may target other edges, which is what reified relations rely on.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(pub u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type applied to a node when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Class,
    Individual,
    NonRoleRelation,
    RoleRelation,
    Relation,
    Keynode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Connective (common) edge between two elements.
    Common,
    /// Membership (access) edge from a set to an element.
    Access,
}

/// Outcome of a find-or-create lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub handle: Handle,
    pub created: bool,
}

/// Synchronous, exclusively owned connection to a semantic graph store.
///
/// Nodes are bound to system identifiers; looking an identifier up twice
/// must yield the same handle.
pub trait GraphStoreClient {
    /// Return the node bound to `identifier`, creating and binding one if absent.
    fn find_or_create_node(
        &mut self,
        identifier: &str,
        kind: NodeKind,
    ) -> Result<Resolved, StoreError>;

    fn find_node(&mut self, identifier: &str) -> Result<Option<Handle>, StoreError>;

    fn create_edge(&mut self, kind: EdgeKind, from: Handle, to: Handle)
        -> Result<Handle, StoreError>;

    fn create_content_link(&mut self, content: &str) -> Result<Handle, StoreError>;

    /// Whether a `kind` edge from `from` to `to` exists.
    fn has_edge(&mut self, kind: EdgeKind, from: Handle, to: Handle) -> Result<bool, StoreError>;

    /// Target of the first common edge leaving `from` that `relation` marks
    /// with an access edge.
    fn find_related(&mut self, from: Handle, relation: Handle) -> Result<Option<Handle>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Node {
        identifier: String,
        kind: NodeKind,
    },
    Link {
        content: String,
    },
    Edge {
        kind: EdgeKind,
        from: Handle,
        to: Handle,
    },
}

/// In-memory [`GraphStoreClient`].
///
/// Used for dry runs and tests; identifiers can be marked unavailable to
/// simulate failed round-trips.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    elements: Vec<Element>,
    by_identifier: HashMap<String, Handle>,
    unavailable: HashSet<String>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every lookup of `identifier` fail with [`StoreError::Unavailable`].
    pub fn make_unavailable(&mut self, identifier: &str) {
        self.unavailable.insert(identifier.to_string());
    }

    pub fn element(&self, handle: Handle) -> Option<&Element> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.elements.get(i))
    }

    pub fn lookup(&self, identifier: &str) -> Option<Handle> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn node_count(&self) -> usize {
        self.count(|e| matches!(e, Element::Node { .. }))
    }

    pub fn link_count(&self) -> usize {
        self.count(|e| matches!(e, Element::Link { .. }))
    }

    pub fn edge_count(&self) -> usize {
        self.count(|e| matches!(e, Element::Edge { .. }))
    }

    fn count(&self, pred: impl Fn(&Element) -> bool) -> usize {
        self.elements.iter().filter(|e| pred(e)).count()
    }

    /// Handles of `kind` edges from `from` to `to`.
    pub fn edges_between(&self, kind: EdgeKind, from: Handle, to: Handle) -> Vec<Handle> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                matches!(e, Element::Edge { kind: k, from: f, to: t } if *k == kind && *f == from && *t == to)
            })
            .map(|(i, _)| Handle(i as u64))
            .collect()
    }

    /// Whether `from` and `to` are joined by a common edge that `relation`
    /// points at with an access edge.
    pub fn has_reified_edge(&self, relation: Handle, from: Handle, to: Handle) -> bool {
        self.edges_between(EdgeKind::Common, from, to)
            .into_iter()
            .any(|edge| !self.edges_between(EdgeKind::Access, relation, edge).is_empty())
    }

    /// Contents of the links attached to `node` under `identifier_type`.
    pub fn identifiers_of(&self, node: Handle, identifier_type: Handle) -> Vec<&str> {
        self.related(node, identifier_type)
            .filter_map(|link| match self.element(link) {
                Some(Element::Link { content }) => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Targets of common edges leaving `from` that `relation` points at.
    fn related(&self, from: Handle, relation: Handle) -> impl Iterator<Item = Handle> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter_map(move |(i, e)| match e {
                Element::Edge {
                    kind: EdgeKind::Common,
                    from: f,
                    to,
                } if *f == from => Some((Handle(i as u64), *to)),
                _ => None,
            })
            .filter(move |(edge, _)| !self.edges_between(EdgeKind::Access, relation, *edge).is_empty())
            .map(|(_, to)| to)
    }

    fn push(&mut self, element: Element) -> Handle {
        let handle = Handle(self.elements.len() as u64);
        self.elements.push(element);
        handle
    }

    fn check_available(&self, identifier: &str) -> Result<(), StoreError> {
        if self.unavailable.contains(identifier) {
            Err(StoreError::Unavailable(format!("lookup of `{identifier}` failed")))
        } else {
            Ok(())
        }
    }
}

impl GraphStoreClient for MemoryGraphStore {
    fn find_or_create_node(
        &mut self,
        identifier: &str,
        kind: NodeKind,
    ) -> Result<Resolved, StoreError> {
        self.check_available(identifier)?;
        if let Some(handle) = self.lookup(identifier) {
            return Ok(Resolved {
                handle,
                created: false,
            });
        }
        let handle = self.push(Element::Node {
            identifier: identifier.to_string(),
            kind,
        });
        self.by_identifier.insert(identifier.to_string(), handle);
        Ok(Resolved {
            handle,
            created: true,
        })
    }

    fn find_node(&mut self, identifier: &str) -> Result<Option<Handle>, StoreError> {
        self.check_available(identifier)?;
        Ok(self.lookup(identifier))
    }

    fn create_edge(
        &mut self,
        kind: EdgeKind,
        from: Handle,
        to: Handle,
    ) -> Result<Handle, StoreError> {
        for handle in [from, to] {
            if self.element(handle).is_none() {
                return Err(StoreError::InvalidHandle(handle));
            }
        }
        Ok(self.push(Element::Edge { kind, from, to }))
    }

    fn create_content_link(&mut self, content: &str) -> Result<Handle, StoreError> {
        Ok(self.push(Element::Link {
            content: content.to_string(),
        }))
    }

    fn has_edge(&mut self, kind: EdgeKind, from: Handle, to: Handle) -> Result<bool, StoreError> {
        Ok(!self.edges_between(kind, from, to).is_empty())
    }

    fn find_related(&mut self, from: Handle, relation: Handle) -> Result<Option<Handle>, StoreError> {
        Ok(self.related(from, relation).next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_or_create_is_idempotent() {
        let mut store = MemoryGraphStore::new();
        let first = store
            .find_or_create_node("concept_animal", NodeKind::Class)
            .unwrap();
        let second = store
            .find_or_create_node("concept_animal", NodeKind::Class)
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.handle, second.handle);
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn edges_can_target_edges() {
        let mut store = MemoryGraphStore::new();
        let a = store.find_or_create_node("a", NodeKind::Individual).unwrap().handle;
        let b = store.find_or_create_node("b", NodeKind::Individual).unwrap().handle;
        let rel = store
            .find_or_create_node("nrel_r", NodeKind::NonRoleRelation)
            .unwrap()
            .handle;

        let base = store.create_edge(EdgeKind::Common, a, b).unwrap();
        store.create_edge(EdgeKind::Access, rel, base).unwrap();

        assert!(store.has_reified_edge(rel, a, b));
        assert!(!store.has_reified_edge(rel, b, a));
    }

    #[test]
    fn invalid_handles_are_rejected() {
        let mut store = MemoryGraphStore::new();
        let a = store.find_or_create_node("a", NodeKind::Individual).unwrap().handle;

        let err = store.create_edge(EdgeKind::Access, a, Handle(42)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidHandle(Handle(42))));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn finds_reified_targets() {
        let mut store = MemoryGraphStore::new();
        let rex = store.find_or_create_node("rex", NodeKind::Individual).unwrap().handle;
        let idtf = store
            .find_or_create_node("nrel_main_idtf", NodeKind::Keynode)
            .unwrap()
            .handle;
        assert_eq!(store.find_related(rex, idtf).unwrap(), None);

        let link = store.create_content_link("Rex").unwrap();
        let base = store.create_edge(EdgeKind::Common, rex, link).unwrap();
        assert_eq!(store.find_related(rex, idtf).unwrap(), None);

        store.create_edge(EdgeKind::Access, idtf, base).unwrap();
        assert_eq!(store.find_related(rex, idtf).unwrap(), Some(link));
        assert!(store.has_edge(EdgeKind::Access, idtf, base).unwrap());
        assert!(!store.has_edge(EdgeKind::Access, base, idtf).unwrap());
        assert_eq!(store.identifiers_of(rex, idtf), ["Rex"]);
    }

    #[test]
    fn unavailable_identifiers_fail() {
        let mut store = MemoryGraphStore::new();
        store.make_unavailable("lang_en");

        assert!(store.find_node("lang_en").is_err());
        assert!(store.find_or_create_node("lang_en", NodeKind::Keynode).is_err());
        assert!(store.find_node("lang_ru").unwrap().is_none());
    }
}
