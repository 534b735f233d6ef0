//! Projection of a classified model into a graph store.
//!
//! Nodes are resolved by system identifier, so running the projector again
//! over a populated store reuses existing nodes instead of duplicating them.
//! An existing node that lacks its declaration or main identifier (left by
//! an earlier run that failed midway) gets the missing part attached.
//! Relations are reified: `A => R: B` becomes a common edge `A -> B` plus an
//! access edge from `R` to that edge.
//!
//! Every step is best effort. A failed round-trip or an unresolvable
//! reference abandons that step only; it is logged and recorded in the
//! [`ProjectionReport`] and the run continues.

use serde::Serialize;

use crate::classify::ClassifiedModel;
use crate::config::ProjectorOptions;
use crate::error::StoreError;
use crate::naming::{
    class_identifier, individual_identifier, relation_identifier, relation_kind, RelationKind,
};
use crate::store::{EdgeKind, GraphStoreClient, Handle, NodeKind, Resolved};
use crate::vocab::{
    lang_keynode, NREL_MAIN_IDTF, SC_NODE_NOROLE_RELATION, SC_NODE_NOT_RELATION,
    SC_NODE_ROLE_RELATION,
};

/// Counts of what a run achieved, plus one warning per abandoned step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionReport {
    pub classes: usize,
    pub individuals: usize,
    pub created_nodes: usize,
    /// Existing nodes whose declaration or identifier had to be completed.
    pub repaired: usize,
    pub hierarchy_edges: usize,
    pub memberships: usize,
    pub relations: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl ProjectionReport {
    fn skip(&mut self, step: impl Into<String>) {
        let step = step.into();
        tracing::warn!(step = %step, "projection step skipped");
        self.skipped += 1;
        self.warnings.push(step);
    }
}

#[derive(Debug)]
enum StepError {
    Store(StoreError),
    Unresolved(String),
}

impl From<StoreError> for StepError {
    fn from(value: StoreError) -> Self {
        StepError::Store(value)
    }
}

impl std::fmt::Display for StepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepError::Store(err) => write!(f, "{err}"),
            StepError::Unresolved(id) => write!(f, "unresolved reference `{id}`"),
        }
    }
}

type StepResult<T> = Result<T, StepError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declared {
    Created,
    Repaired,
    Existing,
}

impl Declared {
    fn record(self, report: &mut ProjectionReport) {
        match self {
            Declared::Created => report.created_nodes += 1,
            Declared::Repaired => report.repaired += 1,
            Declared::Existing => {}
        }
    }
}

pub struct GraphStoreProjector<C> {
    client: C,
    options: ProjectorOptions,
}

impl<C: GraphStoreClient> GraphStoreProjector<C> {
    pub fn new(client: C, options: ProjectorOptions) -> Self {
        Self { client, options }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_client(self) -> C {
        self.client
    }

    /// Project `model`: classes, hierarchy, individuals, memberships, relations.
    ///
    /// Each phase only starts once the previous one has been issued, since
    /// later phases look up identifiers created by earlier ones.
    pub fn project(&mut self, model: &ClassifiedModel) -> ProjectionReport {
        let mut report = ProjectionReport::default();

        for class in &model.classes {
            let id = class_identifier(&class.local_name);
            match self.declare(&id, NodeKind::Class, &class.display_label, class.language.as_deref()) {
                Ok(outcome) => {
                    report.classes += 1;
                    outcome.record(&mut report);
                }
                Err(err) => report.skip(format!("class `{id}`: {err}")),
            }
        }

        for class in &model.classes {
            let Some(parent) = &class.parent_local_name else {
                continue;
            };
            let (parent, child) = (class_identifier(parent), class_identifier(&class.local_name));
            match self.add_to_set(&parent, &child) {
                Ok(()) => report.hierarchy_edges += 1,
                Err(err) => report.skip(format!("hierarchy `{parent} -> {child}`: {err}")),
            }
        }

        for individual in &model.individuals {
            let id = individual_identifier(&individual.local_name);
            match self.declare(&id, NodeKind::Individual, &individual.local_name, None) {
                Ok(outcome) => {
                    report.individuals += 1;
                    outcome.record(&mut report);
                }
                Err(err) => report.skip(format!("individual `{id}`: {err}")),
            }
        }

        for individual in &model.individuals {
            let Some(owner) = &individual.owner_class_local_name else {
                continue;
            };
            let (owner, member) = (
                class_identifier(owner),
                individual_identifier(&individual.local_name),
            );
            match self.add_to_set(&owner, &member) {
                Ok(()) => report.memberships += 1,
                Err(err) => report.skip(format!("membership `{owner} -> {member}`: {err}")),
            }
        }

        for relation in &model.relations {
            let predicate = relation_identifier(&relation.predicate_local_name);
            let object = model.endpoint_identifier(&relation.object_local_name);
            let subject = model.endpoint_identifier(&relation.subject_local_name);
            match self.relate(&predicate, &object, &subject) {
                Ok(created) => {
                    report.relations += 1;
                    report.created_nodes += usize::from(created);
                }
                Err(err) => report.skip(format!("relation `{object} => {predicate}: {subject}`: {err}")),
            }
        }

        tracing::info!(
            classes = report.classes,
            individuals = report.individuals,
            relations = report.relations,
            skipped = report.skipped,
            "projection finished"
        );
        report
    }

    /// Resolve a non-relation node and make sure it is declared as such and
    /// carries its main identifier.
    fn declare(
        &mut self,
        id: &str,
        kind: NodeKind,
        label: &str,
        language: Option<&str>,
    ) -> StepResult<Declared> {
        let Resolved { handle, created } = self.client.find_or_create_node(id, kind)?;
        let not_relation = self.keynode(SC_NODE_NOT_RELATION)?;
        let identifier_type = self.keynode(NREL_MAIN_IDTF)?;

        let needs_declaration =
            created || !self.client.has_edge(EdgeKind::Access, not_relation, handle)?;
        let needs_identifier =
            created || self.client.find_related(handle, identifier_type)?.is_none();

        if needs_declaration {
            self.client.create_edge(EdgeKind::Access, not_relation, handle)?;
        }
        if needs_identifier {
            let language = language
                .unwrap_or(&self.options.default_language)
                .to_string();
            self.attach_identifier(handle, identifier_type, label, &language)?;
        }

        Ok(match (created, needs_declaration || needs_identifier) {
            (true, _) => Declared::Created,
            (false, true) => {
                tracing::debug!(node = %id, "completed partially declared node");
                Declared::Repaired
            }
            (false, false) => Declared::Existing,
        })
    }

    /// Link node in the `lang_*` set, joined to `node` by a common edge
    /// reified under `nrel_main_idtf`. The reification goes last so a found
    /// identifier is always complete.
    fn attach_identifier(
        &mut self,
        node: Handle,
        identifier_type: Handle,
        content: &str,
        language: &str,
    ) -> StepResult<()> {
        let language = self.keynode(&lang_keynode(language))?;
        let link = self.client.create_content_link(content)?;
        self.client.create_edge(EdgeKind::Access, language, link)?;
        self.reified_edge(node, link, identifier_type)?;
        Ok(())
    }

    fn relate(&mut self, predicate: &str, object: &str, subject: &str) -> StepResult<bool> {
        let object = self.existing(object)?;
        let subject = self.existing(subject)?;

        let (kind, set) = match relation_kind(predicate) {
            RelationKind::NonRole => (NodeKind::NonRoleRelation, Some(SC_NODE_NOROLE_RELATION)),
            RelationKind::Role => (NodeKind::RoleRelation, Some(SC_NODE_ROLE_RELATION)),
            RelationKind::Unclassified => (NodeKind::Relation, None),
        };
        let Resolved { handle: relation, created } =
            self.client.find_or_create_node(predicate, kind)?;
        if let Some(set) = set {
            let set = self.keynode(set)?;
            if created || !self.client.has_edge(EdgeKind::Access, set, relation)? {
                self.client.create_edge(EdgeKind::Access, set, relation)?;
            }
        }

        self.reified_edge(object, subject, relation)?;
        Ok(created)
    }

    /// Access edge `parent -> child` between two already declared nodes.
    fn add_to_set(&mut self, parent: &str, child: &str) -> StepResult<()> {
        let parent = self.existing(parent)?;
        let child = self.existing(child)?;
        self.client.create_edge(EdgeKind::Access, parent, child)?;
        Ok(())
    }

    fn reified_edge(&mut self, from: Handle, to: Handle, relation: Handle) -> StepResult<Handle> {
        let base = self.client.create_edge(EdgeKind::Common, from, to)?;
        self.client.create_edge(EdgeKind::Access, relation, base)?;
        Ok(base)
    }

    fn keynode(&mut self, id: &str) -> StepResult<Handle> {
        Ok(self.client.find_or_create_node(id, NodeKind::Keynode)?.handle)
    }

    fn existing(&mut self, id: &str) -> StepResult<Handle> {
        self.client
            .find_node(id)?
            .ok_or_else(|| StepError::Unresolved(id.to_string()))
    }
}
