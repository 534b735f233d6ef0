//! OWL/RDF → SC semantic network projection.
//!
//! ```text
//!   OntologySource ──► classify ──► ClassifiedModel ──┬──► scs::encode      (SCs text)
//!   (RawTriple set)                                   └──► GraphStoreProjector (graph store)
//! ```
//!
//! The classified model is built fresh per run and never mutated; both
//! encoders name elements through [`naming`].

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod naming;
pub mod project;
pub mod scs;
pub mod store;
pub mod term;
pub mod vocab;

pub use builder::OntologyBuilder;
pub use classify::{
    classify, ClassifiedClass, ClassifiedIndividual, ClassifiedModel, CustomRelationTriple,
};
pub use config::{ClassifierOptions, OwlScConfig, ParentMatch, ProjectorOptions};
pub use error::{ConfigError, StoreError};
pub use project::{GraphStoreProjector, ProjectionReport};
pub use store::{EdgeKind, GraphStoreClient, Handle, MemoryGraphStore, NodeKind, Resolved};
pub use term::{Literal, RawTriple, Term};

/// Anything that can hand over a parsed triple set.
pub trait OntologySource {
    type Error;

    fn triples(&self) -> Result<Vec<RawTriple>, Self::Error>;
}

impl OntologySource for OntologyBuilder {
    type Error = std::convert::Infallible;

    fn triples(&self) -> Result<Vec<RawTriple>, Self::Error> {
        Ok(self.build())
    }
}

/// Classify and encode in one step.
pub fn triples_to_scs(triples: &[RawTriple], options: &ClassifierOptions) -> String {
    scs::encode(&classify(triples, options))
}
