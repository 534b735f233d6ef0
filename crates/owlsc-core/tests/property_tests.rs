use owlsc_core::naming::{class_identifier, individual_identifier, relation_identifier};
use owlsc_core::vocab::{DEFAULT_NAMESPACE, ROOT_CLASS};
use owlsc_core::{
    classify, scs, ClassifierOptions, GraphStoreProjector, MemoryGraphStore, OntologyBuilder,
    ParentMatch, ProjectorOptions,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// Random ontology: a class tree under `Thing`, individuals, relations.
#[derive(Debug, Clone)]
struct RandomOntology {
    /// (class, parent index into the classes declared before it)
    classes: Vec<(String, usize)>,
    individuals: Vec<(String, usize)>,
    relations: Vec<(usize, String, usize)>,
}

fn ident() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][a-z]{1,8}").unwrap()
}

fn ontology() -> impl Strategy<Value = RandomOntology> {
    (
        proptest::collection::vec((ident(), any::<prop::sample::Index>()), 0..8),
        proptest::collection::vec((ident(), any::<prop::sample::Index>()), 0..8),
        proptest::collection::vec(
            (
                any::<prop::sample::Index>(),
                prop_oneof!["nrel_[a-z]{1,6}", "rrel_[a-z]{1,6}", "[a-z]{1,6}"],
                any::<prop::sample::Index>(),
            ),
            0..6,
        ),
    )
        .prop_map(|(classes, individuals, relations)| {
            let classes: Vec<(String, usize)> = classes
                .into_iter()
                .enumerate()
                .map(|(i, (name, parent))| (name, parent.index(i + 1)))
                .collect();
            let class_count = classes.len() + 1;
            let individuals: Vec<(String, usize)> = individuals
                .into_iter()
                .map(|(name, class)| (format!("{name}Ind"), class.index(class_count)))
                .collect();
            let relations = if individuals.is_empty() {
                Vec::new()
            } else {
                relations
                    .into_iter()
                    .map(|(s, p, o)| (s.index(individuals.len()), p, o.index(individuals.len())))
                    .collect()
            };
            RandomOntology {
                classes,
                individuals,
                relations,
            }
        })
}

fn build(onto: &RandomOntology) -> OntologyBuilder {
    let mut b = OntologyBuilder::new(DEFAULT_NAMESPACE);
    b.class(ROOT_CLASS);
    let mut names = vec![ROOT_CLASS.to_string()];
    for (name, parent) in &onto.classes {
        let parent = names[*parent].clone();
        b.subclass(&parent, name);
        names.push(name.clone());
    }
    let mut individual_names = Vec::new();
    for (name, class) in &onto.individuals {
        let class = &names[*class];
        b.individual(class, name);
        individual_names.push(name.clone());
    }
    for (s, p, o) in &onto.relations {
        let (s, o) = (&individual_names[*s], &individual_names[*o]);
        b.relation(s, p, o);
    }
    b
}

fn declarations(text: &str) -> Vec<&str> {
    text.lines()
        .filter_map(|l| l.strip_suffix("<-sc_node_not_relation;;"))
        .collect()
}

proptest! {
    #[test]
    fn parents_always_name_classified_classes(onto in ontology(), exact in any::<bool>()) {
        let options = ClassifierOptions {
            parent_match: if exact { ParentMatch::Exact } else { ParentMatch::Containment },
            ..ClassifierOptions::default()
        };
        let model = classify(&build(&onto).build(), &options);
        let names: HashSet<&str> = model.classes.iter().map(|c| c.local_name.as_str()).collect();

        for class in &model.classes {
            if class.local_name == ROOT_CLASS {
                prop_assert!(class.parent_local_name.is_none());
            }
            if let Some(parent) = &class.parent_local_name {
                prop_assert!(names.contains(parent.as_str()));
            }
        }
    }

    #[test]
    fn one_declaration_per_class_and_individual(onto in ontology()) {
        let model = classify(&build(&onto).build(), &ClassifierOptions::default());
        let text = scs::encode(&model);
        let declared = declarations(&text);

        let mut expected: Vec<String> = model
            .classes
            .iter()
            .map(|c| class_identifier(&c.local_name))
            .chain(model.individuals.iter().map(|i| individual_identifier(&i.local_name)))
            .collect();
        let mut declared_sorted: Vec<String> = declared.iter().map(|s| s.to_string()).collect();
        expected.sort();
        declared_sorted.sort();
        prop_assert_eq!(declared_sorted, expected);
    }

    #[test]
    fn relation_kind_declared_per_instance_for_known_prefixes(onto in ontology()) {
        let model = classify(&build(&onto).build(), &ClassifierOptions::default());
        let text = scs::encode(&model);

        for relation in &model.relations {
            let id = relation_identifier(&relation.predicate_local_name);
            let declared = text.contains(&format!("\n{id}<-sc_node_norole_relation;;"))
                || text.contains(&format!("\n{id}<-sc_node_role_relation;;"));
            prop_assert_eq!(declared, id.starts_with("nrel") || id.starts_with("rrel"));
        }

        let kinded = model
            .relations
            .iter()
            .map(|r| relation_identifier(&r.predicate_local_name))
            .filter(|id| id.starts_with("nrel") || id.starts_with("rrel"))
            .count();
        let kind_lines = text
            .lines()
            .filter(|l| l.ends_with("<-sc_node_norole_relation;;") || l.ends_with("<-sc_node_role_relation;;"))
            .count();
        prop_assert_eq!(kind_lines, kinded);
    }

    #[test]
    fn reprojection_keeps_node_count(onto in ontology()) {
        let model = classify(&build(&onto).build(), &ClassifierOptions::default());

        let mut projector = GraphStoreProjector::new(MemoryGraphStore::new(), ProjectorOptions::default());
        projector.project(&model);
        let once = projector.client().node_count();
        let report = projector.project(&model);

        prop_assert_eq!(projector.client().node_count(), once);
        prop_assert_eq!(report.created_nodes, 0);
    }
}
