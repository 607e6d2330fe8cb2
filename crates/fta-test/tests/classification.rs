//! End-to-end construction of fault trees

use std::sync::Arc;

use fta_core::{CcfMember, EventId, FtaError, Gate, Identity, PrimaryEvent};
use fta_test::{check_partition, init_tracing, GeneratorConfig, ModelGenerator};
use fta_tree::{unused_events_warning, FaultTree, TreeConfig, TreeState};

fn keys<V>(map: &std::collections::BTreeMap<EventId, V>) -> Vec<&str> {
    map.keys().map(EventId::as_str).collect()
}

#[test]
fn shared_leaf_between_top_and_gate() {
    init_tracing();

    let leaf1 = Arc::new(PrimaryEvent::basic("leaf1"));
    let leaf2 = Arc::new(PrimaryEvent::basic("leaf2"));
    let a = Arc::new(Gate::new("A").with_child(&leaf1).with_child(&leaf2));
    let top = Arc::new(Gate::new("top").with_child(&a).with_child(&leaf1));

    let mut tree = FaultTree::new("scenario");
    tree.add_gate(Arc::clone(&top)).unwrap();
    tree.add_gate(Arc::clone(&a)).unwrap();
    assert_eq!(keys(tree.gates()), vec!["A"]);

    tree.classify().unwrap();
    assert_eq!(keys(tree.gates()), vec!["A"]);
    assert_eq!(keys(tree.primary_events()), vec!["leaf1", "leaf2"]);

    // the registry holds the loader's objects, not copies
    assert!(Arc::ptr_eq(tree.top_event().unwrap(), &top));
    assert!(Arc::ptr_eq(&tree.gates()["A"], &a));
    assert!(Arc::ptr_eq(&tree.primary_events()["leaf1"], &leaf1));
    assert!(check_partition(&tree).is_valid());
}

#[test]
fn second_top_identifier_is_rejected() {
    let mut tree = FaultTree::new("scenario");
    tree.add_gate(Arc::new(Gate::new("top"))).unwrap();

    let err = tree.add_gate(Arc::new(Gate::new("top"))).unwrap_err();
    assert!(matches!(err, FtaError::DuplicateIdentifier { .. }));
}

#[test]
fn registration_after_classification_is_rejected() {
    let mut tree = FaultTree::new("scenario");
    tree.add_gate(Arc::new(Gate::new("top"))).unwrap();
    tree.classify().unwrap();

    let err = tree.add_gate(Arc::new(Gate::new("B"))).unwrap_err();
    assert_eq!(
        err,
        FtaError::LockedModification {
            tree: "scenario".to_string(),
            gate: EventId::new("B"),
        }
    );
    assert_eq!(tree.state(), TreeState::Locked);
    assert!(tree.gates().is_empty());
}

#[test]
fn failed_classification_keeps_lock_and_empty_map() {
    let top = Gate::new("top").with_child(fta_core::Event::Uninitialized(EventId::new("x")));
    let mut tree = FaultTree::new("broken");
    tree.add_gate(Arc::new(top)).unwrap();

    assert!(tree.classify().is_err());
    assert!(tree.is_locked());
    assert!(tree.primary_events().is_empty());
    assert!(tree.add_gate(Arc::new(Gate::new("late"))).is_err());
}

#[test]
fn generated_models_satisfy_partition() {
    init_tracing();

    for seed in 0..16 {
        let config = GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        };
        let model = ModelGenerator::new(config).generate();
        let tree = model.build(TreeConfig::strict()).unwrap();

        let report = check_partition(&tree);
        assert!(report.is_valid(), "seed {}: {:?}", seed, report.violations);
        assert!(report.references > 0);
    }
}

#[test]
fn generated_models_report_unused_events() {
    let config = GeneratorConfig {
        primary_count: 200,
        ..GeneratorConfig::light()
    };
    let model = ModelGenerator::new(config).generate();
    let tree = model.build(TreeConfig::default()).unwrap();

    let unused = tree.unused_primary_events(&model.primary_events);
    assert_eq!(
        unused.len() + tree.primary_events().len(),
        model.primary_events.len()
    );
    for event in &unused {
        assert!(!tree.contains(event.id().as_str()));
    }

    let warning = unused_events_warning(&unused).unwrap();
    assert!(warning.starts_with("WARNING! Found unused primary events: "));
}

#[test]
fn ccf_members_are_counted_as_basic_events() {
    let member = |id: &str| {
        Arc::new(PrimaryEvent::ccf_member(
            id,
            CcfMember::new("pumps", vec!["pa".to_string(), "pb".to_string()], 2),
        ))
    };
    let both = member("[pa pb]");
    let pa = Arc::new(PrimaryEvent::basic("pa"));
    let top = Arc::new(Gate::new("top").with_child(&both).with_child(&pa));

    let mut tree = FaultTree::new("ccf");
    tree.add_gate(top).unwrap();
    tree.classify().unwrap();

    let features = tree.features();
    assert_eq!(features.gates, 1);
    assert_eq!(features.basic_events, 2);
    assert_eq!(features.house_events, 0);
    assert_eq!(features.ccf_groups, 1);

    let resolved = tree.primary_events()["[pa pb]"].as_ccf_member().cloned();
    assert_eq!(resolved.map(|m| m.order()), Some(2));
}
