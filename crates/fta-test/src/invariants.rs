//! Classification invariant checks
//!
//! After classification every child identifier must land in exactly one of
//! the gate registry and the primary event map. The checker also compares
//! the flat result against a recursive descent from the top event, which
//! must agree on any well-formed tree.

use std::collections::BTreeSet;
use std::sync::Arc;

use fta_core::{Event, EventId, Gate, Identity};
use fta_tree::FaultTree;

/// A broken classification invariant
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Child found in neither map
    Unresolved { parent: EventId, id: EventId },
    /// Child found in both maps
    Ambiguous { id: EventId },
    /// Recursive descent reached a leaf the flat pass missed
    Missed { id: EventId },
    /// The flat pass reported a leaf recursive descent never reaches
    Unreachable { id: EventId },
}

/// Result of an invariant check
#[derive(Debug, Default)]
pub struct PartitionReport {
    /// Child references inspected
    pub references: usize,
    pub violations: Vec<Violation>,
}

impl PartitionReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check the gate / primary event partition of a classified tree
pub fn check_partition(tree: &FaultTree) -> PartitionReport {
    let mut report = PartitionReport::default();
    let Some(top) = tree.top_event() else {
        return report;
    };

    for gate in std::iter::once(top).chain(tree.gates().values()) {
        for id in gate.children().keys() {
            report.references += 1;
            let in_gates = tree.gates().contains_key(id);
            let in_primaries = tree.primary_events().contains_key(id);
            match (in_gates, in_primaries) {
                (true, true) => report.violations.push(Violation::Ambiguous { id: id.clone() }),
                (false, false) => report.violations.push(Violation::Unresolved {
                    parent: gate.id().clone(),
                    id: id.clone(),
                }),
                _ => {}
            }
        }
    }

    let descended = descend_primary_events(top);
    let flat: BTreeSet<EventId> = tree.primary_events().keys().cloned().collect();
    report.violations.extend(
        descended
            .difference(&flat)
            .map(|id| Violation::Missed { id: id.clone() }),
    );
    report.violations.extend(
        flat.difference(&descended)
            .map(|id| Violation::Unreachable { id: id.clone() }),
    );

    report
}

/// Primary events reachable from a gate by recursive descent
///
/// Independent of any registry; gates are visited once each.
pub fn descend_primary_events(top: &Arc<Gate>) -> BTreeSet<EventId> {
    let mut leaves = BTreeSet::new();
    let mut visited = BTreeSet::new();
    let mut stack = vec![Arc::clone(top)];

    while let Some(gate) = stack.pop() {
        if !visited.insert(gate.id().clone()) {
            continue;
        }
        for child in gate.children().values() {
            match child {
                Event::Gate(inner) => stack.push(Arc::clone(inner)),
                Event::Primary(event) => {
                    leaves.insert(event.id().clone());
                }
                Event::Uninitialized(_) => {}
            }
        }
    }

    leaves
}
