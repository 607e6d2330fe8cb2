//! Model features - size summary of a classified tree

use std::collections::BTreeSet;
use std::sync::Arc;

use fta_core::{Identity, PrimaryEvent};

use crate::FaultTree;

/// Counts handed to reporting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelFeatures {
    /// Gates including the top event
    pub gates: usize,
    /// Basic events, CCF members included
    pub basic_events: usize,
    pub house_events: usize,
    /// Distinct CCF group names among the primary events
    pub ccf_groups: usize,
}

impl ModelFeatures {
    pub fn of(tree: &FaultTree) -> Self {
        let top = usize::from(tree.top_event().is_some());
        let primaries = tree.primary_events().len();
        let basic_events = tree.basic_events().count();
        let ccf_groups: BTreeSet<&str> = tree
            .primary_events()
            .values()
            .filter_map(|event| event.as_ccf_member())
            .map(|member| member.group.as_str())
            .collect();

        ModelFeatures {
            gates: tree.gates().len() + top,
            basic_events,
            house_events: primaries - basic_events,
            ccf_groups: ccf_groups.len(),
        }
    }

    pub fn primary_events(&self) -> usize {
        self.basic_events + self.house_events
    }
}

/// Warning line for primary events defined but used by no tree
pub fn unused_events_warning(events: &[Arc<PrimaryEvent>]) -> Option<String> {
    if events.is_empty() {
        return None;
    }
    let names: Vec<&str> = events.iter().map(|event| event.orig_id()).collect();
    Some(format!("WARNING! Found unused primary events: {}", names.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fta_core::{CcfMember, Gate};

    fn ccf(id: &str, group: &str) -> Arc<PrimaryEvent> {
        Arc::new(PrimaryEvent::ccf_member(
            id,
            CcfMember::new(group, vec![id.to_string()], 2),
        ))
    }

    #[test]
    fn test_features_of_classified_tree() {
        let pump = Arc::new(PrimaryEvent::basic("pump"));
        let power = Arc::new(PrimaryEvent::house("power", true));
        let a = ccf("[va]", "valves");
        let b = ccf("[vb]", "valves");
        let c = ccf("[pa]", "pumps");

        let train = Arc::new(Gate::new("train").with_child(&pump).with_child(&a));
        let top = Arc::new(
            Gate::new("top")
                .with_child(&train)
                .with_child(&power)
                .with_child(&b)
                .with_child(&c),
        );

        let mut tree = FaultTree::new("ft");
        tree.add_gate(top).unwrap();
        tree.add_gate(train).unwrap();
        tree.classify().unwrap();

        let features = tree.features();
        assert_eq!(
            features,
            ModelFeatures {
                gates: 2,
                basic_events: 4,
                house_events: 1,
                ccf_groups: 2,
            }
        );
        assert_eq!(features.primary_events(), 5);
    }

    #[test]
    fn test_features_of_empty_tree() {
        assert_eq!(FaultTree::new("ft").features(), ModelFeatures::default());
    }

    #[test]
    fn test_unused_events_warning() {
        assert!(unused_events_warning(&[]).is_none());

        let events = vec![
            Arc::new(PrimaryEvent::basic("a").with_orig_id("PumpA")),
            Arc::new(PrimaryEvent::house("b", false).with_orig_id("PowerB")),
        ];
        assert_eq!(
            unused_events_warning(&events).as_deref(),
            Some("WARNING! Found unused primary events: PumpA PowerB")
        );
    }
}
