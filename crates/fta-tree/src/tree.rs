//! Fault tree registry
//!
//! Gates are registered one at a time while the loader builds the model.
//! The first gate becomes the top event; every later gate goes into a flat
//! registry keyed by identifier. Once all gates are in, [`FaultTree::classify`]
//! locks the tree and walks the registry once, collecting every child that
//! is not a registered gate as a primary event.
//!
//! Classification only looks at the immediate children of registered gates.
//! That is enough to reach every leaf because every gate, at any depth, is
//! itself in the registry.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use fta_core::{Event, EventId, FtaError, FtaResult, Gate, Identity, PrimaryEvent};
use tracing::{debug, info, warn};

use crate::{ModelFeatures, OrphanPolicy, TreeConfig};

/// Lifecycle of a tree: open for registration, then locked for good
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeState {
    #[default]
    Open,
    Locked,
}

/// Fault tree - top event, gate registry and classified primary events
#[derive(Debug)]
pub struct FaultTree {
    name: String,
    config: TreeConfig,
    state: TreeState,
    top_event: Option<Arc<Gate>>,
    /// Every gate except the top event
    gates: BTreeMap<EventId, Arc<Gate>>,
    /// Filled by classification
    primary_events: BTreeMap<EventId, Arc<PrimaryEvent>>,
    warnings: Vec<String>,
}

impl FaultTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, TreeConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: TreeConfig) -> Self {
        FaultTree {
            name: name.into(),
            config,
            state: TreeState::Open,
            top_event: None,
            gates: BTreeMap::new(),
            primary_events: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == TreeState::Locked
    }

    pub fn top_event(&self) -> Option<&Arc<Gate>> {
        self.top_event.as_ref()
    }

    pub fn top_event_id(&self) -> Option<&EventId> {
        self.top_event.as_ref().map(|top| top.id())
    }

    /// Registered gates, excluding the top event
    pub fn gates(&self) -> &BTreeMap<EventId, Arc<Gate>> {
        &self.gates
    }

    /// Primary events found by classification; empty before it runs
    pub fn primary_events(&self) -> &BTreeMap<EventId, Arc<PrimaryEvent>> {
        &self.primary_events
    }

    /// Basic events, CCF members included
    pub fn basic_events(&self) -> impl Iterator<Item = &Arc<PrimaryEvent>> {
        self.primary_events.values().filter(|event| event.is_basic())
    }

    /// Warning lines recorded by classification
    pub fn warning_lines(&self) -> &[String] {
        &self.warnings
    }

    /// Accumulated warning text, empty when there is nothing to report
    pub fn warnings(&self) -> String {
        self.warnings.join("\n")
    }

    pub fn features(&self) -> ModelFeatures {
        ModelFeatures::of(self)
    }

    /// Register a gate
    ///
    /// The first gate registered becomes the top event whatever its
    /// identifier. Children are not checked here; forward references are
    /// resolved by [`FaultTree::classify`].
    pub fn add_gate(&mut self, gate: Arc<Gate>) -> FtaResult<()> {
        if self.is_locked() {
            return Err(FtaError::LockedModification {
                tree: self.name.clone(),
                gate: gate.id().clone(),
            });
        }

        if self.top_event.is_none() {
            debug!(tree = %self.name, gate = %gate.id(), "top event assigned");
            self.top_event = Some(gate);
            return Ok(());
        }

        if self.top_event_id() == Some(gate.id()) || self.gates.contains_key(gate.id()) {
            return Err(FtaError::DuplicateIdentifier {
                tree: self.name.clone(),
                id: gate.id().clone(),
            });
        }

        debug!(tree = %self.name, gate = %gate.id(), "gate registered");
        self.gates.insert(gate.id().clone(), gate);
        Ok(())
    }

    /// Lock the tree and gather its primary events
    ///
    /// The lock is taken before anything else and stays even if
    /// classification fails. On failure the primary event map and warnings
    /// keep their previous contents. Calling this again on a classified tree
    /// recomputes the same result.
    pub fn classify(&mut self) -> FtaResult<()> {
        self.state = TreeState::Locked;

        let Some(top) = self.top_event.as_ref() else {
            debug!(tree = %self.name, "empty tree classified");
            return Ok(());
        };

        let mut primary_events = BTreeMap::new();
        for gate in std::iter::once(top).chain(self.gates.values()) {
            self.collect_primary_events(gate, &mut primary_events)?;
        }

        let mut warnings = Vec::new();
        let reachable = self.reachable_gates(top);
        let orphans: Vec<EventId> = self
            .gates
            .keys()
            .filter(|id| !reachable.contains(*id))
            .cloned()
            .collect();
        if !orphans.is_empty() {
            match self.config.orphan_gates {
                OrphanPolicy::Ignore => {}
                OrphanPolicy::Warn => {
                    let line = format!(
                        "Found orphan gates: {}",
                        join_orig_ids(&self.gates, &orphans)
                    );
                    warn!(tree = %self.name, count = orphans.len(), "{}", line);
                    warnings.push(line);
                }
                OrphanPolicy::Reject => {
                    return Err(FtaError::OrphanGates {
                        tree: self.name.clone(),
                        ids: orphans,
                    });
                }
            }
        }

        info!(
            tree = %self.name,
            gates = self.gates.len() + 1,
            primary_events = primary_events.len(),
            "tree classified"
        );
        self.primary_events = primary_events;
        self.warnings = warnings;
        Ok(())
    }

    /// Sort the immediate children of one gate
    ///
    /// Children naming a registered gate must hold that very gate or an
    /// uninitialized placeholder for it. Anything else must be a
    /// materialized primary event, bound to one object only.
    fn collect_primary_events(
        &self,
        gate: &Gate,
        primary_events: &mut BTreeMap<EventId, Arc<PrimaryEvent>>,
    ) -> FtaResult<()> {
        for (id, child) in gate.children() {
            if self.top_event_id() == Some(id) {
                // the top event is nobody's child
                return Err(match child {
                    Event::Primary(_) => FtaError::ConflictingDefinition {
                        id: id.clone(),
                        parent: gate.id().clone(),
                    },
                    _ => FtaError::UninitializedEvent {
                        id: id.clone(),
                        parent: gate.id().clone(),
                    },
                });
            }

            if let Some(registered) = self.gates.get(id) {
                let resolves = match child {
                    Event::Gate(g) => Arc::ptr_eq(g, registered),
                    // registered after its parent was built
                    Event::Uninitialized(_) => true,
                    Event::Primary(_) => false,
                };
                if !resolves {
                    return Err(FtaError::ConflictingDefinition {
                        id: id.clone(),
                        parent: gate.id().clone(),
                    });
                }
                continue;
            }

            let Event::Primary(event) = child else {
                // a placeholder or a gate that was never registered
                return Err(FtaError::UninitializedEvent {
                    id: id.clone(),
                    parent: gate.id().clone(),
                });
            };

            match primary_events.entry(id.clone()) {
                Entry::Occupied(known) if !Arc::ptr_eq(known.get(), event) => {
                    return Err(FtaError::ConflictingDefinition {
                        id: id.clone(),
                        parent: gate.id().clone(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(event));
                }
            }
        }
        Ok(())
    }

    /// Registered gates reachable from the top event
    ///
    /// Children are resolved through the registry by identifier, so a gate
    /// referenced only by unreachable gates is unreachable as well.
    fn reachable_gates(&self, top: &Gate) -> BTreeSet<EventId> {
        let mut reached = BTreeSet::new();
        let mut pending = vec![top];
        while let Some(gate) = pending.pop() {
            for id in gate.children().keys() {
                if let Some(child) = self.gates.get(id) {
                    if reached.insert(id.clone()) {
                        pending.push(child);
                    }
                }
            }
        }
        reached
    }

    /// Resolve an identifier to the top event, a gate or a primary event
    pub fn event(&self, id: &str) -> Option<Event> {
        if let Some(top) = self.top_event.as_ref().filter(|top| top.id() == id) {
            return Some(Event::from(top));
        }
        self.gates
            .get(id)
            .map(Event::from)
            .or_else(|| self.primary_events.get(id).map(Event::from))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.event(id).is_some()
    }

    /// Defined primary events that classification did not reach, in
    /// identifier order
    pub fn unused_primary_events<'a, I>(&self, defined: I) -> Vec<Arc<PrimaryEvent>>
    where
        I: IntoIterator<Item = &'a Arc<PrimaryEvent>>,
    {
        let mut unused: Vec<Arc<PrimaryEvent>> = defined
            .into_iter()
            .filter(|event| !self.primary_events.contains_key(event.id()))
            .cloned()
            .collect();
        unused.sort_by(|a, b| a.id().cmp(b.id()));
        unused.dedup_by(|a, b| a.id() == b.id());
        unused
    }
}

fn join_orig_ids(gates: &BTreeMap<EventId, Arc<Gate>>, ids: &[EventId]) -> String {
    ids.iter()
        .map(|id| gates.get(id).map_or(id.as_str(), |gate| gate.orig_id()))
        .collect::<Vec<_>>()
        .join(" ")
}
