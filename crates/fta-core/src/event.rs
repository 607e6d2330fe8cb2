//! Event definitions
//!
//! A fault tree is built from gates (internal nodes) and primary events
//! (leaves). Gates reference their children by identifier; the child
//! objects themselves are shared through `Arc`, so the same gate or
//! primary event may hang under several parents and also sit in the
//! tree's registries without being copied.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::EventId;

/// Shared identity of every event kind
pub trait Identity {
    /// Identifier used for lookups and uniqueness checks
    fn id(&self) -> &EventId;

    /// Identifier as written in the model, for display
    fn orig_id(&self) -> &str;
}

/// Common-cause-failure group member
///
/// Produced by CCF expansion outside this crate; the core only carries
/// the attributes for downstream reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CcfMember {
    /// Name of the owning CCF group
    pub group: String,
    /// Names of the basic events failing together in this member
    pub members: Vec<String>,
    /// Number of basic events in the whole group
    pub group_size: usize,
}

impl CcfMember {
    pub fn new(group: impl Into<String>, members: Vec<String>, group_size: usize) -> Self {
        CcfMember {
            group: group.into(),
            members,
            group_size,
        }
    }

    /// Number of events failing together
    #[inline]
    pub fn order(&self) -> usize {
        self.members.len()
    }
}

/// Primary event subtype
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrimaryKind {
    /// Basic component failure
    Basic,
    /// House event with a fixed boolean state
    House { state: bool },
    /// Member of a common-cause-failure group
    CcfMember(CcfMember),
}

/// Primary (leaf) event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimaryEvent {
    id: EventId,
    orig_id: String,
    kind: PrimaryKind,
}

impl PrimaryEvent {
    /// Create a primary event whose display identifier equals its identifier
    pub fn new(id: impl Into<EventId>, kind: PrimaryKind) -> Self {
        let id = id.into();
        let orig_id = id.as_str().to_string();
        PrimaryEvent { id, orig_id, kind }
    }

    pub fn basic(id: impl Into<EventId>) -> Self {
        Self::new(id, PrimaryKind::Basic)
    }

    pub fn house(id: impl Into<EventId>, state: bool) -> Self {
        Self::new(id, PrimaryKind::House { state })
    }

    pub fn ccf_member(id: impl Into<EventId>, member: CcfMember) -> Self {
        Self::new(id, PrimaryKind::CcfMember(member))
    }

    /// Set the display identifier
    pub fn with_orig_id(mut self, orig_id: impl Into<String>) -> Self {
        self.orig_id = orig_id.into();
        self
    }

    pub fn kind(&self) -> &PrimaryKind {
        &self.kind
    }

    /// Basic events take part in quantification; CCF members count as basic.
    pub fn is_basic(&self) -> bool {
        matches!(self.kind, PrimaryKind::Basic | PrimaryKind::CcfMember(_))
    }

    pub fn is_house(&self) -> bool {
        matches!(self.kind, PrimaryKind::House { .. })
    }

    pub fn as_ccf_member(&self) -> Option<&CcfMember> {
        match &self.kind {
            PrimaryKind::CcfMember(member) => Some(member),
            _ => None,
        }
    }
}

impl Identity for PrimaryEvent {
    fn id(&self) -> &EventId {
        &self.id
    }

    fn orig_id(&self) -> &str {
        &self.orig_id
    }
}

/// Gate - internal node of the tree
///
/// Operator semantics (AND, OR, voting) belong to the analysis stages and
/// are not modelled here.
#[derive(Clone, Debug)]
pub struct Gate {
    id: EventId,
    orig_id: String,
    children: BTreeMap<EventId, Event>,
}

impl Gate {
    pub fn new(id: impl Into<EventId>) -> Self {
        let id = id.into();
        let orig_id = id.as_str().to_string();
        Gate {
            id,
            orig_id,
            children: BTreeMap::new(),
        }
    }

    /// Set the display identifier
    pub fn with_orig_id(mut self, orig_id: impl Into<String>) -> Self {
        self.orig_id = orig_id.into();
        self
    }

    /// Add a child, keyed by its identifier
    pub fn with_child(mut self, child: impl Into<Event>) -> Self {
        self.add_child(child);
        self
    }

    /// Add a child; returns the previous child with the same identifier
    pub fn add_child(&mut self, child: impl Into<Event>) -> Option<Event> {
        let child = child.into();
        self.children.insert(child.id().clone(), child)
    }

    /// Children keyed by identifier
    pub fn children(&self) -> &BTreeMap<EventId, Event> {
        &self.children
    }

    pub fn child(&self, id: &str) -> Option<&Event> {
        self.children.get(id)
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.contains_key(id)
    }
}

impl Identity for Gate {
    fn id(&self) -> &EventId {
        &self.id
    }

    fn orig_id(&self) -> &str {
        &self.orig_id
    }
}

/// Reference to a child event
#[derive(Clone, Debug)]
pub enum Event {
    /// Another gate
    Gate(Arc<Gate>),
    /// A leaf
    Primary(Arc<PrimaryEvent>),
    /// A name the loader referenced but never defined
    Uninitialized(EventId),
}

impl Event {
    pub fn as_gate(&self) -> Option<&Arc<Gate>> {
        match self {
            Event::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn as_primary(&self) -> Option<&Arc<PrimaryEvent>> {
        match self {
            Event::Primary(event) => Some(event),
            _ => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self, Event::Uninitialized(_))
    }

    /// Do both references point at the same underlying object?
    pub fn same_object(&self, other: &Event) -> bool {
        match (self, other) {
            (Event::Gate(a), Event::Gate(b)) => Arc::ptr_eq(a, b),
            (Event::Primary(a), Event::Primary(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Identity for Event {
    fn id(&self) -> &EventId {
        match self {
            Event::Gate(gate) => gate.id(),
            Event::Primary(event) => event.id(),
            Event::Uninitialized(id) => id,
        }
    }

    fn orig_id(&self) -> &str {
        match self {
            Event::Gate(gate) => gate.orig_id(),
            Event::Primary(event) => event.orig_id(),
            Event::Uninitialized(id) => id.as_str(),
        }
    }
}

impl From<Arc<Gate>> for Event {
    fn from(gate: Arc<Gate>) -> Self {
        Event::Gate(gate)
    }
}

impl From<Arc<PrimaryEvent>> for Event {
    fn from(event: Arc<PrimaryEvent>) -> Self {
        Event::Primary(event)
    }
}

impl From<&Arc<Gate>> for Event {
    fn from(gate: &Arc<Gate>) -> Self {
        Event::Gate(Arc::clone(gate))
    }
}

impl From<&Arc<PrimaryEvent>> for Event {
    fn from(event: &Arc<PrimaryEvent>) -> Self {
        Event::Primary(Arc::clone(event))
    }
}
