//! Model Generator - Seeded random fault trees
//!
//! Builds well-formed models the way a loader would: primary events
//! first, then gates bottom-up so every child object exists before its
//! parent. Every non-top gate is referenced by at least one parent, and
//! leaves are shared freely between gates.

use std::sync::Arc;

use fta_core::{CcfMember, FtaResult, Gate, Identity, PrimaryEvent};
use fta_tree::{FaultTree, TreeConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Generator configuration
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Gate levels below the top event
    pub depth: usize,
    /// Gates on each level below the top
    pub gates_per_level: usize,
    /// Upper bound on extra children drawn per gate
    pub max_fanout: usize,
    /// Defined primary events, used or not
    pub primary_count: usize,
    /// Probability that a primary event is a house event
    pub house_prob: f64,
    /// Probability that a primary event is a CCF member
    pub ccf_prob: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            depth: 4,
            gates_per_level: 8,
            max_fanout: 4,
            primary_count: 60,
            house_prob: 0.1,
            ccf_prob: 0.1,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Small model for quick tests
    pub fn light() -> Self {
        GeneratorConfig {
            depth: 2,
            gates_per_level: 3,
            max_fanout: 3,
            primary_count: 12,
            house_prob: 0.1,
            ccf_prob: 0.0,
            seed: 42,
        }
    }

    /// Large model for benchmarks
    pub fn heavy() -> Self {
        GeneratorConfig {
            depth: 8,
            gates_per_level: 250,
            max_fanout: 6,
            primary_count: 5000,
            house_prob: 0.05,
            ccf_prob: 0.1,
            seed: 42,
        }
    }
}

/// A generated model ready to be registered
#[derive(Clone, Debug)]
pub struct GeneratedModel {
    /// Registration order; the top event comes first
    pub gates: Vec<Arc<Gate>>,
    /// Every defined primary event, including ones no gate uses
    pub primary_events: Vec<Arc<PrimaryEvent>>,
}

impl GeneratedModel {
    pub fn top(&self) -> &Arc<Gate> {
        &self.gates[0]
    }

    /// Register every gate without classifying
    pub fn register(&self, config: TreeConfig) -> FtaResult<FaultTree> {
        let mut tree = FaultTree::with_config("generated", config);
        for gate in &self.gates {
            tree.add_gate(Arc::clone(gate))?;
        }
        Ok(tree)
    }

    /// Register every gate and classify
    pub fn build(&self, config: TreeConfig) -> FtaResult<FaultTree> {
        let mut tree = self.register(config)?;
        tree.classify()?;
        Ok(tree)
    }
}

/// Seeded fault tree generator
pub struct ModelGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl ModelGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        ModelGenerator { config, rng }
    }

    /// Generate a model
    pub fn generate(&mut self) -> GeneratedModel {
        let primary_events: Vec<Arc<PrimaryEvent>> = (0..self.config.primary_count)
            .map(|i| Arc::new(self.generate_primary(i)))
            .collect();

        // bottom level first; each level only needs the one below it
        let mut below: Vec<Arc<Gate>> = Vec::new();
        let mut registered: Vec<Arc<Gate>> = Vec::new();
        for level in (1..=self.config.depth).rev() {
            let count = self.config.gates_per_level.max(1);
            let level_gates = self.generate_level(level, count, &below, &primary_events);
            registered.extend(below.drain(..));
            below = level_gates;
        }

        let top = self
            .generate_level(0, 1, &below, &primary_events)
            .pop()
            .unwrap_or_else(|| Arc::new(Gate::new("top")));
        registered.extend(below);
        registered.shuffle(&mut self.rng);

        let mut gates = Vec::with_capacity(registered.len() + 1);
        gates.push(top);
        gates.extend(registered);

        debug!(
            seed = self.config.seed,
            gates = gates.len(),
            primary_events = primary_events.len(),
            "model generated"
        );
        GeneratedModel {
            gates,
            primary_events,
        }
    }

    fn generate_primary(&mut self, index: usize) -> PrimaryEvent {
        let id = format!("e{}", index);
        let roll = self.rng.gen::<f64>();
        if roll < self.config.house_prob {
            PrimaryEvent::house(id, self.rng.gen())
        } else if roll < self.config.house_prob + self.config.ccf_prob {
            let group = format!("ccf{}", self.rng.gen_range(0..4));
            let member = CcfMember::new(group, vec![id.clone()], self.rng.gen_range(2..5));
            PrimaryEvent::ccf_member(id, member)
        } else {
            PrimaryEvent::basic(id).with_orig_id(format!("E{}", index))
        }
    }

    /// Build one level of gates over the level below it
    fn generate_level(
        &mut self,
        level: usize,
        count: usize,
        below: &[Arc<Gate>],
        primary_events: &[Arc<PrimaryEvent>],
    ) -> Vec<Arc<Gate>> {
        let mut gates: Vec<Gate> = (0..count)
            .map(|i| {
                if level == 0 {
                    Gate::new("top")
                } else {
                    Gate::new(format!("g{}_{}", level, i))
                }
            })
            .collect();

        // every gate below gets at least one parent
        for child in below {
            let parent = self.rng.gen_range(0..gates.len());
            gates[parent].add_child(child);
        }

        for gate in gates.iter_mut() {
            let extra = self.rng.gen_range(1..=self.config.max_fanout.max(1));
            for _ in 0..extra {
                let pick_gate = !below.is_empty() && self.rng.gen_bool(0.3);
                if pick_gate {
                    if let Some(child) = below.choose(&mut self.rng) {
                        gate.add_child(child);
                    }
                } else if let Some(event) = primary_events.choose(&mut self.rng) {
                    gate.add_child(event);
                }
            }
        }

        gates.into_iter().map(Arc::new).collect()
    }
}

/// Identifiers of a model's gates in registration order
pub fn gate_ids(model: &GeneratedModel) -> Vec<String> {
    model
        .gates
        .iter()
        .map(|gate| gate.id().as_str().to_string())
        .collect()
}
