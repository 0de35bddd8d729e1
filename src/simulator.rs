use itertools::izip;

use crate::circuit::{Component, ComponentId, ComponentKind};
use crate::error::ConfigurationError;
use crate::logic::{Operation, TruthTable};
use crate::resolve::DependencyMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunStatus {
    // `steps` changing steps happened before the unchanged one
    Converged { steps: usize },
    // still changing after `steps` steps; states are whatever the last step left
    NonConvergence { steps: usize },
}

impl RunStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, RunStatus::Converged { .. })
    }

    pub fn steps(&self) -> usize {
        match self {
            RunStatus::Converged { steps } | RunStatus::NonConvergence { steps } => *steps,
        }
    }
}

/// Flat evaluation table of one simulation session.
///
/// All arrays are indexed by component id. `output` and `next` carry one
/// extra ground slot at index `len`, never written, that unconnected input
/// slots read from.
#[derive(Debug, Clone)]
pub struct Simulator {
    truth_table: TruthTable,
    opcode: Vec<usize>,
    input1_source: Vec<ComponentId>,
    input2_source: Vec<ComponentId>,
    input1: Vec<u8>,
    input2: Vec<u8>,
    output: Vec<u8>,
    next: Vec<u8>,
    // ids of Input components, re-seeded on toggle
    inputs: Vec<ComponentId>,
    cycle: usize,
}

impl Simulator {
    pub fn compile(
        components: &[Component],
        map: &DependencyMap,
    ) -> Result<Self, ConfigurationError> {
        if components.len() != map.len() {
            return Err(ConfigurationError::LengthMismatch {
                mapping: map.len(),
                components: components.len(),
            });
        }

        let len = components.len();
        let ground = len;

        let mut input1_source = Vec::with_capacity(len);
        let mut input2_source = Vec::with_capacity(len);
        let mut inputs = Vec::new();

        for (id, component) in components.iter().enumerate() {
            let sources = map.sources(id);

            if let Some(&unknown) = sources.iter().find(|&&source| source >= len) {
                return Err(ConfigurationError::UnknownSource {
                    component: id,
                    unknown,
                });
            }

            let (slot1, slot2) = match component.kind {
                ComponentKind::Input => {
                    inputs.push(id);
                    (id, id)
                }
                ComponentKind::Output | ComponentKind::Wire => match sources {
                    [] => (ground, ground),
                    [source] => (*source, *source),
                    _ => {
                        return Err(ConfigurationError::Overconnected {
                            component: id,
                            kind: component.kind,
                            sources: sources.to_vec(),
                        })
                    }
                },
                ComponentKind::Gate(..) => match sources {
                    [] => (ground, ground),
                    [source] => (*source, ground),
                    [first, second] => (*first, *second),
                    _ => {
                        return Err(ConfigurationError::GateOverconnected {
                            component: id,
                            sources: sources.to_vec(),
                        })
                    }
                },
            };

            input1_source.push(slot1);
            input2_source.push(slot2);
        }

        let opcode = components
            .iter()
            .map(|component| Operation::from(component.kind).opcode())
            .collect();

        let mut sim = Self {
            truth_table: TruthTable::new(),
            opcode,
            input1_source,
            input2_source,
            input1: vec![0; len],
            input2: vec![0; len],
            output: vec![0; len + 1],
            next: vec![0; len + 1],
            inputs,
            cycle: 0,
        };

        sim.reseed_inputs(components);

        tracing::info!(
            "compiled {} components, {} inputs",
            len,
            sim.inputs.len()
        );

        Ok(sim)
    }

    pub fn len(&self) -> usize {
        self.opcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcode.is_empty()
    }

    /// One synchronous pass over every component. Returns whether any output
    /// changed; the next call sees this pass's outputs as its inputs.
    pub fn step(&mut self) -> bool {
        let len = self.len();

        for (next, &a, &b, &opcode) in izip!(
            &mut self.next[..len],
            &self.input1,
            &self.input2,
            &self.opcode
        ) {
            *next = self.truth_table.lookup(a, b, opcode);
        }

        let changed = self.next[..len] != self.output[..len];

        for (a, b, &source1, &source2) in izip!(
            &mut self.input1,
            &mut self.input2,
            &self.input1_source,
            &self.input2_source
        ) {
            *a = self.next[source1];
            *b = self.next[source2];
        }

        std::mem::swap(&mut self.output, &mut self.next);
        self.cycle += 1;

        changed
    }

    /// Steps until a pass changes nothing. Up to `max_steps` changing passes
    /// are allowed; the pass after the last of them decides convergence.
    pub fn run(&mut self, max_steps: usize) -> RunStatus {
        let mut steps = 0;

        while steps <= max_steps {
            if !self.step() {
                tracing::debug!("converged after {steps} steps (cycle {})", self.cycle);
                return RunStatus::Converged { steps };
            }
            steps += 1;
        }

        tracing::warn!("no stable state after {steps} steps, stopping");
        RunStatus::NonConvergence { steps }
    }

    /// Copies the held state of every Input component into both of its input
    /// slots. Call after toggling an Input and before stepping again.
    pub fn reseed_inputs(&mut self, components: &[Component]) {
        for &id in &self.inputs {
            let state = components[id].state as u8;
            self.input1[id] = state;
            self.input2[id] = state;
        }
    }

    pub fn writeback(&self, components: &mut [Component]) {
        for (component, &output) in components.iter_mut().zip(&self.output) {
            component.state = output != 0;
        }
    }

    pub fn output(&self, id: ComponentId) -> bool {
        self.output[id] != 0
    }

    pub fn outputs(&self) -> &[u8] {
        &self.output[..self.len()]
    }

    pub fn input1_sources(&self) -> &[ComponentId] {
        &self.input1_source
    }

    pub fn input2_sources(&self) -> &[ComponentId] {
        &self.input2_source
    }

    pub fn opcodes(&self) -> &[usize] {
        &self.opcode
    }

    pub fn cycle(&self) -> usize {
        self.cycle
    }
}
