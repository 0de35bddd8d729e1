use std::ops::Index;

use strum::IntoEnumIterator;

use crate::circuit::{ComponentKind, GateKind};

/// Boolean transfer functions of two inputs. Each variant owns a block of four
/// truth table entries, so adding a variant extends the table without
/// touching the evaluation loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum Operation {
    And,
    NotOr,
}

impl Operation {
    pub fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            Operation::And => a && b,
            Operation::NotOr => !(a || b),
        }
    }

    // base offset into the truth table
    pub fn opcode(&self) -> usize {
        *self as usize * 4
    }
}

impl From<ComponentKind> for Operation {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            // pass-through is AND of a value with itself
            ComponentKind::Gate(GateKind::And)
            | ComponentKind::Input
            | ComponentKind::Output
            | ComponentKind::Wire => Operation::And,
            ComponentKind::Gate(GateKind::Nand) => Operation::NotOr,
        }
    }
}

/// Precomputed outputs of every operation, indexed by
/// `input1 + 2 * input2 + opcode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    values: Vec<u8>,
}

impl TruthTable {
    pub fn new() -> Self {
        let values = Operation::iter()
            .flat_map(|op| {
                [(false, false), (true, false), (false, true), (true, true)]
                    .map(|(a, b)| op.apply(a, b) as u8)
            })
            .collect();

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn lookup(&self, input1: u8, input2: u8, opcode: usize) -> u8 {
        self.values[input1 as usize + 2 * input2 as usize + opcode]
    }
}

impl Default for TruthTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for TruthTable {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
