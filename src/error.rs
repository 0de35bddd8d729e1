use thiserror::Error;

use crate::circuit::{ComponentId, ComponentKind};

/// A circuit that cannot be wired up as laid out.
///
/// Returned by [`crate::resolve::Resolver::resolve`] and
/// [`crate::simulator::Simulator::compile`]; never recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{kind} #{component} takes a single input but is driven by components {sources:?}")]
    Overconnected {
        component: ComponentId,
        kind: ComponentKind,
        sources: Vec<ComponentId>,
    },

    #[error("gate #{component} has two input slots but is driven by components {sources:?}")]
    GateOverconnected {
        component: ComponentId,
        sources: Vec<ComponentId>,
    },

    // a field named `source` would be taken as the error cause by thiserror
    #[error("component #{component} is fed by #{unknown}, which is not in the circuit")]
    UnknownSource {
        component: ComponentId,
        unknown: ComponentId,
    },

    #[error("combinational loop through components {0:?}")]
    Cycle(Vec<ComponentId>),

    #[error("dependency mapping covers {mapping} components but the circuit has {components}")]
    LengthMismatch { mapping: usize, components: usize },
}
