pub mod component;
pub mod connector;

pub use component::{Component, ComponentKind, GateKind};
pub use connector::{overlap, Connector, Direction};

/// Index of a component in the ordered component list.
pub type ComponentId = usize;
