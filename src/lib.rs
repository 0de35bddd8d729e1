pub mod circuit;
pub mod common;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod logic;
pub mod resolve;
pub mod session;
pub mod simulator;
pub mod utils;

pub use circuit::{Component, ComponentId, ComponentKind, Connector, Direction, GateKind};
pub use config::SimulationConfig;
pub use error::ConfigurationError;
pub use resolve::{resolve, DependencyMap, Resolver};
pub use session::Session;
pub use simulator::{RunStatus, Simulator};
