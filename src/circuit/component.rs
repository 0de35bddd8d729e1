use std::fmt;

use serde::{Deserialize, Serialize};

use super::connector::Connector;
use crate::common::Vec2;

// 게이트의 종류
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum GateKind {
    And,
    Nand,
}

// 부품의 종류
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Gate(GateKind),
    Input,
    Output,
    Wire,
}

impl ComponentKind {
    pub fn name(&self) -> String {
        match self {
            ComponentKind::Gate(gate) => format!("{gate}Gate"),
            ComponentKind::Input => "Input".to_owned(),
            ComponentKind::Output => "Output".to_owned(),
            ComponentKind::Wire => "Wire".to_owned(),
        }
    }

    pub fn is_gate(&self) -> bool {
        matches!(self, ComponentKind::Gate(..))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, ComponentKind::Input)
    }

    pub fn is_output(&self) -> bool {
        matches!(self, ComponentKind::Output)
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, ComponentKind::Wire)
    }

    // number of upstream sources this kind can take
    pub fn max_sources(&self) -> usize {
        match self {
            ComponentKind::Gate(..) => 2,
            ComponentKind::Output | ComponentKind::Wire => 1,
            ComponentKind::Input => 0,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// 캔버스에 배치된 회로 소자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub position: Vec2,
    pub connectors: Vec<Connector>,
    pub state: bool,
    #[serde(default)]
    pub label: String,
}

impl Component {
    pub fn new(kind: ComponentKind, position: Vec2, connectors: Vec<Connector>) -> Self {
        Self {
            kind,
            position,
            connectors,
            state: false,
            label: kind.to_string().to_lowercase(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_state(mut self, state: bool) -> Self {
        self.state = state;
        self
    }

    /// Absolute position of one of this component's connectors.
    pub fn connector_position(&self, connector: &Connector) -> Vec2 {
        self.position + connector.offset
    }

    pub fn toggle(&mut self) {
        self.state = !self.state;
    }

    // rotate all connector offsets, as the editor does when a part is turned
    pub fn rotate(&mut self, degrees: f64) {
        for connector in &mut self.connectors {
            *connector = connector.rotated(degrees);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unittest_component_kind_names() {
        assert_eq!(ComponentKind::Gate(GateKind::Nand).to_string(), "NandGate");
        assert_eq!(ComponentKind::Wire.to_string(), "Wire");
        assert_eq!("And".parse::<GateKind>().unwrap(), GateKind::And);
    }

    #[test]
    fn unittest_component_toggle_and_rotate() {
        let mut input = Component::new(
            ComponentKind::Input,
            Vec2(10., 10.),
            vec![Connector::output(Vec2(19., 0.), 6.)],
        );

        assert_eq!(input.label, "input");

        input.toggle();
        assert!(input.state);
        input.toggle();
        assert!(!input.state);

        input.rotate(-90.);
        assert_eq!(input.connectors[0].offset, Vec2(0., -19.));
        assert_eq!(input.connector_position(&input.connectors[0]), Vec2(10., -9.));
    }
}
