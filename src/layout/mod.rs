//! The editor's saved circuit format.
//!
//! ```json
//! { "drawables": [ { "type": "AndGate", "dict": { "pos": [200.0, 300.0], "angle": 0, "label": "and" } } ],
//!   "library":   [ ... ] }
//! ```
//!
//! `drawables` are the placed parts, in component id order. `library` is the
//! editor's palette; it is read back but never simulated.

use std::path::Path;

use eyre::WrapErr;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::circuit::{Component, GateKind};
use crate::common::Vec2;
use crate::utils::Verify;

pub mod footprint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub drawables: Vec<Placement>,
    #[serde(default)]
    pub library: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "dict")]
pub enum Placement {
    AndGate(Placed),
    NandGate(Placed),
    Input(Placed),
    Output(Placed),
    Line(LinePlacement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placed {
    pub pos: Vec2,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePlacement {
    pub start: Vec2,
    pub end: Vec2,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl Placement {
    pub fn to_component(&self) -> Component {
        let (mut component, angle, label) = match self {
            Placement::AndGate(p) => (footprint::gate(GateKind::And, p.pos), p.angle, &p.label),
            Placement::NandGate(p) => (footprint::gate(GateKind::Nand, p.pos), p.angle, &p.label),
            Placement::Input(p) => (footprint::input(p.pos), p.angle, &p.label),
            Placement::Output(p) => (footprint::output(p.pos), p.angle, &p.label),
            Placement::Line(l) => (footprint::line(l.start, l.end), l.angle, &l.label),
        };

        // the editor turns the image by `angle` and its hotspots the other way
        if angle != 0. {
            component.rotate(-angle);
        }

        if let Some(label) = label {
            component.label = label.clone();
        }

        component
    }
}

impl Layout {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read layout {}", path.display()))?;

        Self::from_json(&text).wrap_err_with(|| format!("invalid layout {}", path.display()))
    }

    pub fn from_json(text: &str) -> eyre::Result<Self> {
        let layout: Layout = serde_json::from_str(text)?;
        layout.verify()?;

        Ok(layout)
    }

    pub fn to_json(&self) -> eyre::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn components(&self) -> Vec<Component> {
        self.drawables.iter().map(Placement::to_component).collect_vec()
    }
}

impl Verify for Layout {
    fn verify(&self) -> eyre::Result<()> {
        for (index, placement) in self.drawables.iter().chain(&self.library).enumerate() {
            match placement {
                Placement::Line(line) => {
                    eyre::ensure!(
                        finite(line.start) && finite(line.end) && line.angle.is_finite(),
                        "placement {index}: line coordinates must be finite"
                    );
                    eyre::ensure!(
                        line.start != line.end,
                        "placement {index}: line starts and ends at {:?}",
                        line.start
                    );
                }
                Placement::AndGate(p)
                | Placement::NandGate(p)
                | Placement::Input(p)
                | Placement::Output(p) => {
                    eyre::ensure!(
                        finite(p.pos) && p.angle.is_finite(),
                        "placement {index}: position must be finite"
                    );
                }
            }
        }

        Ok(())
    }
}

fn finite(v: Vec2) -> bool {
    v.x().is_finite() && v.y().is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ComponentKind;
    use crate::resolve::resolve;

    #[test]
    fn unittest_load_single_and_gate() -> eyre::Result<()> {
        let layout = Layout::load("test/single_and_gate.json")?;

        assert_eq!(layout.drawables.len(), 7);
        assert_eq!(layout.library.len(), 4);

        let components = layout.components();
        assert_eq!(
            components.iter().map(|c| c.kind).collect_vec(),
            vec![
                ComponentKind::Gate(GateKind::And),
                ComponentKind::Input,
                ComponentKind::Input,
                ComponentKind::Output,
                ComponentKind::Wire,
                ComponentKind::Wire,
                ComponentKind::Wire,
            ]
        );
        assert_eq!(components[0].label, "and");
        assert_eq!(components[4].label, "");

        let map = resolve(&components)?;
        assert_eq!(map.sources(0), &[4, 5]);
        assert_eq!(map.sources(3), &[6]);

        Ok(())
    }

    #[test]
    fn unittest_angle_turns_hotspots() -> eyre::Result<()> {
        let layout = Layout::from_json(
            r#"{ "drawables": [
                { "type": "Input", "dict": { "pos": [0.0, 0.0], "angle": 90 } }
            ] }"#,
        )?;

        let input = &layout.components()[0];
        assert_eq!(input.connectors[0].offset, Vec2(0., -19.));
        assert_eq!(input.label, "input");
        assert!(layout.library.is_empty());

        Ok(())
    }

    #[test]
    fn unittest_verify_rejects_degenerate_line() {
        let result = Layout::from_json(
            r#"{ "drawables": [
                { "type": "Line", "dict": { "start": [1.0, 1.0], "end": [1.0, 1.0] } }
            ] }"#,
        );

        assert!(result.is_err());
        assert!(Layout::from_json(r#"{ "drawables": [ { "type": "Buffer", "dict": {} } ] }"#).is_err());
    }

    #[test]
    fn unittest_layout_json_roundtrip() -> eyre::Result<()> {
        let layout = Layout::load("test/single_and_gate.json")?;
        let again = Layout::from_json(&layout.to_json()?)?;

        assert_eq!(layout, again);

        Ok(())
    }
}
