//! Connector geometry of the editor's parts.
//!
//! Offsets follow the editor's image layout: a part of size `w x h` is drawn
//! centered on its position, so an image pixel `(px, py)` sits at offset
//! `(px - w / 2, py - h / 2)` with integer halving.

use crate::circuit::{Component, ComponentKind, Connector, GateKind};
use crate::common::Vec2;

pub const HOTSPOT_RADIUS: f64 = 6.;

// (width, height) of each part's image
pub const GATE_SIZE: (i32, i32) = (100, 54);
pub const INPUT_SIZE: (i32, i32) = (38, 38);
pub const OUTPUT_SIZE: (i32, i32) = (34, 34);

const LINE_WIDTH: i32 = 1;
// line hotspots sit this far in from the ends of the line image
const LINE_INSET: i32 = 5;

fn pixel((w, h): (i32, i32), px: i32, py: i32) -> Vec2 {
    Vec2((px - w / 2) as f64, (py - h / 2) as f64)
}

pub fn gate(kind: GateKind, position: Vec2) -> Component {
    let (w, h) = GATE_SIZE;

    Component::new(
        ComponentKind::Gate(kind),
        position,
        vec![
            Connector::output(pixel(GATE_SIZE, w, h / 2), HOTSPOT_RADIUS),
            Connector::input(pixel(GATE_SIZE, 0, h / 3), HOTSPOT_RADIUS),
            Connector::input(pixel(GATE_SIZE, 0, 2 * h / 3), HOTSPOT_RADIUS),
        ],
    )
    .with_label(kind.to_string().to_lowercase())
}

pub fn input(position: Vec2) -> Component {
    let (w, h) = INPUT_SIZE;

    Component::new(
        ComponentKind::Input,
        position,
        vec![Connector::output(pixel(INPUT_SIZE, w, h / 2), HOTSPOT_RADIUS)],
    )
}

pub fn output(position: Vec2) -> Component {
    let (_, h) = OUTPUT_SIZE;

    Component::new(
        ComponentKind::Output,
        position,
        vec![Connector::input(pixel(OUTPUT_SIZE, 0, h / 2), HOTSPOT_RADIUS)],
    )
}

/// A straight wire between two points with a bidirectional hotspot near each
/// end. The image is always built horizontally; mostly-vertical lines are
/// turned a quarter afterwards.
pub fn line(start: Vec2, end: Vec2) -> Component {
    let v = end - start;
    let vertical = v.y().abs() > v.x().abs();
    let (along, across) = if vertical {
        (v.y(), v.x())
    } else {
        (v.x(), v.y())
    };

    let size = (
        (LINE_WIDTH + 15).max(along.abs() as i32) + 2 * LINE_INSET,
        (LINE_WIDTH + 15).max(across.abs() as i32),
    );
    let (w, h) = size;

    let mut component = Component::new(
        ComponentKind::Wire,
        (start + end).floor_div(2.),
        vec![
            Connector::bidirectional(pixel(size, LINE_INSET, h / 2), HOTSPOT_RADIUS),
            Connector::bidirectional(pixel(size, w - LINE_INSET, h / 2), HOTSPOT_RADIUS),
        ],
    )
    .with_label("");

    if vertical {
        component.rotate(-90.);
    }

    component
}
