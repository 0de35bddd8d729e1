use serde::{Deserialize, Serialize};

use crate::common::Vec2;

// 커넥터 방향
#[derive(
    Debug,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Input,
    Output,
    Bidirectional,
}

impl Direction {
    pub fn accepts_input(&self) -> bool {
        matches!(self, Direction::Input | Direction::Bidirectional)
    }

    pub fn drives_output(&self) -> bool {
        matches!(self, Direction::Output | Direction::Bidirectional)
    }
}

// 부품에 붙어있는 연결 지점 (hotspot)
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    // 부품 위치 기준의 상대 좌표, 회전이 이미 적용된 값
    pub offset: Vec2,
    pub radius: f64,
    pub direction: Direction,
}

impl Connector {
    pub fn new(offset: Vec2, radius: f64, direction: Direction) -> Self {
        Self {
            offset,
            radius,
            direction,
        }
    }

    pub fn input(offset: Vec2, radius: f64) -> Self {
        Self::new(offset, radius, Direction::Input)
    }

    pub fn output(offset: Vec2, radius: f64) -> Self {
        Self::new(offset, radius, Direction::Output)
    }

    pub fn bidirectional(offset: Vec2, radius: f64) -> Self {
        Self::new(offset, radius, Direction::Bidirectional)
    }

    pub fn rotated(&self, degrees: f64) -> Self {
        Self {
            offset: self.offset.rotate(degrees),
            ..*self
        }
    }
}

/// Two hotspots overlap when their centers are no further apart than the sum
/// of their radii. `at` and `other_at` are the owning components' positions.
pub fn overlap(at: Vec2, connector: &Connector, other_at: Vec2, other: &Connector) -> bool {
    let a = at + connector.offset;
    let b = other_at + other.offset;

    a.distance(&b) <= connector.radius + other.radius
}
