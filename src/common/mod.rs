use serde::{Deserialize, Serialize};

// 화면 좌표 (x, y), y축은 아래 방향
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
)]
pub struct Vec2(pub f64, pub f64);

impl Vec2 {
    pub const ZERO: Vec2 = Vec2(0., 0.);

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn length(&self) -> f64 {
        self.0.hypot(self.1)
    }

    pub fn distance(&self, other: &Vec2) -> f64 {
        (*self - *other).length()
    }

    // rotates counterclockwise by `degrees` in the editor's coordinate convention
    pub fn rotate(&self, degrees: f64) -> Vec2 {
        if degrees == 0. {
            return *self;
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2(self.0 * cos - self.1 * sin, self.0 * sin + self.1 * cos).snap()
    }

    // floor division by an integer, matching how the editor computes midpoints
    pub fn floor_div(&self, rhs: f64) -> Vec2 {
        Vec2((self.0 / rhs).floor(), (self.1 / rhs).floor())
    }

    // quarter turns leave floating noise like 6.1e-17 behind
    fn snap(self) -> Vec2 {
        const EPS: f64 = 1e-9;

        let snap = |v: f64| {
            let r = v.round();
            if (v - r).abs() < EPS {
                r
            } else {
                v
            }
        };

        Vec2(snap(self.0), snap(self.1))
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from(value: (f64, f64)) -> Self {
        Vec2(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec2;

    #[test]
    fn unittest_vec2_distance() {
        let a = Vec2(3., 0.);
        let b = Vec2(0., 4.);

        assert_eq!(a.distance(&b), 5.);
        assert_eq!(a - b, Vec2(3., -4.));
        assert_eq!(a + b, Vec2(3., 4.));
    }

    #[test]
    fn unittest_vec2_quarter_turns() {
        let v = Vec2(16., 0.);

        assert_eq!(v.rotate(-90.), Vec2(0., -16.));
        assert_eq!(Vec2(-16., 0.).rotate(-90.), Vec2(0., 16.));
        assert_eq!(v.rotate(180.), Vec2(-16., 0.));
        assert_eq!(v.rotate(0.), v);
    }

    #[test]
    fn unittest_vec2_floor_div() {
        assert_eq!(Vec2(131., 291.).floor_div(1.), Vec2(131., 291.));
        assert_eq!((Vec2(115., 291.) + Vec2(148., 291.)).floor_div(2.), Vec2(131., 291.));
    }
}
