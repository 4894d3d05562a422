//! Circular motion path for the hidden shape.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::mask::Position;

/// Sense of rotation along the circular path.
///
/// In image coordinates (y grows downward) a positive angle turns clockwise
/// on screen, so `Counterclockwise` negates the angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    Counterclockwise,
}

const DIRECTION_NAMES: &[&str] = &["clockwise", "counterclockwise"];

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Clockwise, Direction::Counterclockwise];

    /// Parses `"clockwise"` or `"counterclockwise"`.
    ///
    /// Returns `SynthError::UnknownDirection` for anything else.
    pub fn from_name(name: &str) -> Result<Self, SynthError> {
        match name {
            "clockwise" => Ok(Direction::Clockwise),
            "counterclockwise" => Ok(Direction::Counterclockwise),
            _ => Err(SynthError::UnknownDirection(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::Counterclockwise => "counterclockwise",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        DIRECTION_NAMES
    }

    /// +1 for clockwise, -1 for counterclockwise.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::Counterclockwise => -1.0,
        }
    }
}

/// Shape center for `frame_index` on a circle of `path_radius` around `center`.
///
/// The angle is `2π · frame_index / total_frames`, negated for
/// counterclockwise motion; the point is rounded to the nearest pixel.
/// `frame_index == total_frames` closes the loop at the starting point.
///
/// Returns `SynthError::ZeroFrameCount` if `total_frames` is zero.
pub fn position_at(
    frame_index: usize,
    total_frames: usize,
    path_radius: f64,
    center: Position,
    direction: Direction,
) -> Result<Position, SynthError> {
    if total_frames == 0 {
        return Err(SynthError::ZeroFrameCount);
    }
    let angle = direction.sign() * TAU * frame_index as f64 / total_frames as f64;
    let x = center.x as f64 + path_radius * angle.cos();
    let y = center.y as f64 + path_radius * angle.sin();
    Ok(Position::new(x.round() as i64, y.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Position = Position { x: 320, y: 240 };

    #[test]
    fn frame_zero_starts_to_the_right_of_center() {
        for dir in Direction::ALL {
            let p = position_at(0, 60, 160.0, CENTER, dir).unwrap();
            assert_eq!(p, Position::new(480, 240));
        }
    }

    #[test]
    fn quarter_turn_clockwise_moves_down_on_screen() {
        let p = position_at(15, 60, 100.0, CENTER, Direction::Clockwise).unwrap();
        assert_eq!(p, Position::new(320, 340));
    }

    #[test]
    fn quarter_turn_counterclockwise_moves_up_on_screen() {
        let p = position_at(15, 60, 100.0, CENTER, Direction::Counterclockwise).unwrap();
        assert_eq!(p, Position::new(320, 140));
    }

    #[test]
    fn directions_mirror_across_horizontal_axis() {
        for i in 0..60 {
            let cw = position_at(i, 60, 160.0, CENTER, Direction::Clockwise).unwrap();
            let ccw = position_at(i, 60, 160.0, CENTER, Direction::Counterclockwise).unwrap();
            assert_eq!(cw.x, ccw.x, "x differs at frame {i}");
            assert_eq!(cw.y - CENTER.y, CENTER.y - ccw.y, "y not mirrored at frame {i}");
        }
    }

    #[test]
    fn position_is_rounded_not_truncated() {
        // 1/12 turn: 10 * cos(pi/6) = 8.66 -> 9, 10 * sin(pi/6) = 4.99.. -> 5.
        // Truncation would land on (8, 4).
        let origin = Position::new(0, 0);
        let p = position_at(1, 12, 10.0, origin, Direction::Clockwise).unwrap();
        assert_eq!(p, Position::new(9, 5));
        let q = position_at(1, 12, 10.0, origin, Direction::Counterclockwise).unwrap();
        assert_eq!(q, Position::new(9, -5));
    }

    #[test]
    fn zero_total_frames_is_rejected() {
        assert!(matches!(
            position_at(0, 0, 10.0, CENTER, Direction::Clockwise),
            Err(SynthError::ZeroFrameCount)
        ));
    }

    #[test]
    fn zero_radius_stays_at_center() {
        let p = position_at(7, 60, 0.0, CENTER, Direction::Clockwise).unwrap();
        assert_eq!(p, CENTER);
    }

    #[test]
    fn direction_names_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_name(dir.name()).unwrap(), dir);
        }
        assert!(matches!(
            Direction::from_name("anticlockwise"),
            Err(SynthError::UnknownDirection(_))
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn path_is_closed_loop(
                n in 1_usize..500,
                radius in 0.0_f64..2000.0,
                cx in -1000_i64..1000,
                cy in -1000_i64..1000,
                ccw: bool,
            ) {
                let dir = if ccw { Direction::Counterclockwise } else { Direction::Clockwise };
                let c = Position::new(cx, cy);
                prop_assert_eq!(
                    position_at(0, n, radius, c, dir).unwrap(),
                    position_at(n, n, radius, c, dir).unwrap()
                );
            }

            #[test]
            fn positions_stay_on_the_path(
                i in 0_usize..1000,
                n in 1_usize..1000,
                radius in 1.0_f64..500.0,
            ) {
                let origin = Position::new(0, 0);
                let p = position_at(i, n, radius, origin, Direction::Clockwise).unwrap();
                let d = ((p.x * p.x + p.y * p.y) as f64).sqrt();
                // Rounding moves each axis by at most 0.5.
                prop_assert!((d - radius).abs() <= 0.75, "distance {d} vs radius {radius}");
            }
        }
    }
}
