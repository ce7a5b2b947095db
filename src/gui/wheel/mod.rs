use std::f64::consts::PI;
use thiserror::Error;

pub mod cache;
pub mod classify;
pub mod geometry;
pub mod gesture;
pub mod view;
pub mod widget;

pub use cache::LayerCache;
pub use classify::{Frame, Hit};
pub use geometry::{Field, Point, Region, Segment};
pub use gesture::{Gesture, Notification, Phase, Touch, Transition};
pub use view::{Scene, draw};
pub use widget::CircleWidget;

pub const SEGMENT_COUNT: usize = 12;
pub const SEGMENT_ANGLE: f64 = 2.0 * PI / SEGMENT_COUNT as f64;

pub const R0: f64 = 0.25; // center hole
pub const R2: f64 = 0.92; // inner edge of the rim
pub const R1: f64 = 0.674_129_067_760_766_4; // sqrt((R0^2 + R2^2) / 2), equal area fields

/// Start angle of sector 0's fields, measured clockwise from the positive x axis.
pub const FIELD_START: f64 = 255.0 * PI / 180.0;

pub const LABEL_SIZE: f64 = 0.16;
pub const GRID_WIDTH: f64 = 0.016;

pub const KEY_SIGNATURE_HALF_HEIGHT: f64 = R0 / 1.8;
pub const KEY_SIGNATURE_ASPECT: f64 = 1.38;

pub const DEFAULT_SIZE: i32 = 320;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Layer cache has not been built")]
    NotSized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r1_splits_fields_by_area() {
        assert!((R1 - ((R0 * R0 + R2 * R2) / 2.0).sqrt()).abs() < 1e-12);
        let minor = R1 * R1 - R0 * R0;
        let major = R2 * R2 - R1 * R1;
        assert!((minor - major).abs() < 1e-12);
        assert!(R0 < R1 && R1 < R2 && R2 < 1.0);
    }
}
