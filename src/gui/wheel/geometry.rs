//! Unit-disc geometry of the wheel.
//!
//! Coordinates are normalized so the rim has radius 1 and the widget center is the origin,
//! with y growing downwards like the screen. Sector 0 is centered straight up and indices
//! grow clockwise.

use super::{FIELD_START, R0, R1, R2, SEGMENT_ANGLE, SEGMENT_COUNT};
use crate::theory::{FIFTH, PitchClass};
use derive_more::{Display, Into};
use std::f64::consts::PI;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn radius_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Point at `radius` in the middle of sector `segment`.
    pub fn polar(radius: f64, segment: Segment) -> Self {
        let angle = segment.index() as f64 * SEGMENT_ANGLE;
        Self::new(radius * angle.sin(), -radius * angle.cos())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Into)]
pub struct Segment(usize);

impl Segment {
    pub fn new(value: i64) -> Self {
        Self(value.rem_euclid(SEGMENT_COUNT as i64) as usize)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Sectors travelled counter-clockwise from `self` to `to`, in `0..12`.
    pub fn steps_to(self, to: Segment) -> usize {
        (self.0 + SEGMENT_COUNT - to.0) % SEGMENT_COUNT
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..SEGMENT_COUNT).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    Center,
    Minor,
    Major,
    Rim,
    Outside,
}

pub fn region_of(radius_squared: f64) -> Region {
    if radius_squared < R0 * R0 {
        Region::Center
    } else if radius_squared < R1 * R1 {
        Region::Minor
    } else if radius_squared < R2 * R2 {
        Region::Major
    } else if radius_squared <= 1.0 {
        Region::Rim
    } else {
        // also catches NaN
        Region::Outside
    }
}

pub fn segment_of(x: f64, y: f64) -> Segment {
    let angle = x.atan2(-y) * 6.0 / PI;
    Segment::new((angle + 12.5).floor() as i64)
}

/// Major root selected by touching `segment` while `top` sits at the reference angle.
pub fn root_note(top: PitchClass, segment: Segment) -> PitchClass {
    PitchClass::new(FIFTH * (top.index() + segment.index()) as i64)
}

/// One annular field restricted to a single sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub region: Region,
    pub inner: f64,
    pub outer: f64,
}

impl Field {
    pub const MINOR: Field = Field::new(Region::Minor, R0, R1);
    pub const MAJOR: Field = Field::new(Region::Major, R1, R2);
    pub const RIM: Field = Field::new(Region::Rim, R2, 1.0);

    pub const ALL: [Field; 3] = [Self::MINOR, Self::MAJOR, Self::RIM];

    const fn new(region: Region, inner: f64, outer: f64) -> Self {
        Self {
            region,
            inner,
            outer,
        }
    }

    pub fn for_region(region: Region) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.region == region)
    }

    /// Clockwise angular range of this field within `segment`, in radians from the x axis.
    pub fn angles(&self, segment: Segment) -> (f64, f64) {
        let start = FIELD_START + segment.index() as f64 * SEGMENT_ANGLE;
        (start, start + SEGMENT_ANGLE)
    }

    #[cfg(test)]
    pub fn contains(&self, point: Point, segment: Segment) -> bool {
        region_of(point.radius_squared()) == self.region && segment_of(point.x, point.y) == segment
    }

    /// Adds the closed outline of the field in `segment` to the current path.
    pub fn trace(&self, cr: &cairo::Context, segment: Segment) {
        let (start, end) = self.angles(segment);
        cr.new_sub_path();
        cr.arc(0.0, 0.0, self.outer, start, end);
        cr.arc_negative(0.0, 0.0, self.inner, end, start);
        cr.close_path();
    }
}
