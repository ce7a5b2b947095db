use super::geometry::{Point, Region, Segment, region_of, segment_of};

/// Maps widget pixels onto the unit disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub center: Point,
    pub norm: Point,
}

impl Frame {
    /// Returns `None` for degenerate sizes, where no point can be normalized.
    pub fn from_size(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
        Some(Self {
            center,
            norm: Point::new(1.0 / center.x, 1.0 / center.y),
        })
    }

    pub fn normalize(&self, pixel: Point) -> Point {
        Point::new(
            (pixel.x - self.center.x) * self.norm.x,
            (pixel.y - self.center.y) * self.norm.y,
        )
    }

    pub fn classify(&self, pixel: Point) -> Option<Hit> {
        if !pixel.is_finite() {
            return None;
        }
        let p = self.normalize(pixel);
        Some(Hit {
            region: region_of(p.radius_squared()),
            segment: segment_of(p.x, p.y),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub region: Region,
    pub segment: Segment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::wheel::{R0, R1, R2};

    fn frame() -> Frame {
        Frame::from_size(200, 200).unwrap()
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(Frame::from_size(0, 100), None);
        assert_eq!(Frame::from_size(100, -1), None);
    }

    #[test]
    fn test_classify_straight_up() {
        let f = frame();
        let at = |r: f64| f.classify(Point::new(100.0, 100.0 - r * 100.0)).unwrap();
        assert_eq!(at(0.1).region, Region::Center);
        assert_eq!(at((R0 + R1) / 2.0).region, Region::Minor);
        assert_eq!(at((R1 + R2) / 2.0).region, Region::Major);
        assert_eq!(at(0.96).region, Region::Rim);
        assert_eq!(at(1.0).region, Region::Rim);
        assert_eq!(at(1.2).region, Region::Outside);
        assert_eq!(at(0.5).segment, Segment::new(0));
    }

    #[test]
    fn test_classify_right_side() {
        let hit = frame().classify(Point::new(180.0, 100.0)).unwrap();
        assert_eq!(hit.segment, Segment::new(3));
        assert_eq!(hit.region, Region::Major);
    }

    #[test]
    fn test_non_square_frame_normalizes_per_axis() {
        let f = Frame::from_size(400, 200).unwrap();
        let p = f.normalize(Point::new(400.0, 200.0));
        assert_eq!(p, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        assert_eq!(frame().classify(Point::new(f64::NAN, 10.0)), None);
        assert_eq!(frame().classify(Point::new(10.0, f64::INFINITY)), None);
    }
}
