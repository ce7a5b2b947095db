//! Size-dependent raster layers of the wheel.
//!
//! The fills and strokes below are far too many to redo every frame, so they are painted
//! once per widget size and composited by the scene renderer.

use super::geometry::{Field, Segment};
use super::{FIELD_START, GRID_WIDTH, R0, R1, R2, SEGMENT_ANGLE};
use crate::gui::theme::{WheelColors, set_source};
use cairo::{Context, Format, ImageSurface, LinearGradient};
use std::f64::consts::PI;

pub struct Layers {
    pub wheel: ImageSurface,
    pub grid: ImageSurface,
    pub shadow: ImageSurface,
}

#[derive(Default)]
pub struct LayerCache {
    size: Option<(i32, i32)>,
    layers: Option<Layers>,
    rebuilds: usize,
}

impl LayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the layers unless they already match `width` x `height`.
    ///
    /// Returns whether a rebuild happened. On failure the old layers are dropped, so
    /// nothing stale is drawn at the new size.
    pub fn ensure(
        &mut self,
        width: i32,
        height: i32,
        colors: &WheelColors,
    ) -> Result<bool, cairo::Error> {
        if self.size == Some((width, height)) && self.layers.is_some() {
            return Ok(false);
        }
        self.size = Some((width, height));
        self.layers = None;

        let layers = Layers {
            wheel: paint_layer(width, height, |cr| paint_wheel(cr, colors))?,
            grid: paint_layer(width, height, |cr| paint_grid(cr, colors))?,
            shadow: paint_layer(width, height, |cr| paint_shadow(cr, colors))?,
        };
        self.layers = Some(layers);
        self.rebuilds += 1;
        log::debug!("Rebuilt wheel layers at {}x{}", width, height);
        Ok(true)
    }

    pub fn invalidate(&mut self) {
        self.size = None;
        self.layers = None;
    }

    pub fn layers(&self) -> Option<&Layers> {
        self.layers.as_ref()
    }

    #[cfg(test)]
    pub fn size(&self) -> Option<(i32, i32)> {
        self.size
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

fn paint_layer(
    width: i32,
    height: i32,
    paint: impl FnOnce(&Context) -> Result<(), cairo::Error>,
) -> Result<ImageSurface, cairo::Error> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&surface)?;
        let (xc, yc) = (width as f64 / 2.0, height as f64 / 2.0);
        cr.translate(xc, yc);
        cr.scale(xc, yc);
        paint(&cr)?;
    }
    surface.flush();
    Ok(surface)
}

fn paint_wheel(cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.center);
    cr.arc(0.0, 0.0, R0, 0.0, 2.0 * PI);
    cr.fill()?;

    for segment in Segment::all() {
        set_source(cr, colors.shade(segment.index()));
        for field in Field::ALL {
            field.trace(cr, segment);
            cr.fill()?;
        }
    }
    Ok(())
}

fn paint_grid(cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.grid);
    cr.set_line_width(GRID_WIDTH);

    for radius in [R0, R1, R2, 1.0] {
        cr.new_sub_path();
        cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
    }
    cr.stroke()?;

    // spokes on the sector boundaries
    for segment in Segment::all() {
        let angle = FIELD_START + segment.index() as f64 * SEGMENT_ANGLE;
        let (sin, cos) = angle.sin_cos();
        cr.move_to(R0 * cos, R0 * sin);
        cr.line_to(cos, sin);
    }
    cr.stroke()
}

fn paint_shadow(cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
    let gradient = LinearGradient::new(0.0, -1.0, 0.0, 1.0);
    for (offset, color) in [(0.0, colors.shadow_top), (1.0, colors.shadow_bottom)] {
        let (r, g, b, a) = color.into_components();
        gradient.add_color_stop_rgba(offset, r, g, b, a);
    }
    cr.set_source(&gradient)?;
    cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    cr.fill()
}
