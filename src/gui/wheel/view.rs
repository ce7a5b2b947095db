use super::cache::Layers;
use super::geometry::Field;
use super::gesture::Gesture;
use super::{
    KEY_SIGNATURE_ASPECT, KEY_SIGNATURE_HALF_HEIGHT, LABEL_SIZE, R0, R1, R2, SEGMENT_ANGLE,
    SEGMENT_COUNT,
};
use crate::gui::keysig::KeySignatures;
use crate::gui::theme::{WheelColors, set_source};
use crate::theory::{key_at, sector_labels};
use cairo::{Context, ImageSurface};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;

/// Everything one frame needs.
pub struct Scene<'a> {
    pub gesture: &'a Gesture,
    pub layers: &'a Layers,
    pub key_signatures: &'a KeySignatures,
    pub colors: &'a WheelColors,
    pub label_font: &'a str,
    pub width: i32,
    pub height: i32,
}

/// Paints the wheel in its fixed layer order: rotated wheel, key signature, highlight,
/// labels, grid and shadow.
pub fn draw(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let (xc, yc) = (scene.width as f64 / 2.0, scene.height as f64 / 2.0);
    let top = scene.gesture.top;

    cr.save()?;
    cr.translate(xc, yc);
    cr.scale(xc, yc);

    cr.save()?;
    cr.rotate(-(top.index() as f64) * SEGMENT_ANGLE);
    paint_layer(cr, &scene.layers.wheel)?;
    cr.restore()?;

    draw_key_signature(cr, scene.key_signatures.glyph(key_at(top)))?;
    draw_highlight(cr, scene)?;
    draw_labels(cr, scene)?;

    paint_layer(cr, &scene.layers.grid)?;
    paint_layer(cr, &scene.layers.shadow)?;

    cr.restore()
}

/// Stretches a cached layer over the unit square.
fn paint_layer(cr: &Context, layer: &ImageSurface) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(-1.0, -1.0);
    cr.scale(2.0 / layer.width() as f64, 2.0 / layer.height() as f64);
    cr.set_source_surface(layer, 0.0, 0.0)?;
    cr.paint()?;
    cr.restore()
}

fn draw_key_signature(cr: &Context, glyph: &Pixbuf) -> Result<(), cairo::Error> {
    let dy = KEY_SIGNATURE_HALF_HEIGHT;
    let dx = dy * KEY_SIGNATURE_ASPECT;

    cr.save()?;
    cr.translate(-dx, -dy);
    cr.scale(
        2.0 * dx / glyph.width() as f64,
        2.0 * dy / glyph.height() as f64,
    );
    cr.set_source_pixbuf(glyph, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_highlight(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let gesture = scene.gesture;
    let field = gesture.phase.region().and_then(Field::for_region);
    let (Some(field), Some(segment)) = (field, gesture.selected) else {
        return Ok(());
    };
    set_source(cr, scene.colors.highlight);
    field.trace(cr, segment);
    cr.fill()
}

fn draw_labels(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let key = key_at(scene.gesture.top);

    cr.select_font_face(
        scene.label_font,
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    cr.set_font_size(LABEL_SIZE);
    set_source(cr, scene.colors.label);

    for sector in 0..SEGMENT_COUNT {
        let labels = sector_labels(key, sector);
        cr.save()?;
        cr.rotate(sector as f64 * SEGMENT_ANGLE);
        draw_label(cr, labels.major, (R1 + R2) / 2.0)?;
        draw_label(cr, &labels.minor, (R0 + R1) / 2.0)?;
        cr.restore()?;
    }
    Ok(())
}

/// Draws `label` centered above the origin at `radius`.
///
/// Letter and accidental are laid out as two separately centered strings, since shaping
/// them together spaces the accidental badly.
fn draw_label(cr: &Context, label: &str, radius: f64) -> Result<(), cairo::Error> {
    let baseline = LABEL_SIZE / 3.0 - radius;
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(accidental)) => {
            show_centered(cr, &format!("{} ", letter), baseline)?;
            show_centered(cr, &format!(" {}", accidental), baseline)
        }
        _ => show_centered(cr, label, baseline),
    }
}

fn show_centered(cr: &Context, text: &str, baseline: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(-ext.x_advance() / 2.0, baseline);
    cr.show_text(text)
}
