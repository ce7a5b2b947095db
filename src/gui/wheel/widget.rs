use super::cache::LayerCache;
use super::classify::Frame;
use super::geometry::Point;
use super::gesture::{Gesture, Touch};
use super::view::{self, Scene};
use super::WheelError;
use crate::gui::keysig::KeySignatures;
use crate::gui::theme::WheelColors;
use crate::owner::Owner;
use crate::theory::PitchClass;
use cairo::{Context, Format, ImageSurface};
use palette::Srgba;

pub const DEFAULT_LABEL_FONT: &str = "Monospace";

/// The circle-of-fifths widget as seen by its host.
///
/// Every method returning `bool` reports whether the host should queue a redraw.
pub struct CircleWidget {
    owner: Option<Box<dyn Owner>>,
    gesture: Gesture,
    frame: Option<Frame>,
    size: (i32, i32),
    cache: LayerCache,
    key_signatures: KeySignatures,
    colors: WheelColors,
    label_font: String,
}

impl CircleWidget {
    pub fn new(key_signatures: KeySignatures) -> Self {
        Self {
            owner: None,
            gesture: Gesture::default(),
            frame: None,
            size: (0, 0),
            cache: LayerCache::new(),
            key_signatures,
            colors: WheelColors::default(),
            label_font: DEFAULT_LABEL_FONT.to_string(),
        }
    }

    pub fn set_owner(&mut self, owner: Box<dyn Owner>) {
        self.owner = Some(owner);
    }

    /// Rotates the wheel on behalf of someone other than the user. The owner is not told,
    /// so a synced control never hears its own change echoed back.
    pub fn set_top_segment(&mut self, top: PitchClass) -> bool {
        self.gesture = self.gesture.with_top(top);
        true
    }

    /// Per-frame style. The cached layers keep their colors.
    pub fn set_style(&mut self, highlight: Srgba<f64>, label_font: &str) -> bool {
        self.colors.highlight = highlight;
        self.label_font = label_font.to_string();
        true
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn cache(&self) -> &LayerCache {
        &self.cache
    }

    /// Regenerates the cached layers when the pixel size actually changed.
    pub fn on_size_changed(&mut self, width: i32, height: i32) -> Result<bool, WheelError> {
        self.size = (width, height);
        self.frame = Frame::from_size(width, height);
        if self.frame.is_none() {
            self.cache.invalidate();
            return Ok(false);
        }
        Ok(self.cache.ensure(width, height, &self.colors)?)
    }

    pub fn on_draw(&self, cr: &Context) -> Result<(), WheelError> {
        let layers = self.cache.layers().ok_or(WheelError::NotSized)?;
        let scene = Scene {
            gesture: &self.gesture,
            layers,
            key_signatures: &self.key_signatures,
            colors: &self.colors,
            label_font: &self.label_font,
            width: self.size.0,
            height: self.size.1,
        };
        Ok(view::draw(cr, &scene)?)
    }

    /// Draws one frame onto a fresh image surface of the given size.
    pub fn render(&mut self, width: i32, height: i32) -> Result<ImageSurface, WheelError> {
        self.on_size_changed(width, height)?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        {
            let cr = Context::new(&surface)?;
            self.on_draw(&cr)?;
        }
        surface.flush();
        Ok(surface)
    }

    pub fn on_touch_event(&mut self, touch: Touch, x: f64, y: f64) -> bool {
        let hit = self
            .frame
            .and_then(|frame| frame.classify(Point::new(x, y)));
        let transition = self.gesture.step(touch, hit);
        let from = self.gesture.phase;
        self.gesture = transition.next;

        if let Some(notification) = transition.notification {
            match hit {
                Some(hit) => log::debug!(
                    "{:?} on {} {}: {} -> {}, {:?}",
                    touch, hit.region, hit.segment, from, self.gesture.phase, notification
                ),
                None => log::debug!(
                    "{:?}: {} -> {}, {:?}",
                    touch, from, self.gesture.phase, notification
                ),
            }
            if let Some(owner) = self.owner.as_deref_mut() {
                notification.deliver(owner);
            }
        }
        transition.should_redraw
    }
}
