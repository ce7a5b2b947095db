use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

pub struct WheelColors {
    pub shades: [Srgba<f64>; 4],
    pub center: Srgba<f64>,
    pub grid: Srgba<f64>,
    pub shadow_top: Srgba<f64>,
    pub shadow_bottom: Srgba<f64>,
    pub highlight: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl Default for WheelColors {
    fn default() -> Self {
        Self {
            shades: [0, 1, 2, 3].map(|i| gray(0x98 + 0x10 * i)),
            center: gray(0x78),
            grid: gray(0x44),
            shadow_top: Srgba::new(1.0, 1.0, 1.0, 0.0),
            shadow_bottom: Srgba::new(0.0, 0.0, 0.0, 0x77 as f64 / 255.0),
            highlight: Srgba::new(1.0, 0.0, 0.0, 1.0),
            label: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl WheelColors {
    pub fn shade(&self, sector: usize) -> Srgba<f64> {
        self.shades[sector % self.shades.len()]
    }
}

pub fn gray(level: u8) -> Srgba<f64> {
    let c = level as f64 / 255.0;
    Srgba::new(c, c, c, 1.0)
}

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.fifths-window {
    background-color: #303030;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shades_repeat_every_four_sectors() {
        let colors = WheelColors::default();
        assert_eq!(colors.shade(0), colors.shade(4));
        assert_eq!(colors.shade(3), colors.shade(11));
        assert_ne!(colors.shade(0), colors.shade(1));
        assert_eq!(colors.shade(1), gray(0xa8));
    }
}
