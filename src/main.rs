use anyhow::{Context, anyhow};
use clap::Parser;
use fifths::config;
use fifths::gui::app::AppModel;
use fifths::gui::keysig::KeySignatures;
use fifths::gui::wheel::{CircleWidget, DEFAULT_SIZE};
use fifths::owner::BridgeOwner;
use fifths::sys::runtime;
use fifths::theory::PitchClass;
use relm4::prelude::*;
use std::path::PathBuf;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Render a single frame to this PNG file and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Wheel size in pixels (overrides the config)
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..))]
    size: Option<i32>,

    /// Pitch class rotated to the top, 0..11
    #[arg(short, long, default_value_t = 0)]
    top: u8,

    /// Directory with the ks00.png .. ks11.png key signatures (overrides the config)
    #[arg(short, long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = config::load_or_default();
    let size = match args.size.unwrap_or(config.wheel.size) {
        size if size > 0 => size,
        size => {
            log::warn!("Ignoring wheel size {}, using {}", size, DEFAULT_SIZE);
            DEFAULT_SIZE
        }
    };
    let top = PitchClass::try_from(args.top)
        .map_err(|n| anyhow!("Top must be a pitch class in 0..11, got {}", n))?;

    let assets = args.assets.as_deref().or(config.assets.key_signatures.as_deref());
    let key_signatures = KeySignatures::load_or_placeholder(assets)?;

    let mut widget = CircleWidget::new(key_signatures);
    widget.set_style(config.wheel.highlight.0, &config.wheel.label_font);
    widget.set_top_segment(top);

    if let Some(path) = args.snapshot {
        let surface = widget.render(size, size)?;
        let mut file = fs_err::File::create(&path)?;
        surface
            .write_to_png(&mut file)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    match config::write_default_config() {
        Ok(path) => log::debug!("Config file at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }

    let (tx, rx) = async_channel::bounded(32);
    let (outgoing, _) = broadcast::channel(64);
    widget.set_owner(Box::new(BridgeOwner::new(outgoing.clone())));

    // Start Background Services
    runtime::start_background_services(tx, outgoing, config.sync.socket.clone());

    let app = RelmApp::new("org.fifths.wheel").with_args(Vec::new());

    app.run::<AppModel>((widget, size, rx));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_must_be_positive() {
        let args = Args::try_parse_from(["fifths", "--size", "240"]).unwrap();
        assert_eq!(args.size, Some(240));
        for bad in ["0", "-5"] {
            let arg = format!("--size={bad}");
            assert!(Args::try_parse_from(["fifths", arg.as_str()]).is_err(), "{bad}");
        }
    }
}
