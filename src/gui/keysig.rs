use crate::theory::{PITCH_CLASS_COUNT, PitchClass};
use gdk_pixbuf::{Colorspace, Pixbuf};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PLACEHOLDER_WIDTH: i32 = 138;
const PLACEHOLDER_HEIGHT: i32 = 100;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load key signature {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: glib::Error,
    },
    #[error("Expected 12 key signatures, got {0}")]
    Count(usize),
    #[error("Failed to allocate key signature placeholder")]
    Allocation,
}

/// Key-signature glyphs indexed by pitch class.
#[derive(Clone)]
pub struct KeySignatures {
    glyphs: Vec<Pixbuf>,
}

impl KeySignatures {
    pub fn new(glyphs: Vec<Pixbuf>) -> Result<Self, AssetError> {
        if glyphs.len() != PITCH_CLASS_COUNT as usize {
            return Err(AssetError::Count(glyphs.len()));
        }
        Ok(Self { glyphs })
    }

    pub fn file_name(pitch: PitchClass) -> String {
        format!("ks{:02}.png", pitch.index())
    }

    /// Loads `ks00.png` through `ks11.png` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let glyphs = PitchClass::all()
            .map(|pitch| {
                let path = dir.join(Self::file_name(pitch));
                Pixbuf::from_file(&path).map_err(|source| AssetError::Load { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(glyphs)
    }

    /// Fully transparent glyphs, for running without artwork.
    pub fn placeholder() -> Result<Self, AssetError> {
        let blank = Pixbuf::new(
            Colorspace::Rgb,
            true,
            8,
            PLACEHOLDER_WIDTH,
            PLACEHOLDER_HEIGHT,
        )
        .ok_or(AssetError::Allocation)?;
        blank.fill(0);
        Self::new(vec![blank; PITCH_CLASS_COUNT as usize])
    }

    pub fn load_or_placeholder(dir: Option<&Path>) -> Result<Self, AssetError> {
        match dir.map(Self::load_dir) {
            Some(Ok(glyphs)) => Ok(glyphs),
            Some(Err(e)) => {
                log::warn!("{}; drawing without key signatures", e);
                Self::placeholder()
            }
            None => Self::placeholder(),
        }
    }

    pub fn glyph(&self, pitch: PitchClass) -> &Pixbuf {
        &self.glyphs[pitch.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: i32, height: i32, rgba: u32) -> Pixbuf {
        let pixbuf = Pixbuf::new(Colorspace::Rgb, true, 8, width, height).unwrap();
        pixbuf.fill(rgba);
        pixbuf
    }

    #[test]
    fn test_file_names() {
        assert_eq!(KeySignatures::file_name(PitchClass::new(0)), "ks00.png");
        assert_eq!(KeySignatures::file_name(PitchClass::new(11)), "ks11.png");
    }

    #[test]
    fn test_count_is_checked() {
        let result = KeySignatures::new(vec![solid(2, 2, 0); 11]);
        assert!(matches!(result, Err(AssetError::Count(11))));
    }

    #[test]
    fn test_placeholder_has_every_pitch_class() {
        let glyphs = KeySignatures::placeholder().unwrap();
        for pitch in PitchClass::all() {
            assert_eq!(glyphs.glyph(pitch).width(), PLACEHOLDER_WIDTH);
        }
    }

    #[test]
    fn test_missing_dir_falls_back() {
        let dir = std::env::temp_dir().join("fifths-no-such-assets");
        assert!(matches!(
            KeySignatures::load_dir(&dir),
            Err(AssetError::Load { .. })
        ));
        assert!(KeySignatures::load_or_placeholder(Some(&dir)).is_ok());
    }

    #[test]
    fn test_load_dir_indexes_by_pitch_class() {
        let dir = std::env::temp_dir().join(format!("fifths-assets-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        for pitch in PitchClass::all() {
            let width = 4 + pitch.index() as i32;
            solid(width, 4, 0xff0000ff)
                .savev(dir.join(KeySignatures::file_name(pitch)), "png", &[])
                .unwrap();
        }

        let glyphs = KeySignatures::load_dir(&dir).unwrap();
        assert_eq!(glyphs.glyph(PitchClass::new(0)).width(), 4);
        assert_eq!(glyphs.glyph(PitchClass::new(7)).width(), 11);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
