use derive_more::{Display, Into};
use strum::Display as StrumDisplay;

pub const PITCH_CLASS_COUNT: u8 = 12;

/// Semitones in a perfect fifth; one step around the circle.
pub const FIFTH: i64 = 7;

/// Semitones from a major tonic up to its relative minor.
pub const RELATIVE_MINOR_OFFSET: i64 = 9;

pub const NOTES_SHARP: [&str; 12] = [
    "C", "C\u{266f}", "D", "D\u{266f}", "E", "F", "F\u{266f}", "G", "G\u{266f}", "A", "A\u{266f}",
    "B",
];

pub const NOTES_FLAT: [&str; 12] = [
    "C", "D\u{266d}", "D", "E\u{266d}", "E", "F", "G\u{266d}", "G", "A\u{266d}", "A", "B\u{266d}",
    "B",
];

/// Signed accidental count of the major key rooted at each pitch class.
pub const SHIFTS: [i32; 12] = [0, -5, 2, -3, 4, -1, 6, 1, -4, 3, -2, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Display, Into)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(value: i64) -> Self {
        Self(value.rem_euclid(PITCH_CLASS_COUNT as i64) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn transpose(self, semitones: i64) -> Self {
        Self::new(self.0 as i64 + semitones)
    }

    /// Accidentals of the major key rooted here.
    pub fn shift(self) -> i32 {
        SHIFTS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..PITCH_CLASS_COUNT).map(Self)
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        (value < PITCH_CLASS_COUNT).then_some(Self(value)).ok_or(value)
    }
}

pub fn relative_minor(root: PitchClass) -> PitchClass {
    root.transpose(RELATIVE_MINOR_OFFSET)
}

/// Pitch class whose key signature is shown when `top` is rotated to the reference angle.
pub fn key_at(top: PitchClass) -> PitchClass {
    PitchClass::new(top.0 as i64 * FIFTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    pub fn for_shift(shift: i32) -> Self {
        if shift >= 0 { Self::Sharp } else { Self::Flat }
    }

    pub fn name(self, pitch: PitchClass) -> &'static str {
        match self {
            Self::Sharp => NOTES_SHARP[pitch.index()],
            Self::Flat => NOTES_FLAT[pitch.index()],
        }
    }
}

/// Accidental count used to spell the labels `sector` fifths clockwise from `key`.
///
/// Sectors past the bottom of the wheel wrap to the flat side, so the result lies in
/// `shift(key) + (-6, 6]`.
pub fn sector_shift(key: PitchClass, sector: usize) -> i32 {
    let offset = (sector % PITCH_CLASS_COUNT as usize) as i32;
    let offset = if offset > 6 { offset - 12 } else { offset };
    key.shift() + offset
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorLabels {
    pub major: &'static str,
    pub minor: String,
}

pub fn sector_labels(key: PitchClass, sector: usize) -> SectorLabels {
    let spelling = Spelling::for_shift(sector_shift(key, sector));
    let major = key.transpose(FIFTH * sector as i64);
    SectorLabels {
        major: spelling.name(major),
        minor: spelling.name(relative_minor(major)).to_lowercase(),
    }
}
