use crate::theory::PitchClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Rotation pushed by a synced control.
    SetTop(PitchClass),
    ConfigReload,
}
