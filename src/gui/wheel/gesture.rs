use super::classify::Hit;
use super::geometry::{Region, Segment, root_note};
use crate::owner::Owner;
use crate::theory::{PitchClass, relative_minor};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Up,
    Major,
    Minor,
    Shift,
}

impl Phase {
    /// Highlighted field while the gesture is in this phase.
    pub fn region(self) -> Option<Region> {
        match self {
            Self::Up => None,
            Self::Major => Some(Region::Major),
            Self::Minor => Some(Region::Minor),
            Self::Shift => Some(Region::Rim),
        }
    }

    pub fn holds_chord(self) -> bool {
        matches!(self, Self::Major | Self::Minor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    PlayChord { is_major: bool, root: PitchClass },
    EndChord,
    SetTop(PitchClass),
}

impl Notification {
    pub fn deliver(self, owner: &mut dyn Owner) {
        match self {
            Self::PlayChord { is_major, root } => owner.play_chord(is_major, root),
            Self::EndChord => owner.end_chord(),
            Self::SetTop(top) => owner.set_top(top),
        }
    }
}

/// Rotation and selection state between two touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gesture {
    pub phase: Phase,
    pub selected: Option<Segment>,
    pub top: PitchClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Gesture,
    pub notification: Option<Notification>,
    pub should_redraw: bool,
}

impl Transition {
    fn ignore(state: Gesture) -> Self {
        Self {
            next: state,
            notification: None,
            should_redraw: false,
        }
    }

    fn to(next: Gesture, notification: Option<Notification>) -> Self {
        Self {
            next,
            notification,
            should_redraw: true,
        }
    }
}

impl Gesture {
    pub fn new(top: PitchClass) -> Self {
        Self {
            top,
            ..Self::default()
        }
    }

    pub fn with_top(self, top: PitchClass) -> Self {
        Self { top, ..self }
    }

    /// Consumes one touch event. `hit` is `None` when the point could not be classified.
    pub fn step(self, touch: Touch, hit: Option<Hit>) -> Transition {
        match touch {
            Touch::Down => self.press(hit),
            Touch::Move => self.drag(hit),
            Touch::Up | Touch::Cancel => self.release(),
        }
    }

    fn press(self, hit: Option<Hit>) -> Transition {
        let Some(hit) = hit else {
            return Transition::ignore(self);
        };
        let root = root_note(self.top, hit.segment);
        let (phase, notification) = match hit.region {
            Region::Center | Region::Outside => return Transition::ignore(self),
            Region::Rim => (Phase::Shift, Notification::SetTop(self.top)),
            Region::Major => (Phase::Major, Notification::PlayChord { is_major: true, root }),
            Region::Minor => (
                Phase::Minor,
                Notification::PlayChord {
                    is_major: false,
                    root: relative_minor(root),
                },
            ),
        };
        let next = Self {
            phase,
            selected: Some(hit.segment),
            ..self
        };
        Transition::to(next, Some(notification))
    }

    fn drag(self, hit: Option<Hit>) -> Transition {
        let (Phase::Shift, Some(selected), Some(hit)) = (self.phase, self.selected, hit) else {
            return Transition::ignore(self);
        };
        if hit.region == Region::Center {
            return Transition::ignore(self);
        }

        let step = selected.steps_to(hit.segment);
        let mut next = Self {
            selected: Some(hit.segment),
            ..self
        };
        if step == 0 {
            return Transition::ignore(next);
        }
        next.top = next.top.transpose(step as i64);
        Transition::to(next, Some(Notification::SetTop(next.top)))
    }

    fn release(self) -> Transition {
        let notification = self.phase.holds_chord().then_some(Notification::EndChord);
        let next = Self {
            phase: Phase::Up,
            selected: None,
            top: self.top,
        };
        Transition::to(next, notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(region: Region, segment: i64) -> Option<Hit> {
        Some(Hit {
            region,
            segment: Segment::new(segment),
        })
    }

    fn pc(n: i64) -> PitchClass {
        PitchClass::new(n)
    }

    #[test]
    fn test_major_press_plays_root() {
        let t = Gesture::default().step(Touch::Down, hit(Region::Major, 0));
        assert_eq!(t.next.phase, Phase::Major);
        assert_eq!(t.next.selected, Some(Segment::new(0)));
        assert_eq!(
            t.notification,
            Some(Notification::PlayChord {
                is_major: true,
                root: pc(0)
            })
        );
        assert!(t.should_redraw);
    }

    #[test]
    fn test_minor_press_plays_relative_minor() {
        let t = Gesture::default().step(Touch::Down, hit(Region::Minor, 0));
        assert_eq!(t.next.phase, Phase::Minor);
        assert_eq!(
            t.notification,
            Some(Notification::PlayChord {
                is_major: false,
                root: pc(9)
            })
        );
    }

    #[test]
    fn test_press_uses_rotation() {
        let t = Gesture::new(pc(2)).step(Touch::Down, hit(Region::Major, 1));
        // (2 + 1) fifths above C
        assert_eq!(
            t.notification,
            Some(Notification::PlayChord {
                is_major: true,
                root: pc(9)
            })
        );
    }

    #[test]
    fn test_rim_press_announces_top() {
        let t = Gesture::new(pc(4)).step(Touch::Down, hit(Region::Rim, 5));
        assert_eq!(t.next.phase, Phase::Shift);
        assert_eq!(t.next.top, pc(4));
        assert_eq!(t.notification, Some(Notification::SetTop(pc(4))));
    }

    #[test]
    fn test_ignored_presses() {
        for h in [hit(Region::Center, 0), hit(Region::Outside, 3), None] {
            let t = Gesture::default().step(Touch::Down, h);
            assert_eq!(t.next, Gesture::default());
            assert_eq!(t.notification, None);
            assert!(!t.should_redraw);
        }
    }

    #[test]
    fn test_shift_drag_advances_top() {
        let state = Gesture::default()
            .step(Touch::Down, hit(Region::Rim, 3))
            .next;
        let t = state.step(Touch::Move, hit(Region::Rim, 0));
        assert_eq!(t.next.top, pc(3));
        assert_eq!(t.next.selected, Some(Segment::new(0)));
        assert_eq!(t.notification, Some(Notification::SetTop(pc(3))));

        let t = t.next.step(Touch::Move, hit(Region::Major, 3));
        assert_eq!(t.next.top, pc(0));
        assert_eq!(t.notification, Some(Notification::SetTop(pc(0))));
    }

    #[test]
    fn test_shift_drag_within_segment_is_silent() {
        let state = Gesture::default()
            .step(Touch::Down, hit(Region::Rim, 2))
            .next;
        let t = state.step(Touch::Move, hit(Region::Rim, 2));
        assert_eq!(t.next, state);
        assert_eq!(t.notification, None);
        assert!(!t.should_redraw);
    }

    #[test]
    fn test_shift_drag_into_center_is_ignored() {
        let state = Gesture::default()
            .step(Touch::Down, hit(Region::Rim, 2))
            .next;
        let t = state.step(Touch::Move, hit(Region::Center, 7));
        assert_eq!(t.next, state);
        assert_eq!(t.notification, None);
    }

    #[test]
    fn test_shift_drag_outside_disc_still_tracks() {
        let state = Gesture::default()
            .step(Touch::Down, hit(Region::Rim, 1))
            .next;
        let t = state.step(Touch::Move, hit(Region::Outside, 0));
        assert_eq!(t.next.top, pc(1));
    }

    #[test]
    fn test_chord_is_fixed_while_held() {
        let state = Gesture::default()
            .step(Touch::Down, hit(Region::Major, 4))
            .next;
        let t = state.step(Touch::Move, hit(Region::Rim, 9));
        assert_eq!(t.next, state);
        assert_eq!(t.notification, None);
    }

    #[test]
    fn test_release_ends_chord_once() {
        for region in [Region::Major, Region::Minor] {
            let state = Gesture::default().step(Touch::Down, hit(region, 1)).next;
            let t = state.step(Touch::Up, None);
            assert_eq!(t.notification, Some(Notification::EndChord));
            assert_eq!(t.next.phase, Phase::Up);
            assert_eq!(t.next.selected, None);

            let again = t.next.step(Touch::Up, None);
            assert_eq!(again.notification, None);
        }
    }

    #[test]
    fn test_release_after_shift_or_ignored() {
        let shifted = Gesture::default()
            .step(Touch::Down, hit(Region::Rim, 1))
            .next;
        assert_eq!(shifted.step(Touch::Cancel, None).notification, None);

        let ignored = Gesture::default()
            .step(Touch::Down, hit(Region::Center, 1))
            .next;
        let t = ignored.step(Touch::Up, None);
        assert_eq!(t.notification, None);
        assert_eq!(t.next.phase, Phase::Up);
    }

    #[test]
    fn test_log_names() {
        assert_eq!(Phase::Shift.to_string(), "shift");
        assert_eq!(Region::Major.to_string(), "major");
        assert_eq!(format!("{} {}", Region::Rim, Segment::new(4)), "rim 4");
    }
}
