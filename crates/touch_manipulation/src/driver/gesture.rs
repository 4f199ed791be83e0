//! Gesture state machine
//!
//! Arbitrates between no gesture, a one-finger pan and a two-finger
//! manipulation. Transitions come from edge-triggered touch notifications
//! plus the release of every contact; see [`GestureMode::transition`] for
//! the full table.

use crate::foundation::math::Pose;
use crate::input::GestureEvent;

/// Discrete manipulation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureMode {
    /// No gesture; residual motion only decays
    #[default]
    None,
    /// One-finger pan
    Single,
    /// Two-finger pan, twist and dolly
    Multi,
}

/// What drives a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTrigger {
    /// Active count became exactly one
    OneContactStarted,
    /// Active count became exactly two
    TwoContactStarted,
    /// Active count reached zero
    AllContactsReleased,
}

impl From<GestureEvent> for GestureTrigger {
    fn from(event: GestureEvent) -> Self {
        match event {
            GestureEvent::OneContactStarted => Self::OneContactStarted,
            GestureEvent::TwoContactStarted => Self::TwoContactStarted,
        }
    }
}

/// Outcome of feeding a trigger to the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Start a fresh gesture in this mode; the caller captures a new session
    Begin(GestureMode),
    /// Drop back to [`GestureMode::None`]
    Release,
    /// Nothing changes
    Ignore,
}

impl GestureMode {
    /// Transition table
    ///
    /// | from            | trigger               | result          |
    /// |-----------------|-----------------------|-----------------|
    /// | `None`          | `OneContactStarted`   | `Begin(Single)` |
    /// | `Single`/`Multi`| `OneContactStarted`   | `Ignore`        |
    /// | any             | `TwoContactStarted`   | `Begin(Multi)`  |
    /// | `None`          | `AllContactsReleased` | `Ignore`        |
    /// | `Single`/`Multi`| `AllContactsReleased` | `Release`       |
    ///
    /// A one-finger gesture only starts from rest, so lifting one finger of
    /// a pinch does not restart as a pan. Two-finger gestures always restart.
    pub const fn transition(self, trigger: GestureTrigger) -> Transition {
        match (self, trigger) {
            (Self::None, GestureTrigger::OneContactStarted) => Transition::Begin(Self::Single),
            (_, GestureTrigger::OneContactStarted) => Transition::Ignore,
            (_, GestureTrigger::TwoContactStarted) => Transition::Begin(Self::Multi),
            (Self::None, GestureTrigger::AllContactsReleased) => Transition::Ignore,
            (_, GestureTrigger::AllContactsReleased) => Transition::Release,
        }
    }

    /// Number of contacts a frame must have to produce deltas in this mode
    pub const fn driving_contact_count(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Single => Some(1),
            Self::Multi => Some(2),
        }
    }
}

/// Reference snapshot captured when a gesture begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Mode the session was captured for
    pub mode: GestureMode,
    /// Contact centroid at gesture start
    pub start_centroid: Pose,
    /// Driven object's pose at gesture start
    pub object_start_pose: Pose,
}

impl GestureSession {
    /// Session that references the object at rest
    pub fn at_rest(object_pose: Pose) -> Self {
        Self {
            mode: GestureMode::None,
            start_centroid: Pose::identity(),
            object_start_pose: object_pose,
        }
    }
}

/// Owns the current mode and the session it was entered with
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    mode: GestureMode,
    session: GestureSession,
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(Pose::identity())
    }
}

impl GestureStateMachine {
    /// Machine at rest referencing the given object pose
    pub fn new(object_pose: Pose) -> Self {
        Self {
            mode: GestureMode::None,
            session: GestureSession::at_rest(object_pose),
        }
    }

    /// Current mode
    pub const fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Session of the current (or most recent) gesture
    pub const fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Look up what a trigger would do without applying it
    pub const fn transition(&self, trigger: GestureTrigger) -> Transition {
        self.mode.transition(trigger)
    }

    /// Enter the session's mode, replacing the previous session
    pub fn begin(&mut self, session: GestureSession) {
        log::debug!("Gesture {:?} -> {:?}", self.mode, session.mode);
        self.mode = session.mode;
        self.session = session;
    }

    /// Return to rest, keeping the last session as reference
    pub fn release(&mut self) {
        if self.mode != GestureMode::None {
            log::debug!("Gesture {:?} released", self.mode);
        }
        self.mode = GestureMode::None;
    }

    /// Return to rest and re-reference the object pose
    pub fn reset(&mut self, object_pose: Pose) {
        self.mode = GestureMode::None;
        self.session = GestureSession::at_rest(object_pose);
    }

    /// Whether a frame with this many contacts produces new deltas
    pub fn drives_frame(&self, contact_count: usize) -> bool {
        self.mode.driving_contact_count() == Some(contact_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_single_only_starts_from_rest() {
        assert_eq!(
            GestureMode::None.transition(GestureTrigger::OneContactStarted),
            Transition::Begin(GestureMode::Single)
        );
        assert_eq!(
            GestureMode::Single.transition(GestureTrigger::OneContactStarted),
            Transition::Ignore
        );
        assert_eq!(
            GestureMode::Multi.transition(GestureTrigger::OneContactStarted),
            Transition::Ignore
        );
    }

    #[test]
    fn test_multi_always_restarts() {
        for mode in [GestureMode::None, GestureMode::Single, GestureMode::Multi] {
            assert_eq!(
                mode.transition(GestureTrigger::TwoContactStarted),
                Transition::Begin(GestureMode::Multi)
            );
        }
    }

    #[test]
    fn test_release() {
        assert_eq!(
            GestureMode::None.transition(GestureTrigger::AllContactsReleased),
            Transition::Ignore
        );
        assert_eq!(
            GestureMode::Single.transition(GestureTrigger::AllContactsReleased),
            Transition::Release
        );
        assert_eq!(
            GestureMode::Multi.transition(GestureTrigger::AllContactsReleased),
            Transition::Release
        );
    }

    #[test]
    fn test_drives_only_matching_frames() {
        let mut machine = GestureStateMachine::default();
        assert!(!machine.drives_frame(0));
        assert!(!machine.drives_frame(1));

        machine.begin(GestureSession {
            mode: GestureMode::Multi,
            start_centroid: Pose::identity(),
            object_start_pose: Pose::identity(),
        });
        assert!(machine.drives_frame(2));
        assert!(!machine.drives_frame(1));
        assert!(!machine.drives_frame(3));
    }

    #[test]
    fn test_release_keeps_last_session() {
        let start = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        let mut machine = GestureStateMachine::default();
        machine.begin(GestureSession {
            mode: GestureMode::Single,
            start_centroid: Pose::identity(),
            object_start_pose: start,
        });

        machine.release();
        assert_eq!(machine.mode(), GestureMode::None);
        assert_eq!(machine.session().object_start_pose, start);
    }

    #[test]
    fn test_event_conversion() {
        assert_eq!(
            GestureTrigger::from(GestureEvent::OneContactStarted),
            GestureTrigger::OneContactStarted
        );
        assert_eq!(
            GestureTrigger::from(GestureEvent::TwoContactStarted),
            GestureTrigger::TwoContactStarted
        );
    }
}
