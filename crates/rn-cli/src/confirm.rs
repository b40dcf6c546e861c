//! Two-step confirmation before a plan is applied.
//!
//! The first request arms the state; a second request within the timeout
//! confirms. An armed state that outlives the timeout expires back to idle
//! and must be armed again. Confirming always returns the state to idle.

use std::time::{Duration, Instant};

/// Message shown when a plan has nothing to rename.
pub const NOTHING_TO_APPLY: &str = "No changes to apply";

/// Confirmation state owned by the front-end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmState {
    /// Waiting for a first request.
    #[default]
    Idle,
    /// First request received at `since`.
    Armed {
        /// When the state was armed.
        since: Instant,
    },
}

/// What a request did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStep {
    /// The state is now armed; ask again to confirm.
    Armed,
    /// Both steps completed; execute now.
    Confirmed,
    /// The armed state timed out before the second request.
    Expired,
    /// Nothing was armed, so there was nothing to confirm.
    NotArmed,
    /// The plan has no changes; arming was refused.
    NothingToApply,
}

impl ConfirmState {
    /// Arms the state for a plan with `changed` pending renames.
    pub fn arm(&mut self, changed: usize, now: Instant) -> ConfirmStep {
        if changed == 0 {
            *self = Self::Idle;
            return ConfirmStep::NothingToApply;
        }
        *self = Self::Armed { since: now };
        ConfirmStep::Armed
    }

    /// Confirms an armed state that is still within `timeout`.
    ///
    /// Always leaves the state idle.
    pub fn confirm(&mut self, now: Instant, timeout: Duration) -> ConfirmStep {
        let step = match *self {
            Self::Idle => ConfirmStep::NotArmed,
            Self::Armed { since } if now.saturating_duration_since(since) > timeout => {
                ConfirmStep::Expired
            }
            Self::Armed { .. } => ConfirmStep::Confirmed,
        };
        *self = Self::Idle;
        step
    }

    /// Handles one press of a two-click control: arms when idle (or
    /// expired), confirms when armed.
    pub fn press(&mut self, changed: usize, now: Instant, timeout: Duration) -> ConfirmStep {
        self.expire(now, timeout);
        match *self {
            Self::Idle => self.arm(changed, now),
            Self::Armed { .. } => self.confirm(now, timeout),
        }
    }

    /// Drops an armed state that has outlived `timeout`.
    pub fn expire(&mut self, now: Instant, timeout: Duration) {
        if let Self::Armed { since } = *self {
            if now.saturating_duration_since(since) > timeout {
                *self = Self::Idle;
            }
        }
    }

    /// Returns to idle without executing.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_arm_then_confirm() {
        let start = Instant::now();
        let mut state = ConfirmState::default();

        assert_eq!(state.arm(3, start), ConfirmStep::Armed);
        assert_eq!(state, ConfirmState::Armed { since: start });
        assert_eq!(
            state.confirm(start + Duration::from_secs(5), TIMEOUT),
            ConfirmStep::Confirmed
        );
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn test_arm_refused_without_changes() {
        let mut state = ConfirmState::default();
        assert_eq!(state.arm(0, Instant::now()), ConfirmStep::NothingToApply);
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn test_confirm_requires_arming() {
        let mut state = ConfirmState::default();
        assert_eq!(state.confirm(Instant::now(), TIMEOUT), ConfirmStep::NotArmed);
    }

    #[test]
    fn test_confirm_after_timeout_expires() {
        let start = Instant::now();
        let mut state = ConfirmState::default();
        state.arm(1, start);

        assert_eq!(
            state.confirm(start + Duration::from_secs(31), TIMEOUT),
            ConfirmStep::Expired
        );
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn test_cancel_disarms() {
        let mut state = ConfirmState::default();
        state.arm(1, Instant::now());
        state.cancel();
        assert_eq!(state, ConfirmState::Idle);
    }

    #[test]
    fn test_press_two_click_flow() {
        let start = Instant::now();
        let mut state = ConfirmState::default();

        assert_eq!(state.press(2, start, TIMEOUT), ConfirmStep::Armed);
        assert_eq!(
            state.press(2, start + Duration::from_secs(1), TIMEOUT),
            ConfirmStep::Confirmed
        );

        // A late second press re-arms instead of executing.
        assert_eq!(state.press(2, start, TIMEOUT), ConfirmStep::Armed);
        assert_eq!(
            state.press(2, start + Duration::from_secs(60), TIMEOUT),
            ConfirmStep::Armed
        );
    }
}
