use serde::{Deserialize, Serialize};

use crate::dom::NodeId;

/// Mirrors the browser rule deciding whether `play()` may start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayPolicy {
    /// Every request succeeds.
    Allowed,
    /// Requests succeed once the page has seen an activating user event, or
    /// for muted media.
    #[default]
    RequiresActivation,
    /// Every request is rejected.
    Blocked,
}

/// Playback state carried by `audio` and `video` nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaState {
    pub paused: bool,
    pub muted: bool,
    pub autoplay: AutoplayPolicy,
    /// Number of `play()` calls issued against the element.
    pub play_requests: u32,
}

impl MediaState {
    pub fn new(autoplay: AutoplayPolicy, muted: bool) -> Self {
        Self {
            paused: true,
            muted,
            autoplay,
            play_requests: 0,
        }
    }

    /// Decides how a play request issued now will settle.
    pub fn outcome_for(&self, activated: bool) -> PlayOutcome {
        let allowed = match self.autoplay {
            AutoplayPolicy::Allowed => true,
            AutoplayPolicy::RequiresActivation => activated || self.muted,
            AutoplayPolicy::Blocked => false,
        };
        if allowed {
            PlayOutcome::Started
        } else {
            PlayOutcome::Rejected
        }
    }
}

/// Which part of the page asked for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    Music,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Rejected,
}

/// Pending settlement of a `play()` call, resolved when the page drains its
/// task queue.
#[derive(Debug, Clone, Copy)]
pub struct PlayTask {
    pub media: NodeId,
    pub origin: PlayOrigin,
    pub outcome: PlayOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_policy_depends_on_gesture_or_mute() {
        let audible = MediaState::new(AutoplayPolicy::RequiresActivation, false);
        assert_eq!(audible.outcome_for(false), PlayOutcome::Rejected);
        assert_eq!(audible.outcome_for(true), PlayOutcome::Started);

        let muted = MediaState::new(AutoplayPolicy::RequiresActivation, true);
        assert_eq!(muted.outcome_for(false), PlayOutcome::Started);
    }

    #[test]
    fn fixed_policies_ignore_activation() {
        let allowed = MediaState::new(AutoplayPolicy::Allowed, false);
        let blocked = MediaState::new(AutoplayPolicy::Blocked, true);
        for activated in [false, true] {
            assert_eq!(allowed.outcome_for(activated), PlayOutcome::Started);
            assert_eq!(blocked.outcome_for(activated), PlayOutcome::Rejected);
        }
    }

    #[test]
    fn new_media_starts_paused() {
        let state = MediaState::new(AutoplayPolicy::Allowed, false);
        assert!(state.paused);
        assert_eq!(state.play_requests, 0);
    }
}
