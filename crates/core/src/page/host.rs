use std::collections::VecDeque;

use crate::{
    dom::{Document, NodeId, ScrollBehavior},
    events::{Event, EventKind, EventTarget},
    media::{PlayOrigin, PlayTask},
    observer::ObserverRegistry,
};

/// Work scheduled for the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCallback {
    Parallax,
}

/// Everything a handler may touch besides the controller's own state: the
/// document, observers and the queues the page drains after each event.
#[derive(Debug)]
pub struct Host {
    pub doc: Document,
    pub observers: ObserverRegistry,
    tasks: VecDeque<PlayTask>,
    frames: Vec<FrameCallback>,
    pending: VecDeque<Event>,
    activation: bool,
}

impl Host {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            observers: ObserverRegistry::new(),
            tasks: VecDeque::new(),
            frames: Vec::new(),
            pending: VecDeque::new(),
            activation: false,
        }
    }

    /// `media.play()`: flips the element to playing right away and queues the
    /// settlement. Returns `false` when `media` is not a media element.
    pub fn request_play(&mut self, media: NodeId, origin: PlayOrigin) -> bool {
        let activated = self.activation;
        let Some(state) = self
            .doc
            .element_mut(media)
            .and_then(|element| element.media.as_mut())
        else {
            return false;
        };
        state.play_requests += 1;
        state.paused = false;
        let outcome = state.outcome_for(activated);
        self.tasks.push_back(PlayTask {
            media,
            origin,
            outcome,
        });
        true
    }

    pub fn pause(&mut self, media: NodeId) {
        if let Some(state) = self
            .doc
            .element_mut(media)
            .and_then(|element| element.media.as_mut())
        {
            state.paused = true;
        }
    }

    /// Paused state of a media element; non-media nodes count as paused.
    pub fn is_paused(&self, media: NodeId) -> bool {
        self.doc
            .element(media)
            .and_then(|element| element.media.as_ref())
            .map_or(true, |state| state.paused)
    }

    /// `window.scrollTo`. A changed offset queues a scroll event.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        if self.doc.scroll_to(top, behavior) {
            self.pending
                .push_back(Event::new(EventKind::Scroll, EventTarget::Document));
        }
    }

    pub fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.frames.push(callback);
    }

    pub fn pending_frames(&self) -> &[FrameCallback] {
        &self.frames
    }

    /// Records sticky user activation; it is never revoked for the page's
    /// lifetime.
    pub(crate) fn grant_activation(&mut self) {
        self.activation = true;
    }

    pub fn has_activation(&self) -> bool {
        self.activation
    }

    pub(crate) fn next_task(&mut self) -> Option<PlayTask> {
        self.tasks.pop_front()
    }

    pub(crate) fn next_event(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub(crate) fn take_frames(&mut self) -> Vec<FrameCallback> {
        std::mem::take(&mut self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::Element,
        media::{AutoplayPolicy, MediaState, PlayOutcome},
    };

    fn host_with_audio(policy: AutoplayPolicy) -> (Host, NodeId) {
        let mut doc = Document::new(800.0, 600.0);
        let mut audio = Element::new("audio");
        audio.media = Some(MediaState::new(policy, false));
        let audio = doc.append(NodeId::BODY, audio).unwrap();
        (Host::new(doc), audio)
    }

    #[test]
    fn play_outcome_depends_on_activation_at_request_time() {
        let (mut host, audio) = host_with_audio(AutoplayPolicy::RequiresActivation);

        assert!(host.request_play(audio, PlayOrigin::Music));
        assert!(!host.is_paused(audio));
        host.grant_activation();
        assert!(host.request_play(audio, PlayOrigin::Music));

        assert_eq!(host.next_task().unwrap().outcome, PlayOutcome::Rejected);
        assert_eq!(host.next_task().unwrap().outcome, PlayOutcome::Started);
        assert!(host.next_task().is_none());
    }

    #[test]
    fn play_on_non_media_is_ignored() {
        let (mut host, _) = host_with_audio(AutoplayPolicy::Allowed);
        assert!(!host.request_play(NodeId::BODY, PlayOrigin::Video));
        assert!(host.is_paused(NodeId::BODY));
        assert!(host.next_task().is_none());
    }

    #[test]
    fn only_effective_scrolls_queue_events() {
        let (mut host, _) = host_with_audio(AutoplayPolicy::Allowed);
        host.scroll_to(0.0, ScrollBehavior::Instant);
        assert!(host.next_event().is_none());
    }
}
