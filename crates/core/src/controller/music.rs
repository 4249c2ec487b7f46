use super::{with_element, Controller, PLAYING_CLASS};
use crate::{
    events::{Event, EventKind},
    media::{PlayOrigin, PlayOutcome, PlayTask},
    page::Host,
};

impl Controller {
    pub(super) fn toggle_music(&mut self, host: &mut Host) {
        let Some(audio) = self.elements.background_music else {
            return;
        };
        if host.is_paused(audio) {
            self.play_music(host);
        } else {
            self.pause_music(host);
        }
    }

    fn play_music(&mut self, host: &mut Host) {
        if let Some(audio) = self.elements.background_music {
            host.request_play(audio, PlayOrigin::Music);
        }
    }

    fn pause_music(&mut self, host: &mut Host) {
        let Some(audio) = self.elements.background_music else {
            return;
        };
        host.pause(audio);
        with_element(host, self.elements.music_toggle, |toggle| {
            toggle.remove_class(PLAYING_CLASS);
        });
    }

    /// First click, scroll, key press or swipe starts the music. Later
    /// interactions never trigger autoplay again.
    pub(super) fn handle_user_interaction(&mut self, host: &mut Host) {
        if self.user_interacted {
            return;
        }
        self.user_interacted = true;
        tracing::debug!("first user interaction");

        let idle = self
            .elements
            .background_music
            .is_some_and(|audio| host.is_paused(audio));
        if !self.music_played && idle {
            self.play_music(host);
        }
    }

    pub(super) fn music_settled(&mut self, task: PlayTask, host: &mut Host) {
        match task.outcome {
            PlayOutcome::Started if host.is_paused(task.media) => {
                tracing::debug!("music start aborted by a pause");
            }
            PlayOutcome::Started => {
                self.music_played = true;
                with_element(host, self.elements.music_toggle, |toggle| {
                    toggle.add_class(PLAYING_CLASS);
                });
            }
            PlayOutcome::Rejected => {
                host.pause(task.media);
                tracing::warn!("auto-play prevented by the browser");
            }
        }
    }

    /// Pauses while the page is hidden and resumes on return, provided the
    /// music has played before and the visitor has interacted.
    pub(super) fn visibility_changed(&mut self, host: &mut Host) {
        if host.doc.window().hidden {
            let playing = self
                .elements
                .background_music
                .is_some_and(|audio| !host.is_paused(audio));
            if playing {
                self.pause_music(host);
            }
        } else if self.music_played && self.user_interacted {
            self.play_music(host);
        }
    }

    pub(super) fn touch_start(&mut self, event: &Event) {
        if let EventKind::TouchStart { screen_y } = event.kind {
            self.touch_start_y = screen_y;
        }
    }

    /// A vertical swipe in either direction counts as an interaction.
    pub(super) fn touch_end(&mut self, event: &Event, host: &mut Host) {
        let EventKind::TouchEnd { screen_y } = event.kind else {
            return;
        };
        let threshold = self.config.touch.swipe_threshold;
        if screen_y < self.touch_start_y - threshold || screen_y > self.touch_start_y + threshold {
            self.handle_user_interaction(host);
        }
    }
}
