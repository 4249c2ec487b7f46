use super::{
    with_element, Controller, FADE_IN_CLASS, HERO_CLASS, REVEAL_CLASSES, VISIBLE_CLASS,
};
use crate::{
    dom::NodeId,
    media::{PlayOrigin, PlayOutcome, PlayTask},
    observer::{IntersectionEntry, ObserverKind, ObserverOptions},
    page::{FrameCallback, Host},
};

impl Controller {
    pub(super) fn register_observers(&self, host: &mut Host) {
        let options = &self.config.observers;
        let observers = [
            (ObserverKind::VideoAutoplay, options.video_threshold, 0.0),
            (
                ObserverKind::Reveal,
                options.reveal_threshold,
                options.reveal_bottom_margin,
            ),
            (ObserverKind::LazyImage, options.lazy_threshold, 0.0),
        ];
        for (kind, threshold, bottom_margin) in observers {
            host.observers.register(
                kind,
                ObserverOptions {
                    threshold,
                    bottom_margin,
                },
            );
        }

        let doc = &host.doc;
        // The hero video loops in the background and is never paused.
        let videos: Vec<NodeId> = doc
            .by_tag("video")
            .into_iter()
            .filter(|video| doc.closest_with_class(*video, HERO_CLASS).is_none())
            .collect();
        let sections = doc.select(|el| REVEAL_CLASSES.iter().any(|class| el.has_class(class)));
        let images = doc.select(|el| el.tag == "img" && el.has_attr("src"));

        for (kind, targets) in [
            (ObserverKind::VideoAutoplay, videos),
            (ObserverKind::Reveal, sections),
            (ObserverKind::LazyImage, images),
        ] {
            for target in targets {
                host.observers.observe(kind, target);
            }
        }
    }

    pub(super) fn video_visibility(&mut self, entry: IntersectionEntry, host: &mut Host) {
        if entry.is_intersecting {
            host.request_play(entry.target, PlayOrigin::Video);
        } else {
            host.pause(entry.target);
        }
    }

    pub(super) fn video_settled(&mut self, task: PlayTask, host: &mut Host) {
        if task.outcome == PlayOutcome::Rejected {
            host.pause(task.media);
            tracing::warn!(node = task.media.index(), "video auto-play prevented");
        }
    }

    /// One-shot: the section keeps its reveal class and is no longer watched.
    pub(super) fn reveal(&mut self, entry: IntersectionEntry, host: &mut Host) {
        if !entry.is_intersecting {
            return;
        }
        with_element(host, Some(entry.target), |el| {
            el.add_class(FADE_IN_CLASS);
        });
        host.observers.unobserve(ObserverKind::Reveal, entry.target);
        if !self.revealed.contains(&entry.target) {
            self.revealed.push(entry.target);
        }
    }

    pub(super) fn mark_loaded(&mut self, entry: IntersectionEntry, host: &mut Host) {
        if !entry.is_intersecting {
            return;
        }
        with_element(host, Some(entry.target), |img| {
            img.add_class(FADE_IN_CLASS);
        });
        host.observers.unobserve(ObserverKind::LazyImage, entry.target);
    }

    pub(super) fn update_scroll_top_visibility(&mut self, host: &mut Host) {
        let past = host.doc.window().scroll_y() > self.config.scroll.scroll_top_threshold;
        with_element(host, self.elements.scroll_to_top, |button| {
            if past {
                button.add_class(VISIBLE_CLASS);
            } else {
                button.remove_class(VISIBLE_CLASS);
            }
        });
    }

    pub(super) fn update_navbar_background(&mut self, host: &mut Host) {
        let scroll = &self.config.scroll;
        let background = if host.doc.window().scroll_y() > scroll.navbar_threshold {
            &scroll.navbar_solid
        } else {
            &scroll.navbar_translucent
        };
        with_element(host, self.elements.navbar, |navbar| {
            navbar.set_style("background", background.as_str());
        });
    }

    /// Coalesces scroll bursts into a single parallax update per frame.
    pub(super) fn request_parallax_tick(&mut self, host: &mut Host) {
        if !self.ticking {
            host.request_animation_frame(FrameCallback::Parallax);
            self.ticking = true;
        }
    }

    pub(super) fn update_parallax(&mut self, host: &mut Host) {
        let offset = host.doc.window().scroll_y() * self.config.scroll.parallax_speed;
        let transform = format!("translateY({offset}px)");
        for hero in host.doc.by_class(HERO_CLASS) {
            with_element(host, Some(hero), |el| {
                el.set_style("transform", transform.as_str());
            });
        }
        self.ticking = false;
    }

    pub(super) fn preload_images(&self, host: &mut Host) {
        for src in &self.config.preload {
            host.doc.preload(src.as_str());
        }
    }

    /// Below the mobile breakpoint the body is tagged for lighter styling and
    /// videos only fetch metadata up front.
    pub(super) fn apply_small_screen_adjustments(&self, host: &mut Host) {
        if host.doc.window().width >= self.config.layout.mobile_breakpoint {
            return;
        }
        with_element(host, Some(NodeId::BODY), |body| {
            body.add_class("mobile");
        });
        for video in host.doc.by_tag("video") {
            with_element(host, Some(video), |el| {
                el.set_attr("preload", "metadata");
            });
        }
    }
}
