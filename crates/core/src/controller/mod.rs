//! The page controller: the state the page script used to keep in closures,
//! the element handles it resolves once, and every event reaction.
//!
//! Each component lives in its own file as an `impl Controller` block;
//! [`Controller::handle`] routes a [`Handler`] to the right one.

mod effects;
mod fallback;
mod language;
mod lightbox;
mod music;
mod navigation;

use crate::{
    dom::{Document, Element, NodeId, ScrollBehavior},
    events::{Binding, Event, EventTarget, EventType, Handler},
    media::{PlayOrigin, PlayTask},
    observer::{IntersectionEntry, ObserverKind},
    page::{FrameCallback, Host},
    Language, PageConfig,
};

pub(crate) const ACTIVE_CLASS: &str = "active";
pub(crate) const PLAYING_CLASS: &str = "playing";
pub(crate) const VISIBLE_CLASS: &str = "visible";
pub(crate) const FADE_IN_CLASS: &str = "fade-in";
pub(crate) const HERO_CLASS: &str = "hero-background";
pub(crate) const REVEAL_CLASSES: [&str; 4] =
    ["section", "veteran-info", "award-item", "document-item"];

/// Fixed elements the page script addresses. Any of them may be absent, in
/// which case the behaviour depending on it is simply not wired.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub lang_toggle: Option<NodeId>,
    pub background_music: Option<NodeId>,
    pub music_toggle: Option<NodeId>,
    pub hamburger: Option<NodeId>,
    pub mobile_menu: Option<NodeId>,
    pub scroll_to_top: Option<NodeId>,
    pub modal: Option<NodeId>,
    pub modal_image: Option<NodeId>,
    pub modal_caption: Option<NodeId>,
    pub modal_close: Option<NodeId>,
    pub navbar: Option<NodeId>,
}

impl PageElements {
    pub fn resolve(doc: &Document) -> Self {
        Self {
            lang_toggle: doc.by_id("langToggle"),
            background_music: doc.by_id("backgroundMusic"),
            music_toggle: doc.by_id("musicToggle"),
            hamburger: doc.by_id("hamburger"),
            mobile_menu: doc.by_id("mobileMenu"),
            scroll_to_top: doc.by_id("scrollToTop"),
            modal: doc.by_id("imageModal"),
            modal_image: doc.by_id("modalImage"),
            modal_caption: doc.by_id("modalCaption"),
            modal_close: doc.first_by_class("modal-close"),
            navbar: doc.by_id("navbar"),
        }
    }
}

#[derive(Debug)]
pub struct Controller {
    config: PageConfig,
    elements: PageElements,
    language: Language,
    music_played: bool,
    user_interacted: bool,
    ticking: bool,
    touch_start_y: f64,
    bindings: Vec<Binding>,
    /// Every reveal applied, in order. A node appears here at most once.
    revealed: Vec<NodeId>,
}

impl Controller {
    pub fn new(config: PageConfig, doc: &Document) -> Self {
        Self {
            language: config.language.initial,
            config,
            elements: PageElements::resolve(doc),
            music_played: false,
            user_interacted: false,
            ticking: false,
            touch_start_y: 0.0,
            bindings: Vec::new(),
            revealed: Vec::new(),
        }
    }

    /// The DOMContentLoaded routine: wires listeners and observers and brings
    /// the page into its initial state.
    pub fn init(&mut self, host: &mut Host) {
        self.bindings.clear();
        let doc = &host.doc;
        let els = self.elements.clone();

        self.bind_node(els.lang_toggle, EventType::Click, Handler::ToggleLanguage);
        self.bind_node(els.music_toggle, EventType::Click, Handler::ToggleMusic);
        for event in [EventType::Click, EventType::Scroll, EventType::KeyDown] {
            self.bind(EventTarget::Document, event, Handler::UserInteraction);
        }

        self.bind_node(els.hamburger, EventType::Click, Handler::ToggleMenu);
        for item in doc.by_class("mobile-nav-item") {
            self.bind(EventTarget::Node(item), EventType::Click, Handler::CloseMenu);
        }
        self.bind(EventTarget::Document, EventType::Click, Handler::CloseMenuOutside);
        for link in doc.select(|el| el.has_class("nav-item") || el.has_class("mobile-nav-item")) {
            self.bind(EventTarget::Node(link), EventType::Click, Handler::SmoothScroll);
        }

        self.bind(EventTarget::Window, EventType::Scroll, Handler::ScrollTopVisibility);
        self.bind_node(els.scroll_to_top, EventType::Click, Handler::ScrollToTop);

        for img in doc.select(is_lightbox_image) {
            self.bind(EventTarget::Node(img), EventType::Click, Handler::OpenLightbox);
        }
        self.bind_node(els.modal_close, EventType::Click, Handler::CloseLightbox);
        self.bind(EventTarget::Window, EventType::Click, Handler::CloseLightboxOutside);
        self.bind(EventTarget::Document, EventType::KeyDown, Handler::CloseLightboxOnEscape);

        self.bind(EventTarget::Window, EventType::Scroll, Handler::NavbarBackground);
        self.bind(EventTarget::Document, EventType::VisibilityChange, Handler::VisibilityChange);

        for video in doc.by_tag("video") {
            self.bind(EventTarget::Node(video), EventType::Error, Handler::VideoFailed);
        }
        for img in doc.by_tag("img") {
            self.bind(EventTarget::Node(img), EventType::Error, Handler::ImageFailed);
        }
        self.bind_node(els.background_music, EventType::Error, Handler::MusicFailed);

        self.bind(EventTarget::Window, EventType::Scroll, Handler::RequestParallax);
        self.bind(EventTarget::Document, EventType::TouchStart, Handler::TouchStart);
        self.bind(EventTarget::Document, EventType::TouchEnd, Handler::TouchEnd);

        self.register_observers(host);
        self.preload_images(host);
        self.apply_language(host);
        host.scroll_to(0.0, ScrollBehavior::Instant);
        self.apply_small_screen_adjustments(host);

        tracing::info!(
            bindings = self.bindings.len(),
            language = %self.language,
            "memorial page initialised"
        );
    }

    /// Runs the reaction named by `handler` for `event`.
    pub fn handle(&mut self, handler: Handler, event: &mut Event, host: &mut Host) {
        tracing::trace!(?handler, event = event.event_type().name(), "handling event");
        match handler {
            Handler::ToggleLanguage => self.toggle_language(host),
            Handler::ToggleMusic => self.toggle_music(host),
            Handler::UserInteraction => self.handle_user_interaction(host),
            Handler::MusicFailed => self.music_failed(host),
            Handler::TouchStart => self.touch_start(event),
            Handler::TouchEnd => self.touch_end(event, host),
            Handler::VisibilityChange => self.visibility_changed(host),
            Handler::ToggleMenu => self.toggle_menu(host),
            Handler::CloseMenu => self.close_menu(host),
            Handler::CloseMenuOutside => self.close_menu_outside(event, host),
            Handler::SmoothScroll => self.smooth_scroll(event, host),
            Handler::ScrollTopVisibility => self.update_scroll_top_visibility(host),
            Handler::ScrollToTop => host.scroll_to(0.0, ScrollBehavior::Smooth),
            Handler::OpenLightbox => self.open_lightbox(event, host),
            Handler::CloseLightbox => self.close_lightbox(host),
            Handler::CloseLightboxOutside => self.close_lightbox_outside(event, host),
            Handler::CloseLightboxOnEscape => self.close_lightbox_on_escape(event, host),
            Handler::NavbarBackground => self.update_navbar_background(host),
            Handler::RequestParallax => self.request_parallax_tick(host),
            Handler::VideoFailed => self.video_failed(event, host),
            Handler::ImageFailed => self.image_failed(event, host),
        }
    }

    pub fn on_intersection(&mut self, kind: ObserverKind, entry: IntersectionEntry, host: &mut Host) {
        match kind {
            ObserverKind::VideoAutoplay => self.video_visibility(entry, host),
            ObserverKind::Reveal => self.reveal(entry, host),
            ObserverKind::LazyImage => self.mark_loaded(entry, host),
        }
    }

    pub fn on_play_settled(&mut self, task: PlayTask, host: &mut Host) {
        match task.origin {
            PlayOrigin::Music => self.music_settled(task, host),
            PlayOrigin::Video => self.video_settled(task, host),
        }
    }

    pub fn on_frame(&mut self, callback: FrameCallback, host: &mut Host) {
        match callback {
            FrameCallback::Parallax => self.update_parallax(host),
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn music_played(&self) -> bool {
        self.music_played
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    pub fn revealed(&self) -> &[NodeId] {
        &self.revealed
    }

    fn bind(&mut self, target: EventTarget, event: EventType, handler: Handler) {
        self.bindings.push(Binding::new(target, event, handler));
    }

    fn bind_node(&mut self, node: Option<NodeId>, event: EventType, handler: Handler) {
        if let Some(node) = node {
            self.bind(EventTarget::Node(node), event, handler);
        }
    }
}

/// Images that open in the lightbox: `data-lightbox`, or the inline handler
/// older markup uses.
pub(crate) fn is_lightbox_image(element: &Element) -> bool {
    element.tag == "img"
        && (element.has_attr("data-lightbox")
            || element.attr("onclick") == Some("openModal(this)"))
}

/// Applies `f` to the element behind `node`, if both exist.
pub(crate) fn with_element(host: &mut Host, node: Option<NodeId>, f: impl FnOnce(&mut Element)) {
    if let Some(element) = node.and_then(|id| host.doc.element_mut(id)) {
        f(element);
    }
}
