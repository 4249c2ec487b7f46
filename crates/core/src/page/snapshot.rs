use serde::{Deserialize, Serialize};

use super::Host;
use crate::{
    controller::{Controller, ACTIVE_CLASS, FADE_IN_CLASS, PLAYING_CLASS, VISIBLE_CLASS},
    dom::{Document, NodeId},
    Language,
};

/// Observable page state after a sequence of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub language: Language,
    pub language_label: Option<String>,
    pub user_interacted: bool,
    pub music_played: bool,
    pub music_paused: Option<bool>,
    pub music_play_requests: u32,
    pub music_toggle_playing: bool,
    pub music_toggle_hidden: bool,
    pub menu_open: bool,
    pub lightbox_open: bool,
    pub lightbox_caption: Option<String>,
    pub scroll_y: f64,
    pub scroll_to_top_visible: bool,
    pub navbar_background: Option<String>,
    pub revealed: Vec<String>,
    pub loaded_images: Vec<String>,
    pub preloaded: Vec<String>,
    pub frame_pending: bool,
}

impl PageSnapshot {
    pub(crate) fn capture(host: &Host, controller: &Controller) -> Self {
        let doc = &host.doc;
        let els = controller.elements();
        let has_class = |node: Option<NodeId>, class: &str| {
            node.and_then(|n| doc.element(n))
                .is_some_and(|el| el.has_class(class))
        };
        let music = els
            .background_music
            .and_then(|n| doc.element(n))
            .and_then(|el| el.media.as_ref());

        Self {
            language: controller.language(),
            language_label: els
                .lang_toggle
                .and_then(|n| doc.element(n))
                .map(|el| el.text.clone()),
            user_interacted: controller.user_interacted(),
            music_played: controller.music_played(),
            music_paused: music.map(|state| state.paused),
            music_play_requests: music.map_or(0, |state| state.play_requests),
            music_toggle_playing: has_class(els.music_toggle, PLAYING_CLASS),
            music_toggle_hidden: els
                .music_toggle
                .and_then(|n| doc.element(n))
                .is_some_and(|el| !el.is_displayed()),
            menu_open: has_class(els.mobile_menu, ACTIVE_CLASS),
            lightbox_open: controller.lightbox_open(host),
            lightbox_caption: els
                .modal_caption
                .and_then(|n| doc.element(n))
                .map(|el| el.text.clone())
                .filter(|caption| !caption.is_empty()),
            scroll_y: doc.window().scroll_y(),
            scroll_to_top_visible: has_class(els.scroll_to_top, VISIBLE_CLASS),
            navbar_background: els
                .navbar
                .and_then(|n| doc.element(n))
                .and_then(|el| el.style("background"))
                .map(str::to_string),
            revealed: controller
                .revealed()
                .iter()
                .map(|node| label(doc, *node))
                .collect(),
            loaded_images: doc
                .by_tag("img")
                .into_iter()
                .filter(|img| has_class(Some(*img), FADE_IN_CLASS))
                .map(|img| label(doc, img))
                .collect(),
            preloaded: doc.window().preloaded().to_vec(),
            frame_pending: !host.pending_frames().is_empty(),
        }
    }
}

/// `#id` when the element has one, `tag[index]` otherwise.
fn label(doc: &Document, node: NodeId) -> String {
    match doc.element(node) {
        Some(el) => match el.id() {
            Some(id) => format!("#{id}"),
            None => format!("{}[{}]", el.tag, node.index()),
        },
        None => format!("node[{}]", node.index()),
    }
}
