use super::{with_element, Controller};
use crate::{events::Event, page::Host};

const MISSING_IMAGE_ALT: &str = "Image not available";

impl Controller {
    pub(super) fn video_failed(&mut self, event: &Event, host: &mut Host) {
        let node = event.current_node();
        with_element(host, node, |video| {
            tracing::warn!(src = video.attr("src").unwrap_or_default(), "video failed to load");
            video.set_style("display", "none");
        });
    }

    pub(super) fn image_failed(&mut self, event: &Event, host: &mut Host) {
        let node = event.current_node();
        with_element(host, node, |img| {
            tracing::warn!(src = img.attr("src").unwrap_or_default(), "image failed to load");
            img.set_style("opacity", "0.5");
            img.set_attr("alt", MISSING_IMAGE_ALT);
        });
    }

    /// Without audio there is nothing to toggle, so the control goes away.
    pub(super) fn music_failed(&mut self, host: &mut Host) {
        tracing::warn!("background music failed to load");
        with_element(host, self.elements.music_toggle, |toggle| {
            toggle.set_style("display", "none");
        });
    }
}
