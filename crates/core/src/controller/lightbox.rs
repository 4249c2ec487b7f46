use super::{with_element, Controller};
use crate::{
    events::{Event, EventKind},
    page::Host,
};

impl Controller {
    /// Shows the clicked image enlarged, captioned with its alt text.
    pub(super) fn open_lightbox(&mut self, event: &Event, host: &mut Host) {
        let Some(img) = event.current_node().and_then(|node| host.doc.element(node)) else {
            return;
        };
        let src = img.attr("src").unwrap_or_default().to_string();
        let caption = img.attr("alt").unwrap_or_default().to_string();

        with_element(host, self.elements.modal, |modal| {
            modal.set_style("display", "block");
        });
        with_element(host, self.elements.modal_image, |image| {
            image.set_attr("src", src);
        });
        with_element(host, self.elements.modal_caption, |slot| {
            slot.text = caption;
        });
    }

    pub(super) fn close_lightbox(&mut self, host: &mut Host) {
        with_element(host, self.elements.modal, |modal| {
            modal.set_style("display", "none");
        });
    }

    /// Clicks on the overlay itself, not on anything inside it, close it.
    pub(super) fn close_lightbox_outside(&mut self, event: &Event, host: &mut Host) {
        if self.elements.modal.is_some() && event.target_node() == self.elements.modal {
            self.close_lightbox(host);
        }
    }

    pub(super) fn close_lightbox_on_escape(&mut self, event: &Event, host: &mut Host) {
        let EventKind::KeyDown { key } = &event.kind else {
            return;
        };
        if key == "Escape" && self.lightbox_open(host) {
            self.close_lightbox(host);
        }
    }

    pub fn lightbox_open(&self, host: &Host) -> bool {
        self.elements
            .modal
            .and_then(|modal| host.doc.element(modal))
            .is_some_and(|modal| modal.style("display") == Some("block"))
    }
}
