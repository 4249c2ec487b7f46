use super::{with_element, Controller, ACTIVE_CLASS};
use crate::{
    dom::ScrollBehavior,
    events::Event,
    page::Host,
};

impl Controller {
    pub(super) fn toggle_menu(&mut self, host: &mut Host) {
        for node in [self.elements.hamburger, self.elements.mobile_menu] {
            with_element(host, node, |el| {
                el.toggle_class(ACTIVE_CLASS);
            });
        }
    }

    pub(super) fn close_menu(&mut self, host: &mut Host) {
        for node in [self.elements.hamburger, self.elements.mobile_menu] {
            with_element(host, node, |el| {
                el.remove_class(ACTIVE_CLASS);
            });
        }
    }

    /// Closes the menu for clicks landing outside both the hamburger and
    /// the menu itself.
    pub(super) fn close_menu_outside(&mut self, event: &Event, host: &mut Host) {
        let Some(target) = event.target_node() else {
            return;
        };
        let inside = [self.elements.hamburger, self.elements.mobile_menu]
            .into_iter()
            .flatten()
            .any(|container| host.doc.contains(container, target));
        if !inside {
            self.close_menu(host);
        }
    }

    /// Replaces anchor navigation with a smooth scroll that leaves room for
    /// the fixed header. Links whose target is missing do nothing.
    pub(super) fn smooth_scroll(&mut self, event: &mut Event, host: &mut Host) {
        event.prevent_default();
        let Some(link) = event.current_node() else {
            return;
        };
        let Some(href) = host.doc.element(link).and_then(|el| el.attr("href")) else {
            return;
        };
        let Some(section) = href.strip_prefix('#').and_then(|id| host.doc.by_id(id)) else {
            tracing::debug!(href, "anchor target not found");
            return;
        };
        let Some(top) = host.doc.element(section).map(|el| el.layout.top) else {
            return;
        };
        let offset = top - self.config.navigation.header_offset;
        host.scroll_to(offset, ScrollBehavior::Smooth);
    }
}
