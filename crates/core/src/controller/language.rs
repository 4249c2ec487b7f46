use super::{with_element, Controller};
use crate::{page::Host, Language};

impl Controller {
    pub(super) fn toggle_language(&mut self, host: &mut Host) {
        self.language = self.language.toggled();
        let label = self.language.label();
        with_element(host, self.elements.lang_toggle, |toggle| {
            toggle.text = label.to_string();
        });
        self.apply_language(host);
    }

    /// Rewrites every bilingual element to the active language. Safe to call
    /// repeatedly; elements without text for the language are left alone.
    pub(super) fn apply_language(&self, host: &mut Host) {
        let attribute = self.language.attribute();
        let bilingual = host.doc.select(|el| {
            Language::ALL
                .iter()
                .all(|lang| el.has_attr(lang.attribute()))
        });

        for node in bilingual {
            let Some(element) = host.doc.element_mut(node) else {
                continue;
            };
            let Some(text) = element.attr(attribute).filter(|t| !t.is_empty()) else {
                continue;
            };
            let text = text.to_string();
            if element.is_text_input() {
                element.set_attr("placeholder", text);
            } else {
                element.text = text;
            }
        }
        tracing::debug!(language = %self.language, "language applied");
    }
}
