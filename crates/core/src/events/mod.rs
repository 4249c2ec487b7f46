use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTarget::Window => f.write_str("window"),
            EventTarget::Document => f.write_str("document"),
            EventTarget::Node(id) => write!(f, "node#{}", id.index()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Click,
    Scroll,
    KeyDown,
    TouchStart,
    TouchEnd,
    VisibilityChange,
    Error,
}

impl EventType {
    pub fn name(self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::Scroll => "scroll",
            EventType::KeyDown => "keydown",
            EventType::TouchStart => "touchstart",
            EventType::TouchEnd => "touchend",
            EventType::VisibilityChange => "visibilitychange",
            EventType::Error => "error",
        }
    }

    /// Events that grant user activation, which unlocks autoplay.
    pub fn is_activating(self) -> bool {
        matches!(
            self,
            EventType::Click | EventType::KeyDown | EventType::TouchEnd
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Click,
    Scroll,
    KeyDown { key: String },
    TouchStart { screen_y: f64 },
    TouchEnd { screen_y: f64 },
    VisibilityChange,
    Error,
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Click => EventType::Click,
            EventKind::Scroll => EventType::Scroll,
            EventKind::KeyDown { .. } => EventType::KeyDown,
            EventKind::TouchStart { .. } => EventType::TouchStart,
            EventKind::TouchEnd { .. } => EventType::TouchEnd,
            EventKind::VisibilityChange => EventType::VisibilityChange,
            EventKind::Error => EventType::Error,
        }
    }
}

/// A dispatched event as handlers see it.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: EventTarget,
    /// Target whose listeners are currently running.
    pub current_target: EventTarget,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        match self.current_target {
            EventTarget::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Targets visited by the event, innermost first.
    pub fn propagation_path(&self, doc: &Document) -> Vec<EventTarget> {
        match (self.target, self.event_type()) {
            (EventTarget::Node(id), EventType::Error) => vec![EventTarget::Node(id)],
            (EventTarget::Node(id), _) => {
                let mut path: Vec<EventTarget> = doc
                    .ancestors(id)
                    .filter(|node| *node != NodeId::DOCUMENT)
                    .map(EventTarget::Node)
                    .collect();
                path.push(EventTarget::Document);
                path.push(EventTarget::Window);
                path
            }
            (EventTarget::Document, EventType::VisibilityChange) => vec![EventTarget::Document],
            (EventTarget::Document, _) => vec![EventTarget::Document, EventTarget::Window],
            (EventTarget::Window, _) => vec![EventTarget::Window],
        }
    }
}

/// Controller reaction a binding invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handler {
    ToggleLanguage,
    ToggleMusic,
    UserInteraction,
    MusicFailed,
    TouchStart,
    TouchEnd,
    VisibilityChange,
    ToggleMenu,
    CloseMenu,
    CloseMenuOutside,
    SmoothScroll,
    ScrollTopVisibility,
    ScrollToTop,
    OpenLightbox,
    CloseLightbox,
    CloseLightboxOutside,
    CloseLightboxOnEscape,
    NavbarBackground,
    RequestParallax,
    VideoFailed,
    ImageFailed,
}

/// One entry of the subscription list: on `event` at `target`, run `handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub target: EventTarget,
    pub event: EventType,
    pub handler: Handler,
}

impl Binding {
    pub fn new(target: EventTarget, event: EventType, handler: Handler) -> Self {
        Self {
            target,
            event,
            handler,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {:?}",
            self.target,
            self.event.name(),
            self.handler
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn clicks_bubble_through_ancestors_to_window() {
        let mut doc = Document::new(800.0, 600.0);
        let menu = doc.append(NodeId::BODY, Element::new("div")).unwrap();
        let item = doc.append(menu, Element::new("a")).unwrap();

        let event = Event::new(EventKind::Click, EventTarget::Node(item));
        assert_eq!(
            event.propagation_path(&doc),
            vec![
                EventTarget::Node(item),
                EventTarget::Node(menu),
                EventTarget::Node(NodeId::BODY),
                EventTarget::Document,
                EventTarget::Window,
            ]
        );
    }

    #[test]
    fn errors_and_visibility_do_not_bubble() {
        let mut doc = Document::new(800.0, 600.0);
        let img = doc.append(NodeId::BODY, Element::new("img")).unwrap();

        let error = Event::new(EventKind::Error, EventTarget::Node(img));
        assert_eq!(error.propagation_path(&doc), vec![EventTarget::Node(img)]);

        let visibility = Event::new(EventKind::VisibilityChange, EventTarget::Document);
        assert_eq!(
            visibility.propagation_path(&doc),
            vec![EventTarget::Document]
        );

        let scroll = Event::new(EventKind::Scroll, EventTarget::Document);
        assert_eq!(
            scroll.propagation_path(&doc),
            vec![EventTarget::Document, EventTarget::Window]
        );
    }

    #[test]
    fn scroll_is_not_an_activating_event() {
        assert!(EventType::Click.is_activating());
        assert!(EventType::TouchEnd.is_activating());
        assert!(!EventType::Scroll.is_activating());
        assert!(!EventType::TouchStart.is_activating());
    }

    #[test]
    fn prevent_default_is_sticky() {
        let mut event = Event::new(EventKind::Click, EventTarget::Document);
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
