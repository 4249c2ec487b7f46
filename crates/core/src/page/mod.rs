//! The page runtime: owns the document and the controller, dispatches events
//! through the binding list and drains the follow-up work every event leaves
//! behind (media settlements, script-issued scrolls, observer entries).

mod host;
mod script;
mod snapshot;

use crate::{
    controller::Controller,
    dom::{Document, NodeId, PageMarkup},
    events::{Binding, Event, EventKind, EventTarget, Handler},
    PageConfig, Result,
};

pub use host::{FrameCallback, Host};
pub use script::Action;
pub use snapshot::PageSnapshot;

#[derive(Debug)]
pub struct Page {
    host: Host,
    controller: Controller,
}

impl Page {
    /// Builds the document from `markup` and runs the initialisation routine.
    pub fn load(markup: &PageMarkup, config: PageConfig) -> Result<Self> {
        let doc = markup.build(config.media.autoplay)?;
        Ok(Self::from_document(doc, config))
    }

    pub fn from_document(doc: Document, config: PageConfig) -> Self {
        let controller = Controller::new(config, &doc);
        let mut page = Self {
            host: Host::new(doc),
            controller,
        };
        page.controller.init(&mut page.host);
        page.settle();
        page
    }

    pub fn document(&self) -> &Document {
        &self.host.doc
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn bindings(&self) -> &[Binding] {
        self.controller.bindings()
    }

    /// Resolves an element id, failing for ids the page does not contain.
    pub fn node(&self, id: &str) -> Result<NodeId> {
        self.host.doc.require_id(id)
    }

    /// Delivers `event` to every matching binding along its propagation path
    /// and returns it, so callers can inspect `default_prevented`.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        let event_type = event.event_type();
        if event_type.is_activating() {
            self.host.grant_activation();
        }

        for hop in event.propagation_path(&self.host.doc) {
            event.current_target = hop;
            let handlers: Vec<Handler> = self
                .controller
                .bindings()
                .iter()
                .filter(|binding| binding.target == hop && binding.event == event_type)
                .map(|binding| binding.handler)
                .collect();
            for handler in handlers {
                self.controller.handle(handler, &mut event, &mut self.host);
            }
        }
        event.current_target = event.target;
        event
    }

    /// Dispatches and then settles the page.
    fn fire(&mut self, kind: EventKind, target: EventTarget) -> Event {
        let event = self.dispatch(Event::new(kind, target));
        self.settle();
        event
    }

    pub fn click(&mut self, id: &str) -> Result<Event> {
        let node = self.node(id)?;
        Ok(self.click_node(node))
    }

    pub fn click_node(&mut self, node: NodeId) -> Event {
        self.fire(EventKind::Click, EventTarget::Node(node))
    }

    /// Visitor scroll to `top`. Nothing fires when the offset does not move.
    pub fn scroll_to(&mut self, top: f64) {
        if self.host.doc.user_scroll(top) {
            self.fire(EventKind::Scroll, EventTarget::Document);
        }
    }

    pub fn key_down(&mut self, key: &str) -> Event {
        self.fire(
            EventKind::KeyDown {
                key: key.to_string(),
            },
            EventTarget::Node(NodeId::BODY),
        )
    }

    pub fn touch_start(&mut self, screen_y: f64) {
        self.fire(
            EventKind::TouchStart { screen_y },
            EventTarget::Node(NodeId::BODY),
        );
    }

    pub fn touch_end(&mut self, screen_y: f64) {
        self.fire(
            EventKind::TouchEnd { screen_y },
            EventTarget::Node(NodeId::BODY),
        );
    }

    pub fn swipe(&mut self, from: f64, to: f64) {
        self.touch_start(from);
        self.touch_end(to);
    }

    /// Switches page visibility; a no-op when it does not change.
    pub fn set_hidden(&mut self, hidden: bool) {
        if self.host.doc.window().hidden == hidden {
            return;
        }
        self.host.doc.window_mut().hidden = hidden;
        self.fire(EventKind::VisibilityChange, EventTarget::Document);
    }

    /// Simulates the element's resource failing to load.
    pub fn fail_load(&mut self, id: &str) -> Result<()> {
        let node = self.node(id)?;
        self.fire(EventKind::Error, EventTarget::Node(node));
        Ok(())
    }

    /// Runs the callbacks queued for the next animation frame.
    pub fn render_frame(&mut self) {
        for callback in self.host.take_frames() {
            self.controller.on_frame(callback, &mut self.host);
        }
        self.settle();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let window = self.host.doc.window_mut();
        window.width = width;
        window.height = height;
        self.settle();
    }

    pub fn apply(&mut self, action: &Action) -> Result<()> {
        tracing::debug!(?action, "applying action");
        match action {
            Action::Click { id } => {
                self.click(id)?;
            }
            Action::ClickBody => {
                self.click_node(NodeId::BODY);
            }
            Action::Scroll { y } => self.scroll_to(*y),
            Action::Key { key } => {
                self.key_down(key);
            }
            Action::TouchStart { y } => self.touch_start(*y),
            Action::TouchEnd { y } => self.touch_end(*y),
            Action::Swipe { from, to } => self.swipe(*from, *to),
            Action::Hide => self.set_hidden(true),
            Action::Show => self.set_hidden(false),
            Action::Fail { id } => self.fail_load(id)?,
            Action::Frame => self.render_frame(),
            Action::Resize { width, height } => self.resize(*width, *height),
        }
        Ok(())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::capture(&self.host, &self.controller)
    }

    /// Drains follow-up work until the page is quiet: scroll events issued by
    /// handlers, settled `play()` calls, then intersection entries.
    fn settle(&mut self) {
        loop {
            let mut progressed = false;

            while let Some(event) = self.host.next_event() {
                self.dispatch(event);
                progressed = true;
            }
            while let Some(task) = self.host.next_task() {
                self.controller.on_play_settled(task, &mut self.host);
                progressed = true;
            }
            let entries = self.host.observers.take_entries(&self.host.doc);
            for (kind, entry) in entries {
                tracing::trace!(
                    ?kind,
                    node = entry.target.index(),
                    intersecting = entry.is_intersecting,
                    "intersection"
                );
                self.controller.on_intersection(kind, entry, &mut self.host);
                progressed = true;
            }

            if !progressed {
                break;
            }
        }
    }
}
