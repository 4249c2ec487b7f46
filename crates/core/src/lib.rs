//! Core library for the bilingual memorial page.
//!
//! The page behaviour is a fixed set of event reactions: language switching,
//! background music, the mobile menu, anchor scrolling, an image lightbox and
//! scroll-driven effects. They run against a headless document model so the
//! whole page can be driven by simulated events. Each module owns one piece:
//! the document ([`dom`]), event plumbing ([`events`]), media playback
//! ([`media`]), intersection observers ([`observer`]), the reactions
//! themselves ([`controller`]) and the runtime tying them together
//! ([`page`]).

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod language;
pub mod media;
pub mod observer;
pub mod page;

pub use config::{
    LanguageConfig, LayoutConfig, MediaConfig, NavigationConfig, ObserverConfig, PageConfig,
    ScrollConfig, TouchConfig,
};
pub use controller::{Controller, PageElements};
pub use dom::{Document, Element, Layout, NodeId, NodeSpec, PageMarkup, ScrollBehavior, ViewportSpec};
pub use error::{PageError, Result};
pub use events::{Binding, Event, EventKind, EventTarget, EventType, Handler};
pub use language::Language;
pub use media::{AutoplayPolicy, MediaState, PlayOrigin, PlayOutcome};
pub use observer::{IntersectionEntry, ObserverKind, ObserverOptions, ObserverRegistry};
pub use page::{Action, FrameCallback, Host, Page, PageSnapshot};
