//! Headless stand-in for the browser document the page script runs against.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Node 0 is the document and
//! node 1 is `body`; everything else hangs below `body`. Arena order is
//! document order as long as the tree is built depth first, which is what
//! [`markup`] does.

pub mod markup;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{MediaState, PageError, Result};

pub use markup::{NodeSpec, PageMarkup, ViewportSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const DOCUMENT: NodeId = NodeId(0);
    pub const BODY: NodeId = NodeId(1);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Vertical box of an element in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub top: f64,
    pub height: f64,
}

impl Layout {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    pub text: String,
    style: BTreeMap<String, String>,
    pub layout: Layout,
    pub media: Option<MediaState>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            style: BTreeMap::new(),
            layout: Layout::default(),
            media: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Adds `class` and reports whether it was newly added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    pub fn is_displayed(&self) -> bool {
        self.style("display") != Some("none")
    }

    /// Form controls show translated text as a placeholder, not as content.
    pub fn is_text_input(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }

    pub fn is_media(&self) -> bool {
        matches!(self.tag.as_str(), "audio" | "video")
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Browsing-context state the script reads besides the element tree.
#[derive(Debug, Clone)]
pub struct Window {
    pub width: f64,
    pub height: f64,
    scroll_y: f64,
    pub hidden: bool,
    scroll_requests: Vec<ScrollRequest>,
    preloaded: Vec<String>,
}

impl Window {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            hidden: false,
            scroll_requests: Vec::new(),
            preloaded: Vec::new(),
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn preloaded(&self) -> &[String] {
        &self.preloaded
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
    window: Window,
}

impl Document {
    /// Creates an empty document with a `body` element and the given viewport.
    pub fn new(width: f64, height: f64) -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            ids: HashMap::new(),
            window: Window::new(width, height),
        };
        doc.nodes.push(Node {
            parent: Some(NodeId::DOCUMENT),
            children: Vec::new(),
            kind: NodeKind::Element(Element::new("body")),
        });
        doc.nodes[0].children.push(NodeId::BODY);
        doc
    }

    /// Appends `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Err(PageError::InvalidMarkup(format!(
                "parent node {} does not exist",
                parent.0
            )));
        }
        let id = NodeId(self.nodes.len());
        if let Some(key) = element.id() {
            if self.ids.contains_key(key) {
                return Err(PageError::InvalidMarkup(format!("duplicate id `{key}`")));
            }
            self.ids.insert(key.to_string(), id);
        }
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Element(element),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Document => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Document => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Like [`Document::by_id`] but reports a missing element as an error.
    pub fn require_id(&self, id: &str) -> Result<NodeId> {
        self.by_id(id)
            .ok_or_else(|| PageError::UnknownElement(id.to_string()))
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| match &node.kind {
                NodeKind::Element(element) => Some((NodeId(index), element)),
                NodeKind::Document => None,
            })
    }

    /// Elements matching `predicate`, in document order.
    pub fn select(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.elements()
            .filter(|(_, element)| predicate(element))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.select(|element| element.has_class(class))
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.elements()
            .find(|(_, element)| element.has_class(class))
            .map(|(id, _)| id)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.select(|element| element.tag == tag)
    }

    /// Nearest inclusive ancestor of `id` carrying `class`.
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.ancestors(id)
            .find(|node| self.element(*node).is_some_and(|el| el.has_class(class)))
    }

    /// Inclusive descendant test, `container.contains(node)` in DOM terms.
    pub fn contains(&self, container: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|ancestor| ancestor == container)
    }

    /// `id` followed by its parents up to and including the document node.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = (id.0 < self.nodes.len()).then_some(id);
        std::iter::successors(start, move |node| self.parent(*node))
    }

    /// Height of the laid-out content, never shorter than the viewport.
    pub fn document_height(&self) -> f64 {
        self.elements()
            .map(|(_, element)| element.layout.bottom())
            .fold(self.window.height, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.window.height).max(0.0)
    }

    /// Records a scroll request and moves the viewport. Returns whether the
    /// offset changed, i.e. whether a scroll event is due.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> bool {
        let clamped = top.clamp(0.0, self.max_scroll());
        self.window.scroll_requests.push(ScrollRequest { top, behavior });
        let changed = clamped != self.window.scroll_y;
        self.window.scroll_y = clamped;
        changed
    }

    /// Scrolling by the visitor: moves the viewport without recording a
    /// script request. Returns whether the offset changed.
    pub fn user_scroll(&mut self, top: f64) -> bool {
        let clamped = top.clamp(0.0, self.max_scroll());
        let changed = clamped != self.window.scroll_y;
        self.window.scroll_y = clamped;
        changed
    }

    pub fn preload(&mut self, src: impl Into<String>) {
        self.window.preloaded.push(src.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, id: &str) -> Element {
        let mut element = Element::new(tag);
        element.set_attr("id", id);
        element
    }

    #[test]
    fn tracks_tree_relationships() {
        let mut doc = Document::new(1024.0, 768.0);
        let menu = doc.append(NodeId::BODY, element("div", "menu")).unwrap();
        let item = doc.append(menu, element("a", "item")).unwrap();

        assert_eq!(doc.by_id("item"), Some(item));
        assert!(doc.contains(menu, item));
        assert!(doc.contains(item, item));
        assert!(!doc.contains(item, menu));
        assert_eq!(doc.children(menu), &[item]);
        assert_eq!(
            doc.ancestors(item).collect::<Vec<_>>(),
            vec![item, menu, NodeId::BODY, NodeId::DOCUMENT]
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut doc = Document::new(1024.0, 768.0);
        doc.append(NodeId::BODY, element("div", "a")).unwrap();
        let err = doc.append(NodeId::BODY, element("div", "a")).unwrap_err();
        assert!(format!("{err}").contains("duplicate id `a`"));
    }

    #[test]
    fn class_list_behaves_like_a_set() {
        let mut el = Element::new("DIV");
        assert_eq!(el.tag, "div");
        assert!(el.add_class("active"));
        assert!(!el.add_class("active"));
        assert_eq!(el.classes().len(), 1);
        assert!(!el.toggle_class("active"));
        assert!(el.toggle_class("active"));
        assert!(el.remove_class("active"));
        assert!(!el.remove_class("active"));
    }

    #[test]
    fn closest_walks_up_to_matching_ancestor() {
        let mut doc = Document::new(1024.0, 768.0);
        let mut hero = Element::new("div");
        hero.add_class("hero-background");
        let hero = doc.append(NodeId::BODY, hero).unwrap();
        let video = doc.append(hero, Element::new("video")).unwrap();
        let other = doc.append(NodeId::BODY, Element::new("video")).unwrap();

        assert_eq!(doc.closest_with_class(video, "hero-background"), Some(hero));
        assert_eq!(doc.closest_with_class(other, "hero-background"), None);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut doc = Document::new(1024.0, 500.0);
        let mut tall = Element::new("section");
        tall.layout = Layout {
            top: 0.0,
            height: 2000.0,
        };
        doc.append(NodeId::BODY, tall).unwrap();

        assert!(doc.scroll_to(5000.0, ScrollBehavior::Smooth));
        assert_eq!(doc.window().scroll_y(), 1500.0);
        assert!(!doc.scroll_to(1500.0, ScrollBehavior::Instant));
        assert!(doc.scroll_to(-10.0, ScrollBehavior::Instant));
        assert_eq!(doc.window().scroll_y(), 0.0);
        assert_eq!(doc.window().scroll_requests().len(), 3);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let doc = Document::new(1024.0, 768.0);
        assert!(matches!(
            doc.require_id("ghost"),
            Err(PageError::UnknownElement(id)) if id == "ghost"
        ));
    }
}
