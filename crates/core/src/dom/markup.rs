use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use super::{Document, Element, Layout, NodeId};
use crate::{AutoplayPolicy, MediaState, PageError, Result};

/// Serialisable description of a page: viewport plus the tree under `body`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMarkup {
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default)]
    pub body: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    /// Overrides the configured autoplay policy for `audio`/`video`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<AutoplayPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn autoplay(mut self, policy: AutoplayPolicy) -> Self {
        self.autoplay = Some(policy);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    fn to_element(&self, default_policy: AutoplayPolicy) -> Element {
        let mut element = Element::new(&self.tag);
        for (name, value) in &self.attrs {
            element.set_attr(name, value);
        }
        if let Some(id) = &self.id {
            element.set_attr("id", id);
        }
        for class in &self.classes {
            element.add_class(class);
        }
        element.text = self.text.clone();
        element.layout = Layout {
            top: self.top,
            height: self.height,
        };
        if element.is_media() {
            let policy = self.autoplay.unwrap_or(default_policy);
            element.media = Some(MediaState::new(policy, element.has_attr("muted")));
        }
        element
    }
}

impl PageMarkup {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Builds the document tree. `default_policy` applies to media nodes that
    /// do not carry their own autoplay policy.
    pub fn build(&self, default_policy: AutoplayPolicy) -> Result<Document> {
        let ViewportSpec { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(PageError::InvalidMarkup(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }

        let mut doc = Document::new(width, height);
        for spec in &self.body {
            append_tree(&mut doc, NodeId::BODY, spec, default_policy)?;
        }
        Ok(doc)
    }
}

fn append_tree(
    doc: &mut Document,
    parent: NodeId,
    spec: &NodeSpec,
    default_policy: AutoplayPolicy,
) -> Result<NodeId> {
    if spec.tag.trim().is_empty() {
        return Err(PageError::InvalidMarkup("element without a tag".into()));
    }
    let id = doc.append(parent, spec.to_element(default_policy))?;
    for child in &spec.children {
        append_tree(doc, id, child, default_policy)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_depth_first_in_document_order() {
        let markup = PageMarkup {
            viewport: ViewportSpec::default(),
            body: vec![
                NodeSpec::new("nav")
                    .id("navbar")
                    .child(NodeSpec::new("a").class("nav-item")),
                NodeSpec::new("section").id("bio").class("section"),
            ],
        };
        let doc = markup.build(AutoplayPolicy::Allowed).unwrap();

        let navbar = doc.by_id("navbar").unwrap();
        let link = doc.first_by_class("nav-item").unwrap();
        let bio = doc.by_id("bio").unwrap();
        assert!(navbar < link && link < bio);
        assert_eq!(doc.parent(link), Some(navbar));
    }

    #[test]
    fn media_nodes_get_playback_state() {
        let markup = PageMarkup {
            viewport: ViewportSpec::default(),
            body: vec![
                NodeSpec::new("audio").id("music"),
                NodeSpec::new("video")
                    .id("clip")
                    .attr("muted", "")
                    .autoplay(AutoplayPolicy::Blocked),
            ],
        };
        let doc = markup.build(AutoplayPolicy::Allowed).unwrap();

        let music = doc.element(doc.by_id("music").unwrap()).unwrap();
        let media = music.media.as_ref().unwrap();
        assert_eq!(media.autoplay, AutoplayPolicy::Allowed);
        assert!(!media.muted);

        let clip = doc.element(doc.by_id("clip").unwrap()).unwrap();
        let media = clip.media.as_ref().unwrap();
        assert_eq!(media.autoplay, AutoplayPolicy::Blocked);
        assert!(media.muted);
    }

    #[test]
    fn parses_json_markup() {
        let json = r#"{
            "viewport": {"width": 375, "height": 667},
            "body": [{"tag": "img", "attrs": {"src": "photo.jpg", "alt": "Portrait"}, "top": 100, "height": 300}]
        }"#;
        let markup: PageMarkup = serde_json::from_str(json).unwrap();
        let doc = markup.build(AutoplayPolicy::default()).unwrap();
        let img = doc.by_tag("img")[0];
        assert_eq!(doc.element(img).unwrap().attr("alt"), Some("Portrait"));
        assert_eq!(doc.window().width, 375.0);
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let markup = PageMarkup {
            viewport: ViewportSpec {
                width: 0.0,
                height: 600.0,
            },
            body: Vec::new(),
        };
        assert!(matches!(
            markup.build(AutoplayPolicy::default()),
            Err(PageError::InvalidMarkup(_))
        ));
    }
}
