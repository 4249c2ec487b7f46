use crate::dom::{Document, NodeId};

/// The intersection observers the page registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Plays non-hero videos while they are on screen.
    VideoAutoplay,
    /// One-shot reveal animation for content sections.
    Reveal,
    /// One-shot "loaded" marking for images.
    LazyImage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    /// Added to the bottom edge of the viewport; negative values shrink it.
    pub bottom_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[derive(Debug)]
struct Observer {
    kind: ObserverKind,
    options: ObserverOptions,
    /// Observed targets with the last state delivered, `None` until the
    /// initial entry has gone out.
    targets: Vec<(NodeId, Option<bool>)>,
}

#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: Vec<Observer>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ObserverKind, options: ObserverOptions) {
        match self.observers.iter_mut().find(|o| o.kind == kind) {
            Some(existing) => existing.options = options,
            None => self.observers.push(Observer {
                kind,
                options,
                targets: Vec::new(),
            }),
        }
    }

    pub fn observe(&mut self, kind: ObserverKind, target: NodeId) {
        if let Some(observer) = self.find_mut(kind) {
            if !observer.targets.iter().any(|(node, _)| *node == target) {
                observer.targets.push((target, None));
            }
        }
    }

    pub fn unobserve(&mut self, kind: ObserverKind, target: NodeId) {
        if let Some(observer) = self.find_mut(kind) {
            observer.targets.retain(|(node, _)| *node != target);
        }
    }

    pub fn is_observing(&self, kind: ObserverKind, target: NodeId) -> bool {
        self.observers
            .iter()
            .filter(|o| o.kind == kind)
            .any(|o| o.targets.iter().any(|(node, _)| *node == target))
    }

    pub fn observed_count(&self, kind: ObserverKind) -> usize {
        self.observers
            .iter()
            .filter(|o| o.kind == kind)
            .map(|o| o.targets.len())
            .sum()
    }

    /// Evaluates every target against the current viewport and returns the
    /// entries whose intersecting state changed since the last delivery.
    pub fn take_entries(&mut self, doc: &Document) -> Vec<(ObserverKind, IntersectionEntry)> {
        let mut entries = Vec::new();
        for observer in &mut self.observers {
            let options = observer.options;
            for (target, last) in &mut observer.targets {
                let entry = measure(doc, *target, options);
                if *last != Some(entry.is_intersecting) {
                    *last = Some(entry.is_intersecting);
                    entries.push((observer.kind, entry));
                }
            }
        }
        entries
    }

    fn find_mut(&mut self, kind: ObserverKind) -> Option<&mut Observer> {
        self.observers.iter_mut().find(|o| o.kind == kind)
    }
}

fn is_rendered(doc: &Document, target: NodeId) -> bool {
    doc.ancestors(target)
        .filter_map(|node| doc.element(node))
        .all(|element| element.is_displayed())
}

/// Computes the intersection of `target` with the viewport.
pub fn measure(doc: &Document, target: NodeId, options: ObserverOptions) -> IntersectionEntry {
    let hidden = IntersectionEntry {
        target,
        is_intersecting: false,
        ratio: 0.0,
    };
    let Some(element) = doc.element(target) else {
        return hidden;
    };
    if !is_rendered(doc, target) {
        return hidden;
    }

    let window = doc.window();
    let view_top = window.scroll_y();
    let view_bottom = view_top + window.height + options.bottom_margin;
    let layout = element.layout;

    let (overlap, ratio) = if layout.height <= 0.0 {
        let inside = layout.top >= view_top && layout.top <= view_bottom;
        (inside, if inside { 1.0 } else { 0.0 })
    } else {
        let visible = (layout.bottom().min(view_bottom) - layout.top.max(view_top)).max(0.0);
        (visible > 0.0, visible / layout.height)
    };

    let is_intersecting = if options.threshold <= 0.0 {
        overlap
    } else {
        ratio >= options.threshold
    };

    IntersectionEntry {
        target,
        is_intersecting,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Layout, ScrollBehavior};

    const HALF: ObserverOptions = ObserverOptions {
        threshold: 0.5,
        bottom_margin: 0.0,
    };

    fn page_with_box(top: f64, height: f64) -> (Document, NodeId) {
        let mut doc = Document::new(800.0, 600.0);
        let mut filler = Element::new("div");
        filler.layout = Layout {
            top: 0.0,
            height: 5000.0,
        };
        doc.append(NodeId::BODY, filler).unwrap();
        let mut target = Element::new("section");
        target.layout = Layout { top, height };
        let target = doc.append(NodeId::BODY, target).unwrap();
        (doc, target)
    }

    #[test]
    fn ratio_reflects_visible_fraction() {
        let (doc, target) = page_with_box(400.0, 400.0);
        let entry = measure(&doc, target, HALF);
        assert_eq!(entry.ratio, 0.5);
        assert!(entry.is_intersecting);
    }

    #[test]
    fn bottom_margin_shrinks_the_viewport() {
        let (doc, target) = page_with_box(580.0, 100.0);
        let options = ObserverOptions {
            threshold: 0.0,
            bottom_margin: -50.0,
        };
        assert!(!measure(&doc, target, options).is_intersecting);
        assert!(measure(&doc, target, ObserverOptions { bottom_margin: 0.0, ..options }).is_intersecting);
    }

    #[test]
    fn hidden_elements_never_intersect() {
        let (mut doc, target) = page_with_box(0.0, 100.0);
        doc.element_mut(target).unwrap().set_style("display", "none");
        assert!(!measure(&doc, target, HALF).is_intersecting);
    }

    #[test]
    fn delivers_initial_entry_then_only_changes() {
        let (mut doc, target) = page_with_box(1000.0, 200.0);
        let mut registry = ObserverRegistry::new();
        registry.register(ObserverKind::Reveal, HALF);
        registry.observe(ObserverKind::Reveal, target);

        let first = registry.take_entries(&doc);
        assert_eq!(first.len(), 1);
        assert!(!first[0].1.is_intersecting);
        assert!(registry.take_entries(&doc).is_empty());

        doc.scroll_to(900.0, ScrollBehavior::Instant);
        let entered = registry.take_entries(&doc);
        assert_eq!(entered.len(), 1);
        assert!(entered[0].1.is_intersecting);

        registry.unobserve(ObserverKind::Reveal, target);
        doc.scroll_to(0.0, ScrollBehavior::Instant);
        assert!(registry.take_entries(&doc).is_empty());
        assert!(!registry.is_observing(ObserverKind::Reveal, target));
    }

    #[test]
    fn observing_requires_registration() {
        let (_, target) = page_with_box(0.0, 10.0);
        let mut registry = ObserverRegistry::new();
        registry.observe(ObserverKind::LazyImage, target);
        assert_eq!(registry.observed_count(ObserverKind::LazyImage), 0);
    }
}
