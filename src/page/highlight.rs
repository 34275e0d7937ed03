use std::collections::HashSet;
use tracing::debug;

use super::events::{ClassChange, ElementId, MouseEvent, MouseEventKind};

/// Must exist in the page's main stylesheet.
pub const HIGHLIGHT_CLASS: &str = "div_highlighted";

/// Highlights a div while the pointer is over it with Alt held down.
#[derive(Debug, Default)]
pub struct DivHighlighter {
    highlighted: HashSet<ElementId>,
}

impl DivHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_highlighted(&self, id: &ElementId) -> bool {
        self.highlighted.contains(id)
    }

    pub fn handle(&mut self, event: &MouseEvent) -> Option<ClassChange> {
        match event.kind {
            MouseEventKind::Over if event.alt_key => {
                self.highlighted.insert(event.target.clone());
                debug!(element = %event.target.0, "highlight on");
                Some(ClassChange::Add { target: event.target.clone(), class: HIGHLIGHT_CLASS.into() })
            }
            MouseEventKind::Over => None,
            MouseEventKind::Out => {
                self.highlighted.remove(&event.target);
                Some(ClassChange::Remove { target: event.target.clone(), class: HIGHLIGHT_CLASS.into() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, alt_key: bool, target: &str) -> MouseEvent {
        MouseEvent { kind, alt_key, target: target.into() }
    }

    #[test]
    fn alt_hover_adds_and_leaving_removes() {
        let mut h = DivHighlighter::new();
        let about: ElementId = "about".into();

        let change = h.handle(&mouse(MouseEventKind::Over, true, "about"));
        assert_eq!(change, Some(ClassChange::Add { target: about.clone(), class: HIGHLIGHT_CLASS.into() }));
        assert!(h.is_highlighted(&about));

        let change = h.handle(&mouse(MouseEventKind::Out, false, "about"));
        assert_eq!(change, Some(ClassChange::Remove { target: about.clone(), class: HIGHLIGHT_CLASS.into() }));
        assert!(!h.is_highlighted(&about));
    }

    #[test]
    fn plain_hover_does_nothing() {
        let mut h = DivHighlighter::new();
        assert_eq!(h.handle(&mouse(MouseEventKind::Over, false, "skills")), None);
        assert!(!h.is_highlighted(&"skills".into()));
    }
}
