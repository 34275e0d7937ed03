use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    Over,
    Out,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub alt_key: bool,
    pub target: ElementId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Physical key code, e.g. `Digit3` or `Numpad3`.
    pub code: String,
    /// Lower-case node name of the element that received the key.
    pub target_node: String,
}

impl KeyEvent {
    pub fn new(code: impl Into<String>, target_node: impl Into<String>) -> Self {
        Self { code: code.into(), target_node: target_node.into() }
    }

    /// True when the key was typed into a text field.
    pub fn from_text_field(&self) -> bool {
        let node = self.target_node.to_ascii_lowercase();
        node == "input" || node == "textarea"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum ClassChange {
    Add { target: ElementId, class: String },
    Remove { target: ElementId, class: String },
}
