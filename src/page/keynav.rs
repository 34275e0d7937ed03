use tracing::{debug, info};

use super::events::KeyEvent;

/// Follows the n-th registered link when digit key n is typed.
#[derive(Debug, Default, Clone)]
pub struct KeynavController {
    links: Vec<String>,
}

impl KeynavController {
    pub fn new<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links: Vec<String> = links.into_iter().map(Into::into).collect();
        info!("Keynav controller connected with {} links", links.len());
        Self { links }
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Returns the link to click for this key, if any.
    pub fn follow(&self, event: &KeyEvent) -> Option<&str> {
        if event.from_text_field() {
            debug!("Digit typed from an INPUT field or TEXTAREA! Navigation prevented!");
            return None;
        }

        let number = digit_of(&event.code)?;
        info!("Typed the key {}. Navigating...", event.code);
        self.links.get(number - 1).map(String::as_str)
    }
}

/// `Digit1`..`Digit9` and `Numpad1`..`Numpad9` map to 1..=9.
fn digit_of(code: &str) -> Option<usize> {
    let rest = code.strip_prefix("Digit").or_else(|| code.strip_prefix("Numpad"))?;
    match rest.parse::<usize>() {
        Ok(n) if (1..=9).contains(&n) && rest.len() == 1 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> KeynavController {
        KeynavController::new(["#about", "#portfolio", "#quiz"])
    }

    #[test]
    fn digits_follow_links_in_order() {
        let nav = nav();
        assert_eq!(nav.follow(&KeyEvent::new("Digit1", "body")), Some("#about"));
        assert_eq!(nav.follow(&KeyEvent::new("Numpad3", "div")), Some("#quiz"));
    }

    #[test]
    fn missing_links_and_other_keys_are_ignored() {
        let nav = nav();
        assert_eq!(nav.follow(&KeyEvent::new("Digit4", "body")), None);
        assert_eq!(nav.follow(&KeyEvent::new("Digit0", "body")), None);
        assert_eq!(nav.follow(&KeyEvent::new("KeyA", "body")), None);
        assert_eq!(nav.follow(&KeyEvent::new("NumpadAdd", "body")), None);
    }

    #[test]
    fn typing_in_text_fields_does_not_navigate() {
        let nav = nav();
        assert_eq!(nav.follow(&KeyEvent::new("Digit1", "input")), None);
        assert_eq!(nav.follow(&KeyEvent::new("Digit2", "TEXTAREA")), None);
    }
}
