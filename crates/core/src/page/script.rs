use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One scripted user or browser action, as read from a replay file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    Click { id: String },
    /// Click on empty page background.
    ClickBody,
    Scroll { y: f64 },
    Key { key: String },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Swipe { from: f64, to: f64 },
    Hide,
    Show,
    /// The element's resource fails to load.
    Fail { id: String },
    Frame,
    Resize { width: f64, height: f64 },
}

impl Action {
    /// Reads a JSON array of actions.
    pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Action>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_actions() {
        let json = r#"[
            {"action": "click", "id": "langToggle"},
            {"action": "click-body"},
            {"action": "scroll", "y": 420},
            {"action": "swipe", "from": 400, "to": 300},
            {"action": "hide"}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Click {
                    id: "langToggle".into()
                },
                Action::ClickBody,
                Action::Scroll { y: 420.0 },
                Action::Swipe {
                    from: 400.0,
                    to: 300.0
                },
                Action::Hide,
            ]
        );
    }

    #[test]
    fn rejects_unknown_actions() {
        let result: std::result::Result<Vec<Action>, _> =
            serde_json::from_str(r#"[{"action": "teleport"}]"#);
        assert!(result.is_err());
    }
}
