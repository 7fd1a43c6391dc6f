use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::ControlAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Configurable key bindings mapping control actions to key strings.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `TogglePause` → `"p"`).
    pub bindings: HashMap<ControlAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, ControlAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (ControlAction::Start, "s".into()),
            (ControlAction::TogglePause, "p".into()),
            (ControlAction::Reset, "r".into()),
            (ControlAction::Faster, "+".into()),
            (ControlAction::Slower, "-".into()),
            (ControlAction::Quit, "q".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for KeybindingOptions {}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ControlAction> {
        self.key_to_action.get(key).copied()
    }

    /// Key bound to an action, if any.
    #[must_use]
    pub fn key_for(&self, action: ControlAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }
}
