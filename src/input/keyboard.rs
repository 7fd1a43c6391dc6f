use serde::{Deserialize, Serialize};

use crate::options::KeybindingOptions;

/// Player-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_pause = "p"
/// reset = "r"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    /// Begin playback (or replay after completion).
    Start,
    /// Pause or resume a running playback.
    TogglePause,
    /// Stop playback and restack every disk on the source tower.
    Reset,
    /// Shorten the per-move duration by one step.
    Faster,
    /// Lengthen the per-move duration by one step.
    Slower,
    /// Leave the player.
    Quit,
}

impl ControlAction {
    /// All actions, in help-text order.
    pub const ALL: [Self; 6] = [
        Self::Start,
        Self::TogglePause,
        Self::Reset,
        Self::Faster,
        Self::Slower,
        Self::Quit,
    ];

    /// Short description for help text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::TogglePause => "pause/resume",
            Self::Reset => "reset",
            Self::Faster => "faster",
            Self::Slower => "slower",
            Self::Quit => "quit",
        }
    }
}

/// Resolve a typed key (one line of input, surrounding newline stripped)
/// to its bound action.
///
/// An exact match wins so bindings such as `" "` work; otherwise the input
/// is trimmed and matched again.
#[must_use]
pub fn resolve_key(
    bindings: &KeybindingOptions,
    input: &str,
) -> Option<ControlAction> {
    let input = input.trim_end_matches(['\r', '\n']);
    bindings
        .lookup(input)
        .or_else(|| bindings.lookup(input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_bindings() {
        let bindings = KeybindingOptions::default();
        assert_eq!(resolve_key(&bindings, "p\n"), Some(ControlAction::TogglePause));
        assert_eq!(resolve_key(&bindings, "  r  "), Some(ControlAction::Reset));
        assert_eq!(resolve_key(&bindings, "+\r\n"), Some(ControlAction::Faster));
        assert_eq!(resolve_key(&bindings, "x"), None);
        assert_eq!(resolve_key(&bindings, ""), None);
    }

    #[test]
    fn every_action_has_a_default_key() {
        let bindings = KeybindingOptions::default();
        for action in ControlAction::ALL {
            assert!(bindings.key_for(action).is_some(), "{action:?}");
        }
    }
}
