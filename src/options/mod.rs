//! Centralized playback/layout options with TOML preset support.
//!
//! All tweakable settings (disk count, speed, animation resolution, drawing
//! area, keybindings) are consolidated here. Options serialize to/from TOML
//! so a player can keep named presets in a directory.

mod keybindings;
mod layout;
mod playback;

use std::path::Path;

pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
pub use playback::{
    speed_duration, step_speed, validate_disk_count, validate_speed,
    PlaybackOptions,
    MAX_DISKS, MAX_UI_SPEED_SECS, MIN_DISKS, MIN_UI_SPEED_SECS,
    SPEED_STEP_SECS,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HanoiError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Solve and animation parameters.
    pub playback: PlaybackOptions,
    /// Drawing area dimensions.
    pub layout: LayoutOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, HanoiError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| HanoiError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::Io`] if the file cannot be read and
    /// [`HanoiError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, HanoiError> {
        let content = std::fs::read_to_string(path).map_err(HanoiError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::OptionsParse`] if serialization fails and
    /// [`HanoiError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), HanoiError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HanoiError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HanoiError::Io)?;
        }
        std::fs::write(path, content).map_err(HanoiError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] for the first value out
    /// of range.
    pub fn validate(&self) -> Result<(), HanoiError> {
        self.playback.validate()?;
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ControlAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[playback]
disk_count = 7
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.playback.disk_count, 7);
        // Everything else should be default
        assert_eq!(opts.playback.speed_secs, 0.5);
        assert_eq!(opts.playback.frame_count, 30);
        assert_eq!(opts.layout, LayoutOptions::default());
        assert_eq!(opts.keybindings.lookup("p"), Some(ControlAction::TogglePause));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml_str("[playback\n").unwrap_err();
        assert!(matches!(err, HanoiError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("s"), Some(ControlAction::Start));
        assert_eq!(opts.keybindings.lookup("q"), Some(ControlAction::Quit));
        assert_eq!(opts.keybindings.lookup("z"), None);
        assert_eq!(opts.keybindings.key_for(ControlAction::Reset), Some("r"));
    }

    #[test]
    fn rebound_key_survives_load() {
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = " "
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup(" "), Some(ControlAction::TogglePause));
        assert_eq!(opts.keybindings.lookup("s"), None);
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let mut opts = Options::default();
        assert!(opts.validate().is_ok());
        opts.playback.disk_count = 11;
        assert!(opts.validate().is_err());
        opts.playback.disk_count = 3;
        opts.layout.width = 0.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn save_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("hanoi-viz-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.playback.disk_count = 5;
        opts.save(&dir.join("five.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["default", "five"]);
        let loaded = Options::load(&dir.join("five.toml")).unwrap();
        assert_eq!(loaded.playback.disk_count, 5);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("playback"));
        assert!(props.contains_key("layout"));
        assert!(!props.contains_key("keybindings"));

        let playback = &props["playback"]["properties"];
        assert!(playback.get("disk_count").is_some());
        assert!(playback.get("speed_secs").is_some());
        assert!(playback.get("frame_count").is_none());
    }
}
