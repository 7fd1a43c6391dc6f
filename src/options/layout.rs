use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HanoiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Size of the drawing area the scene geometry is laid out in.
pub struct LayoutOptions {
    /// Drawing area width in layout units.
    #[schemars(title = "Width", range(min = 50.0, max = 4000.0))]
    pub width: f32,
    /// Drawing area height in layout units.
    #[schemars(title = "Height", range(min = 50.0, max = 4000.0))]
    pub height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 1160.0,
            height: 480.0,
        }
    }
}

impl LayoutOptions {
    /// Check that both dimensions are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidConfiguration`] otherwise.
    pub fn validate(&self) -> Result<(), HanoiError> {
        for (name, value) in [("width", self.width), ("height", self.height)]
        {
            if !value.is_finite() || value <= 0.0 {
                return Err(HanoiError::InvalidConfiguration(format!(
                    "layout {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
