//! Layout configuration
//!
//! Supplied by JavaScript at load time. Every field has a default, so an
//! empty object (or no config at all) yields the standard layout.

use crate::text::SpacingOptions;
use serde::{Deserialize, Serialize};

/// Configuration for layout calculations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Vertical distance reserved per link lane (pixels)
    pub link_gap: f32,

    /// Extent reserved by a line that carries no links (pixels)
    pub min_line_extent: f32,

    /// Columns kept free after a non-empty annotation label
    pub label_padding: usize,

    /// Character inserted as label spacing
    pub padding_char: char,

    /// Minimum time between resize-triggered relayouts (milliseconds)
    pub resize_throttle_ms: f64,
}

impl LayoutConfig {
    pub fn spacing_options(&self) -> SpacingOptions {
        SpacingOptions {
            label_padding: self.label_padding,
            padding_char: self.padding_char,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_gap: 8.0,
            min_line_extent: 0.0,
            label_padding: 1,
            padding_char: ' ',
            resize_throttle_ms: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"linkGap": 12}"#).unwrap();
        assert_eq!(config.link_gap, 12.0);
        assert_eq!(config.label_padding, 1);
        assert_eq!(config.resize_throttle_ms, 100.0);

        let empty: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LayoutConfig::default());
    }
}
