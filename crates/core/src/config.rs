use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{ChannelOrder, PackedColor, Vec4};
use crate::settings::Settings;

/// Internal identifier the filter type is registered under.
pub const FILTER_ID: &str = "subsampling_detector";
pub const FILTER_NAME: &str = "Subsampling Detector";

/// Effect file shipped in the plugin's data directory.
pub const EFFECT_FILE: &str = "subsampling-detector.effect";

pub const PARAM_TEXTURE_WIDTH: &str = "texture_width";
pub const PARAM_TEXTURE_HEIGHT: &str = "texture_height";
pub const PARAM_COLOR: &str = "color";

pub const COLOR_KEY: &str = "color";
pub const COLOR_LABEL: &str = "Color";

/// Opaque red.
pub const DEFAULT_COLOR: u32 = 0xFF00_00FF;

pub const DEFAULT_LOCALE: &str = "en-US";

/// Typed view of the filter's settings bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_color")]
    pub color: u32,
}

fn default_color() -> u32 {
    DEFAULT_COLOR
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
        }
    }
}

impl FilterSettings {
    /// Read the settings, falling back to defaults for absent keys.
    pub fn read<S: Settings + ?Sized>(settings: &S) -> Self {
        let mut values = Map::new();
        if let Some(color) = settings.int(COLOR_KEY) {
            // Truncation to the low 32 bits matches how the host stores colors.
            values.insert(COLOR_KEY.to_owned(), Value::from(color as u32));
        }
        serde_json::from_value(Value::Object(values)).unwrap_or_default()
    }

    /// Register defaults without touching values the user already set.
    pub fn apply_defaults<S: Settings + ?Sized>(settings: &mut S) {
        let Ok(Value::Object(defaults)) = serde_json::to_value(Self::default()) else {
            return;
        };
        for (key, value) in &defaults {
            if let Some(value) = value.as_i64() {
                settings.set_default_int(key, value);
            }
        }
    }

    pub fn reference_color(&self) -> Vec4 {
        PackedColor(self.color).to_vec4(ChannelOrder::Obs)
    }
}
