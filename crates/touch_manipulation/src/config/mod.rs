//! Configuration system
//!
//! [`ManipulationConfig`] carries the tuning knobs of the gesture pipeline.
//! Any type implementing [`Config`] can be loaded from or saved to TOML and
//! RON files.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its accepted range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// # Manipulation Configuration
///
/// Tuning for how strongly and how smoothly gestures drive the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Position blend speed toward the target, per second
    pub transform_speed: f32,
    /// Gain applied to the single-finger pan displacement
    pub pan_transform_speed: f32,
    /// Depth travelled per unit of remapped pinch ratio
    pub scale_gesture_distance: f32,
    /// Multiplier on `transform_speed` for rotation blending
    pub rotation_smoothing_factor: f32,
    /// Seconds over which responsiveness fades after a gesture starts
    pub transform_decay_time: f32,
    /// Whether a two-finger twist may roll the target
    pub allow_roll_gesture: bool,
    /// Passed to `TouchInput::with_debug_contacts` to trace contacts every frame
    pub debug_contacts: bool,
}

impl ManipulationConfig {
    /// Create a configuration with default tuning
    pub fn new() -> Self {
        Self {
            transform_speed: 10.0,
            pan_transform_speed: 10.0,
            scale_gesture_distance: 1.0,
            rotation_smoothing_factor: 0.1,
            transform_decay_time: 2.0,
            allow_roll_gesture: true,
            debug_contacts: false,
        }
    }

    /// Set position blend speed
    pub fn with_transform_speed(mut self, speed: f32) -> Self {
        self.transform_speed = speed;
        self
    }

    /// Set single-finger pan gain
    pub fn with_pan_transform_speed(mut self, speed: f32) -> Self {
        self.pan_transform_speed = speed;
        self
    }

    /// Set pinch dolly distance
    pub fn with_scale_gesture_distance(mut self, distance: f32) -> Self {
        self.scale_gesture_distance = distance;
        self
    }

    /// Set rotation smoothing factor
    pub fn with_rotation_smoothing_factor(mut self, factor: f32) -> Self {
        self.rotation_smoothing_factor = factor;
        self
    }

    /// Set decay duration in seconds
    pub fn with_transform_decay_time(mut self, seconds: f32) -> Self {
        self.transform_decay_time = seconds;
        self
    }

    /// Enable or disable the roll gesture
    pub fn with_roll_gesture(mut self, enabled: bool) -> Self {
        self.allow_roll_gesture = enabled;
        self
    }

    /// Enable or disable per-frame contact tracing
    pub fn with_debug_contacts(mut self, enabled: bool) -> Self {
        self.debug_contacts = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("transform_speed", self.transform_speed),
            ("rotation_smoothing_factor", self.rotation_smoothing_factor),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        // Pan gain and dolly distance may be negative to invert the gesture
        let finite = [
            ("pan_transform_speed", self.pan_transform_speed),
            ("scale_gesture_distance", self.scale_gesture_distance),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }

        if !self.transform_decay_time.is_finite() || self.transform_decay_time <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "transform_decay_time",
                reason: format!("must be a positive duration, got {}", self.transform_decay_time),
            });
        }

        Ok(())
    }
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ManipulationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManipulationConfig::default();

        assert_eq!(config.transform_speed, 10.0);
        assert_eq!(config.pan_transform_speed, 10.0);
        assert_eq!(config.scale_gesture_distance, 1.0);
        assert_eq!(config.rotation_smoothing_factor, 0.1);
        assert_eq!(config.transform_decay_time, 2.0);
        assert!(config.allow_roll_gesture);
        assert!(!config.debug_contacts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_decay() {
        let config = ManipulationConfig::default().with_transform_decay_time(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "transform_decay_time", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = ManipulationConfig::default().with_transform_speed(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "transform_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_pan_speed() {
        let config = ManipulationConfig::default().with_pan_transform_speed(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ManipulationConfig =
            toml::from_str("allow_roll_gesture = false\ntransform_decay_time = 3.5\n")
                .expect("valid toml");

        assert!(!config.allow_roll_gesture);
        assert_eq!(config.transform_decay_time, 3.5);
        assert_eq!(config.transform_speed, 10.0);
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = std::env::temp_dir().join("touch_manipulation_config_test.ron");
        let path = path.to_string_lossy().to_string();

        let config = ManipulationConfig::default().with_scale_gesture_distance(2.5);
        config.save_to_file(&path).expect("save ron");
        let loaded = ManipulationConfig::load_from_file(&path).expect("load ron");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ManipulationConfig::default().save_to_file("config.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
