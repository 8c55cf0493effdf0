//! Engine configuration.
//!
//! Settings are serializable so they can be loaded from JSON (or TOML with the
//! `toml` feature). The Earth radius is not configurable; see
//! [`crate::compute::geo::EARTH_RADIUS_M`].
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// How a negative search radius is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeRadiusPolicy {
    /// Fail with `InvalidGeoParameter` (client error)
    #[default]
    Reject,
    /// Accept the request and match nothing
    Empty,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Keep the built activity hierarchy across queries. The cached index is
    /// rebuilt whenever the activity snapshot's structure changes.
    #[serde(default = "Config::default_cache_hierarchy")]
    pub cache_hierarchy: bool,

    #[serde(default)]
    pub negative_radius: NegativeRadiusPolicy,

    /// Upper bound on a requested radius in meters. `None` means unbounded.
    #[serde(default)]
    pub max_radius_m: Option<f64>,
}

impl Config {
    const fn default_cache_hierarchy() -> bool {
        true
    }

    pub fn with_cache_hierarchy(mut self, enabled: bool) -> Self {
        self.cache_hierarchy = enabled;
        self
    }

    pub fn with_negative_radius(mut self, policy: NegativeRadiusPolicy) -> Self {
        self.negative_radius = policy;
        self
    }

    pub fn with_max_radius(mut self, meters: f64) -> Self {
        assert!(
            meters.is_finite() && meters >= 0.0,
            "Max radius must be a finite, non-negative number of meters"
        );

        if meters > crate::compute::geo::HALF_CIRCUMFERENCE_M {
            log::warn!(
                "Max radius of {} m exceeds half the Earth's circumference and never limits a search",
                meters
            );
        }

        self.max_radius_m = Some(meters);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_radius_m
            && !(max.is_finite() && max >= 0.0)
        {
            return Err(format!(
                "max_radius_m must be a finite, non-negative number, got {}",
                max
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_hierarchy: Self::default_cache_hierarchy(),
            negative_radius: NegativeRadiusPolicy::default(),
            max_radius_m: None,
        }
    }
}
