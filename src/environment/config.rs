//! Weather preset and day/night configuration.
//!
//! All configuration is designer-authored data: plain serde-serializable
//! structs with range invariants enforced by `validate` at load time. The
//! random draw queries live here so the transition machines stay free of
//! distribution details.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;

// ---------------------------------------------------------------------------
// Fluctuation parameters
// ---------------------------------------------------------------------------

/// Bounded random-noise parameters shared by the per-element configs and the
/// preset-wide gust envelope.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct FluctuationConfig {
    /// Half-width of the random deviation band, 0-1.
    pub amount: f32,
    /// Shortest hold before a value re-seeds, in seconds.
    pub min_interval: f32,
    /// Longest hold before a value re-seeds, in seconds.
    pub max_interval: f32,
}

impl FluctuationConfig {
    /// Draw a signed offset in `[-amount, +amount]`.
    ///
    /// Always exactly 0 when no fluctuation is configured.
    pub fn offset(&self, rng: &mut impl Rng) -> f32 {
        if self.amount <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-self.amount..=self.amount)
    }

    /// Draw a duration in `[min_interval, max_interval]`.
    ///
    /// An interval pinned to 0 always yields 0, which the transition
    /// machines treat as "stop re-seeding". An inverted interval degenerates
    /// to `min_interval` rather than panicking; [`validate`](Self::validate)
    /// rejects it at load time.
    pub fn interval(&self, rng: &mut impl Rng) -> f32 {
        if self.max_interval <= self.min_interval {
            return self.min_interval;
        }
        rng.gen_range(self.min_interval..=self.max_interval)
    }

    fn validate(&self, what: &str) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.amount) {
            return Err(Error::Config(format!(
                "{what}: fluctuation amount {} outside [0, 1]",
                self.amount
            )));
        }
        if self.min_interval < 0.0 {
            return Err(Error::Config(format!(
                "{what}: negative min fluctuation interval {}",
                self.min_interval
            )));
        }
        if self.max_interval < self.min_interval {
            return Err(Error::Config(format!(
                "{what}: max fluctuation interval {} below min {}",
                self.max_interval, self.min_interval
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-element config
// ---------------------------------------------------------------------------

/// Target intensity and fluctuation parameters for one weather element.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct WeatherElementConfig {
    /// Base target intensity, 0-1. 0 disables the element outright.
    pub intensity: f32,
    /// Random deviation around the base intensity.
    pub fluctuation: FluctuationConfig,
}

impl WeatherElementConfig {
    /// Element pinned to a fixed intensity with no fluctuation.
    pub fn steady(intensity: f32) -> Self {
        Self {
            intensity,
            fluctuation: FluctuationConfig::default(),
        }
    }

    /// Draw a target intensity: the base plus a fluctuation offset, clamped
    /// to [0, 1].
    ///
    /// A base of 0 (or less) is an absolute floor: the draw is exactly 0 no
    /// matter how much fluctuation is configured.
    pub fn random_intensity(&self, rng: &mut impl Rng) -> f32 {
        if self.intensity <= 0.0 {
            return 0.0;
        }
        (self.intensity + self.fluctuation.offset(rng)).clamp(0.0, 1.0)
    }

    fn validate(&self, what: &str) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.intensity) {
            return Err(Error::Config(format!(
                "{what}: intensity {} outside [0, 1]",
                self.intensity
            )));
        }
        self.fluctuation.validate(what)
    }
}

// ---------------------------------------------------------------------------
// Weather preset
// ---------------------------------------------------------------------------

/// Named cloudscape looks a preset can select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudPreset {
    #[default]
    Sparse,
    Cloudy,
    Overcast,
    Stormy,
}

impl CloudPreset {
    /// Stable index for GPU-side consumption.
    pub fn index(self) -> u32 {
        match self {
            CloudPreset::Sparse => 0,
            CloudPreset::Cloudy => 1,
            CloudPreset::Overcast => 2,
            CloudPreset::Stormy => 3,
        }
    }
}

/// A complete weather look: four element configs plus cloud/light parameters
/// and the shared gust envelope, swapped in wholesale via
/// [`set_weather`](crate::environment::EnvironmentSystem::set_weather).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherPreset {
    pub name: String,

    // -- Individual effects --------------------------------------------------
    pub rain: WeatherElementConfig,
    pub hail: WeatherElementConfig,
    pub snow: WeatherElementConfig,
    pub fog: WeatherElementConfig,

    // -- Cloud and light configuration ---------------------------------------
    pub cloud_preset: CloudPreset,
    /// Sun light dimmer, 0-1.
    pub sun_dimmer: f32,
    /// Ambient light dimmer, 0-1.
    pub ambient_dimmer: f32,

    // -- Overall gust envelope ------------------------------------------------
    /// Shared fluctuation layered on top of every element.
    pub fluctuation: FluctuationConfig,
}

impl Default for WeatherPreset {
    fn default() -> Self {
        Self {
            name: "clear".to_string(),
            rain: WeatherElementConfig::default(),
            hail: WeatherElementConfig::default(),
            snow: WeatherElementConfig::default(),
            fog: WeatherElementConfig::default(),
            cloud_preset: CloudPreset::Sparse,
            sun_dimmer: 1.0,
            ambient_dimmer: 1.0,
            fluctuation: FluctuationConfig::default(),
        }
    }
}

impl WeatherPreset {
    /// Check every range invariant, reporting the preset name and offending
    /// field on failure.
    pub fn validate(&self) -> Result<(), Error> {
        self.rain.validate(&format!("preset '{}' rain", self.name))?;
        self.hail.validate(&format!("preset '{}' hail", self.name))?;
        self.snow.validate(&format!("preset '{}' snow", self.name))?;
        self.fog.validate(&format!("preset '{}' fog", self.name))?;
        self.fluctuation
            .validate(&format!("preset '{}' overall fluctuation", self.name))?;
        for (dimmer, field) in [(self.sun_dimmer, "sun_dimmer"), (self.ambient_dimmer, "ambient_dimmer")] {
            if !(0.0..=1.0).contains(&dimmer) {
                return Err(Error::Config(format!(
                    "preset '{}': {field} {dimmer} outside [0, 1]",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Day/night config
// ---------------------------------------------------------------------------

/// Clock constants for the day/night cycle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DayNightConfig {
    /// Scaled seconds that pass per real second.
    pub time_multiplier: f32,
    /// Length of a full day in hours.
    pub hours_per_day: f32,
    /// Hour at which day begins (inclusive).
    pub sunrise_hour: f32,
    /// Hour at which day ends (inclusive).
    pub sunset_hour: f32,
    /// Hour the clock starts at.
    pub start_hour: f32,
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            time_multiplier: 60.0,
            hours_per_day: 24.0,
            sunrise_hour: 6.0,
            sunset_hour: 18.0,
            start_hour: 10.0,
        }
    }
}

impl DayNightConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.hours_per_day > 0.0) {
            return Err(Error::Config(format!(
                "day/night: hours_per_day {} must be positive",
                self.hours_per_day
            )));
        }
        if !(0.0 <= self.sunrise_hour && self.sunrise_hour < self.sunset_hour) {
            return Err(Error::Config(format!(
                "day/night: sunrise {} must precede sunset {}",
                self.sunrise_hour, self.sunset_hour
            )));
        }
        if self.sunset_hour > self.hours_per_day {
            return Err(Error::Config(format!(
                "day/night: sunset {} past end of day {}",
                self.sunset_hour, self.hours_per_day
            )));
        }
        if self.sunset_hour - self.sunrise_hour >= self.hours_per_day {
            return Err(Error::Config(
                "day/night: day span leaves no night".to_string(),
            ));
        }
        if self.time_multiplier < 0.0 {
            return Err(Error::Config(format!(
                "day/night: negative time_multiplier {}",
                self.time_multiplier
            )));
        }
        if !(0.0..=self.hours_per_day).contains(&self.start_hour) {
            return Err(Error::Config(format!(
                "day/night: start_hour {} outside [0, {}]",
                self.start_hour, self.hours_per_day
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fog distance config
// ---------------------------------------------------------------------------

/// Maps fog intensity onto a fog attenuation distance for the renderer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FogDistanceConfig {
    /// Attenuation distance at full fog, in world units.
    pub min_attenuation: f32,
    /// Attenuation distance with no fog, in world units.
    pub max_attenuation: f32,
}

impl Default for FogDistanceConfig {
    fn default() -> Self {
        Self {
            min_attenuation: 10.0,
            max_attenuation: 50.0,
        }
    }
}

impl FogDistanceConfig {
    /// Attenuation distance for a fog intensity: denser fog pulls the
    /// distance from `max_attenuation` down toward `min_attenuation`.
    pub fn attenuation_for(&self, fog_intensity: f32) -> f32 {
        let t = fog_intensity.clamp(0.0, 1.0);
        self.max_attenuation + (self.min_attenuation - self.max_attenuation) * t
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min_attenuation > 0.0) {
            return Err(Error::Config(format!(
                "fog: min_attenuation {} must be positive",
                self.min_attenuation
            )));
        }
        if self.max_attenuation < self.min_attenuation {
            return Err(Error::Config(format!(
                "fog: max_attenuation {} below min_attenuation {}",
                self.max_attenuation, self.min_attenuation
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full environment configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub day_night: DayNightConfig,
    pub fog: FogDistanceConfig,
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<(), Error> {
        self.day_night.validate()?;
        self.fog.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
