//! Weather controller: preset switching and per-tick blending.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::environment::config::{CloudPreset, WeatherPreset};
use crate::environment::transition::{ElementTransition, FluctuationEnvelope};

/// Default RNG seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Renderer-facing parameters of the active preset. These change only on a
/// preset switch, never per tick.
#[derive(Clone, Debug)]
pub struct PresetVisuals {
    pub name: String,
    pub cloud_preset: CloudPreset,
    pub sun_dimmer: f32,
    pub ambient_dimmer: f32,
}

/// Clamped per-element intensities produced by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeatherSample {
    pub rain: f32,
    pub hail: f32,
    pub snow: f32,
    pub fog: f32,
}

/// Blends weather presets into smoothly evolving element intensities.
///
/// Owns one [`ElementTransition`] per element plus the shared gust
/// [`FluctuationEnvelope`] and a deterministic RNG; every published scalar
/// is `clamp01(envelope + element)`. All randomness flows through the seeded
/// RNG so identical seeds produce identical weather.
pub struct WeatherSystem {
    rng: ChaCha8Rng,
    rain: ElementTransition,
    hail: ElementTransition,
    snow: ElementTransition,
    fog: ElementTransition,
    envelope: FluctuationEnvelope,
    active: Option<PresetVisuals>,
}

impl WeatherSystem {
    /// Create an idle system. All intensities hold 0 and no visuals are
    /// reported until the first [`set_weather`](Self::set_weather) call.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            rain: ElementTransition::new(),
            hail: ElementTransition::new(),
            snow: ElementTransition::new(),
            fog: ElementTransition::new(),
            envelope: FluctuationEnvelope::new(),
            active: None,
        }
    }

    /// Begin transitioning every element toward `preset` over
    /// `transition_secs`; 0 snaps on the next tick.
    ///
    /// Safe to call mid-transition: each element re-bases on its current
    /// value, so the output never jumps across a switch.
    pub fn set_weather(&mut self, preset: &WeatherPreset, transition_secs: f32) {
        log::info!(
            "weather: switching to '{}' over {:.1}s",
            preset.name,
            transition_secs
        );
        self.rain.switch_to(&preset.rain, transition_secs, &mut self.rng);
        self.hail.switch_to(&preset.hail, transition_secs, &mut self.rng);
        self.snow.switch_to(&preset.snow, transition_secs, &mut self.rng);
        self.fog.switch_to(&preset.fog, transition_secs, &mut self.rng);
        self.envelope
            .switch_to(&preset.fluctuation, transition_secs, &mut self.rng);
        self.active = Some(PresetVisuals {
            name: preset.name.clone(),
            cloud_preset: preset.cloud_preset,
            sun_dimmer: preset.sun_dimmer,
            ambient_dimmer: preset.ambient_dimmer,
        });
    }

    /// Advance the envelope and all four elements by `dt` seconds and
    /// produce the clamped intensities.
    pub fn update(&mut self, dt: f32) -> WeatherSample {
        let gust = self.envelope.update(dt, &mut self.rng);
        WeatherSample {
            rain: (gust + self.rain.update(dt, &mut self.rng)).clamp(0.0, 1.0),
            hail: (gust + self.hail.update(dt, &mut self.rng)).clamp(0.0, 1.0),
            snow: (gust + self.snow.update(dt, &mut self.rng)).clamp(0.0, 1.0),
            fog: (gust + self.fog.update(dt, &mut self.rng)).clamp(0.0, 1.0),
        }
    }

    /// Visual parameters of the active preset, if one has been applied.
    #[inline]
    pub fn active(&self) -> Option<&PresetVisuals> {
        self.active.as_ref()
    }

    /// Current signed gust offset.
    #[inline]
    pub fn gust(&self) -> f32 {
        self.envelope.value()
    }
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
