//! Presentation sink abstraction.
//!
//! The core publishes plain scalars; everything renderer-specific (shader
//! parameter names, fog volume weights, light components) lives behind
//! [`PresentationSink`], so the simulation has zero dependency on any
//! rendering API.

use crate::environment::config::CloudPreset;

/// The four blended weather element channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeatherChannel {
    Rain,
    Hail,
    Snow,
    Fog,
}

impl WeatherChannel {
    /// All channels in publication order.
    pub const ALL: [WeatherChannel; 4] = [
        WeatherChannel::Rain,
        WeatherChannel::Hail,
        WeatherChannel::Snow,
        WeatherChannel::Fog,
    ];
}

/// Which celestial body currently casts shadows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelestialBody {
    Sun,
    Moon,
}

/// Receives computed environment scalars once per frame.
///
/// Intensities arrive only when they changed since the last publish; cloud
/// and light-dimmer parameters only when a preset switch occurred; the
/// celestial angle and shadow caster every publish.
pub trait PresentationSink {
    /// Blended intensity for one weather channel, pre-clamped to [0, 1].
    /// The fog channel doubles as the fog volume weight.
    fn set_intensity(&mut self, channel: WeatherChannel, value: f32);

    /// Fog attenuation distance in world units, pushed alongside fog
    /// intensity changes.
    fn set_fog_attenuation(&mut self, distance: f32);

    /// Cloud preset of the newly active weather preset.
    fn apply_cloud_preset(&mut self, clouds: CloudPreset);

    /// Sun and ambient light dimmers of the newly active preset, 0-1.
    fn set_light_dimmers(&mut self, sun: f32, ambient: f32);

    /// Sun/moon pivot angle in degrees, 0-360.
    fn set_celestial_angle(&mut self, degrees: f32);

    /// The body that should cast shadows right now.
    fn set_shadow_caster(&mut self, body: CelestialBody);
}

/// Sink that discards everything. Useful for headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn set_intensity(&mut self, _channel: WeatherChannel, _value: f32) {}
    fn set_fog_attenuation(&mut self, _distance: f32) {}
    fn apply_cloud_preset(&mut self, _clouds: CloudPreset) {}
    fn set_light_dimmers(&mut self, _sun: f32, _ambient: f32) {}
    fn set_celestial_angle(&mut self, _degrees: f32) {}
    fn set_shadow_caster(&mut self, _body: CelestialBody) {}
}
