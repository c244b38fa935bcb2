//! Published environment state and GPU uniform.

use bytemuck::{Pod, Zeroable};

use crate::environment::config::CloudPreset;

// ---------------------------------------------------------------------------
// CPU-side state
// ---------------------------------------------------------------------------

/// Full environment state computed each frame by
/// [`super::EnvironmentSystem`].
#[derive(Clone, Debug)]
pub struct EnvironmentState {
    // Weather
    pub rain_intensity: f32,
    pub hail_intensity: f32,
    pub snow_intensity: f32,
    pub fog_intensity: f32,
    /// Fog density proxy; tracks fog intensity exactly.
    pub fog_density: f32,
    /// Fog attenuation distance in world units. Denser fog, shorter
    /// distance.
    pub fog_attenuation_distance: f32,
    /// Current signed gust offset shared by all elements.
    pub gust_offset: f32,

    // Active preset visuals
    pub cloud_preset: CloudPreset,
    pub sun_dimmer: f32,
    pub ambient_dimmer: f32,

    // Time
    pub time_of_day_hours: f32,
    pub day_count: u32,
    pub is_day: bool,
    /// Sun/moon pivot angle in degrees, 0-360.
    pub celestial_angle_deg: f32,
    pub sun_casts_shadows: bool,
    pub moon_casts_shadows: bool,
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self {
            rain_intensity: 0.0,
            hail_intensity: 0.0,
            snow_intensity: 0.0,
            fog_intensity: 0.0,
            fog_density: 0.0,
            fog_attenuation_distance: 50.0,
            gust_offset: 0.0,
            cloud_preset: CloudPreset::Sparse,
            sun_dimmer: 1.0,
            ambient_dimmer: 1.0,
            time_of_day_hours: 0.0,
            day_count: 0,
            is_day: false,
            celestial_angle_deg: 0.0,
            sun_casts_shadows: false,
            moon_casts_shadows: true,
        }
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready environment uniform buffer.
///
/// Sized to a multiple of 16 bytes for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct EnvironmentUniform {
    // -- Element intensities (16 bytes) --
    pub rain_intensity: f32,
    pub hail_intensity: f32,
    pub snow_intensity: f32,
    pub fog_intensity: f32,

    // -- Fog and light dimmers (16 bytes) --
    pub fog_density: f32,
    pub fog_attenuation_distance: f32,
    pub sun_dimmer: f32,
    pub ambient_dimmer: f32,

    // -- Time (16 bytes) --
    pub time_of_day_hours: f32,
    pub celestial_angle_deg: f32,
    pub cloud_preset: u32,
    /// Bit 0: day flag.
    pub flags: u32,
}

impl EnvironmentUniform {
    pub const FLAG_IS_DAY: u32 = 1;
}

impl Default for EnvironmentUniform {
    fn default() -> Self {
        Self::from(&EnvironmentState::default())
    }
}

impl From<&EnvironmentState> for EnvironmentUniform {
    fn from(s: &EnvironmentState) -> Self {
        Self {
            rain_intensity: s.rain_intensity,
            hail_intensity: s.hail_intensity,
            snow_intensity: s.snow_intensity,
            fog_intensity: s.fog_intensity,
            fog_density: s.fog_density,
            fog_attenuation_distance: s.fog_attenuation_distance,
            sun_dimmer: s.sun_dimmer,
            ambient_dimmer: s.ambient_dimmer,
            time_of_day_hours: s.time_of_day_hours,
            celestial_angle_deg: s.celestial_angle_deg,
            cloud_preset: s.cloud_preset.index(),
            flags: if s.is_day { Self::FLAG_IS_DAY } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
