//! Unified weather and day/night environment simulation.
//!
//! Blends designer-authored weather presets into smoothly evolving rain,
//! hail, snow, and fog intensities, layers a shared gust envelope on top,
//! and advances a day/night clock that drives a sun/moon pivot. The main
//! entry point is [`EnvironmentSystem`]: call
//! [`update`](EnvironmentSystem::update) once per frame, read the resulting
//! [`EnvironmentState`], and [`publish`](EnvironmentSystem::publish) into a
//! [`PresentationSink`].

pub mod config;
pub mod daynight;
pub mod sink;
pub mod state;
pub mod transition;
pub mod weather;

// Re-exports
pub use config::{
    CloudPreset, DayNightConfig, EnvironmentConfig, FluctuationConfig, FogDistanceConfig,
    WeatherElementConfig, WeatherPreset,
};
pub use daynight::DayNightClock;
pub use sink::{CelestialBody, NullSink, PresentationSink, WeatherChannel};
pub use state::{EnvironmentState, EnvironmentUniform};
pub use transition::{ElementTransition, FluctuationEnvelope};
pub use weather::{PresetVisuals, WeatherSample, WeatherSystem};

// ---------------------------------------------------------------------------
// EnvironmentSystem
// ---------------------------------------------------------------------------

/// Top-level environment simulation: one [`WeatherSystem`] plus one
/// [`DayNightClock`] behind a single per-frame `update` call.
///
/// Single-threaded cooperative stepping: every state change completes
/// synchronously inside [`update`](Self::update) or
/// [`set_weather`](Self::set_weather); sinks read results strictly after
/// the tick.
pub struct EnvironmentSystem {
    config: EnvironmentConfig,
    weather: WeatherSystem,
    clock: DayNightClock,
    state: EnvironmentState,
    last_sample: WeatherSample,
    /// Intensities as last handed to a sink, for change detection.
    last_pushed: Option<WeatherSample>,
    /// Set by a preset switch, cleared by the next publish.
    visuals_pending: bool,
}

impl EnvironmentSystem {
    /// Create a new environment system.
    ///
    /// The weather side stays idle (all intensities 0, no visuals) until
    /// the first [`set_weather`](Self::set_weather) call. `config` is
    /// assumed validated; see [`EnvironmentConfig::validate`].
    pub fn new(config: EnvironmentConfig, seed: u64) -> Self {
        let mut sys = Self {
            clock: DayNightClock::new(config.day_night),
            weather: WeatherSystem::new(seed),
            config,
            state: EnvironmentState::default(),
            last_sample: WeatherSample::default(),
            last_pushed: None,
            visuals_pending: false,
        };
        sys.recompute_state();
        sys
    }

    /// Begin transitioning to `preset` over `transition_secs` (0 snaps on
    /// the next tick). The sole externally triggerable mutation besides the
    /// per-frame tick; safe mid-transition, values re-base and never jump.
    pub fn set_weather(&mut self, preset: &WeatherPreset, transition_secs: f32) {
        self.weather.set_weather(preset, transition_secs);
        self.visuals_pending = true;
        self.recompute_state();
    }

    /// Advance the whole simulation by `dt` real seconds and recompute the
    /// published state. A `dt` of 0 recomputes without moving anything.
    pub fn update(&mut self, dt: f32) {
        self.clock.advance(dt);
        self.last_sample = self.weather.update(dt);
        self.recompute_state();
    }

    /// Push the current state into a sink.
    ///
    /// Per-channel intensities (and the fog attenuation distance) go out
    /// only when they changed since the last publish; cloud preset and
    /// light dimmers only when a preset switch is pending; celestial angle
    /// and shadow caster every time.
    pub fn publish(&mut self, sink: &mut dyn PresentationSink) {
        let sample = self.last_sample;
        let prev = self.last_pushed;
        let channels = [
            (WeatherChannel::Rain, sample.rain, prev.map(|p| p.rain)),
            (WeatherChannel::Hail, sample.hail, prev.map(|p| p.hail)),
            (WeatherChannel::Snow, sample.snow, prev.map(|p| p.snow)),
            (WeatherChannel::Fog, sample.fog, prev.map(|p| p.fog)),
        ];
        for (channel, value, last) in channels {
            if last != Some(value) {
                sink.set_intensity(channel, value);
                if channel == WeatherChannel::Fog {
                    sink.set_fog_attenuation(self.state.fog_attenuation_distance);
                }
            }
        }
        self.last_pushed = Some(sample);

        if self.visuals_pending {
            self.visuals_pending = false;
            sink.apply_cloud_preset(self.state.cloud_preset);
            sink.set_light_dimmers(self.state.sun_dimmer, self.state.ambient_dimmer);
        }

        sink.set_celestial_angle(self.state.celestial_angle_deg);
        sink.set_shadow_caster(if self.state.is_day {
            CelestialBody::Sun
        } else {
            CelestialBody::Moon
        });
    }

    /// Current environment state.
    #[inline]
    pub fn state(&self) -> &EnvironmentState {
        &self.state
    }

    /// Build a GPU-ready uniform from the current state.
    pub fn uniform(&self) -> EnvironmentUniform {
        EnvironmentUniform::from(&self.state)
    }

    /// The weather side, for inspection.
    #[inline]
    pub fn weather(&self) -> &WeatherSystem {
        &self.weather
    }

    /// The day/night clock, for inspection.
    #[inline]
    pub fn clock(&self) -> &DayNightClock {
        &self.clock
    }

    /// Jump the clock to the given hour and recompute state.
    pub fn set_hour(&mut self, hour: f32) {
        self.clock.set_hour(hour);
        self.recompute_state();
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Rebuild the published state from the current weather sample, active
    /// preset visuals, and clock.
    fn recompute_state(&mut self) {
        let sample = self.last_sample;
        let (cloud_preset, sun_dimmer, ambient_dimmer) = match self.weather.active() {
            Some(v) => (v.cloud_preset, v.sun_dimmer, v.ambient_dimmer),
            None => (CloudPreset::default(), 1.0, 1.0),
        };
        let is_day = self.clock.is_day();

        self.state = EnvironmentState {
            rain_intensity: sample.rain,
            hail_intensity: sample.hail,
            snow_intensity: sample.snow,
            fog_intensity: sample.fog,
            fog_density: sample.fog,
            fog_attenuation_distance: self.config.fog.attenuation_for(sample.fog),
            gust_offset: self.weather.gust(),
            cloud_preset,
            sun_dimmer,
            ambient_dimmer,
            time_of_day_hours: self.clock.hour(),
            day_count: self.clock.day_count(),
            is_day,
            celestial_angle_deg: self.clock.celestial_angle(),
            sun_casts_shadows: is_day,
            moon_casts_shadows: !is_day,
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that records every call for assertions.
    #[derive(Default)]
    struct RecordingSink {
        intensities: Vec<(WeatherChannel, f32)>,
        fog_attenuations: Vec<f32>,
        cloud_presets: Vec<CloudPreset>,
        dimmers: Vec<(f32, f32)>,
        angles: Vec<f32>,
        shadow_casters: Vec<CelestialBody>,
    }

    impl PresentationSink for RecordingSink {
        fn set_intensity(&mut self, channel: WeatherChannel, value: f32) {
            self.intensities.push((channel, value));
        }
        fn set_fog_attenuation(&mut self, distance: f32) {
            self.fog_attenuations.push(distance);
        }
        fn apply_cloud_preset(&mut self, clouds: CloudPreset) {
            self.cloud_presets.push(clouds);
        }
        fn set_light_dimmers(&mut self, sun: f32, ambient: f32) {
            self.dimmers.push((sun, ambient));
        }
        fn set_celestial_angle(&mut self, degrees: f32) {
            self.angles.push(degrees);
        }
        fn set_shadow_caster(&mut self, body: CelestialBody) {
            self.shadow_casters.push(body);
        }
    }

    fn foggy() -> WeatherPreset {
        WeatherPreset {
            name: "foggy".to_string(),
            fog: WeatherElementConfig::steady(1.0),
            cloud_preset: CloudPreset::Overcast,
            sun_dimmer: 0.6,
            ambient_dimmer: 0.8,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_system_reports_nothing() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 1);
        sys.update(0.5);
        let s = sys.state();
        assert_eq!(s.rain_intensity, 0.0);
        assert_eq!(s.fog_intensity, 0.0);
        assert_eq!(s.sun_dimmer, 1.0);
        assert_eq!(s.cloud_preset, CloudPreset::Sparse);
    }

    #[test]
    fn test_update_zero_dt_leaves_state_unchanged() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 9);
        sys.set_weather(&foggy(), 8.0);
        for _ in 0..30 {
            sys.update(0.1);
        }
        let hours = sys.state().time_of_day_hours;
        let fog = sys.state().fog_intensity;
        sys.update(0.0);
        assert_eq!(sys.state().time_of_day_hours, hours);
        assert_eq!(sys.state().fog_intensity, fog);
    }

    #[test]
    fn test_fog_snap_reaches_full_and_maps_attenuation() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        sys.set_weather(&foggy(), 0.0);
        sys.update(0.016);
        let s = sys.state();
        assert!((s.fog_intensity - 1.0).abs() < 1e-6);
        assert!((s.fog_density - 1.0).abs() < 1e-6);
        // Full fog pulls attenuation to the configured minimum
        assert!((s.fog_attenuation_distance - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_publish_change_detection() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        sys.set_weather(&foggy(), 0.0);
        sys.update(0.016);

        let mut sink = RecordingSink::default();
        sys.publish(&mut sink);
        // First publish pushes every channel
        assert_eq!(sink.intensities.len(), 4);
        assert_eq!(sink.fog_attenuations.len(), 1);

        // Steady preset, no fluctuation: a second tick changes nothing, so
        // no intensity goes out again
        sys.update(0.016);
        sys.publish(&mut sink);
        assert_eq!(sink.intensities.len(), 4, "unchanged intensities must not republish");
        // The celestial angle still goes out every publish
        assert_eq!(sink.angles.len(), 2);
        assert_eq!(sink.shadow_casters.len(), 2);
    }

    #[test]
    fn test_visuals_published_once_per_switch() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        sys.set_weather(&foggy(), 0.0);
        sys.update(0.016);

        let mut sink = RecordingSink::default();
        sys.publish(&mut sink);
        sys.update(0.016);
        sys.publish(&mut sink);
        assert_eq!(sink.cloud_presets, vec![CloudPreset::Overcast]);
        assert_eq!(sink.dimmers, vec![(0.6, 0.8)]);

        // A new switch queues exactly one more visual push
        sys.set_weather(&WeatherPreset::default(), 1.0);
        sys.update(0.016);
        sys.publish(&mut sink);
        assert_eq!(sink.cloud_presets.len(), 2);
        assert_eq!(sink.dimmers.len(), 2);
    }

    #[test]
    fn test_shadow_caster_follows_clock() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        let mut sink = RecordingSink::default();

        sys.set_hour(12.0);
        sys.publish(&mut sink);
        assert_eq!(sink.shadow_casters.last(), Some(&CelestialBody::Sun));
        assert!(sys.state().sun_casts_shadows);
        assert!(!sys.state().moon_casts_shadows);

        sys.set_hour(0.0);
        sys.publish(&mut sink);
        assert_eq!(sink.shadow_casters.last(), Some(&CelestialBody::Moon));
        assert!(!sys.state().sun_casts_shadows);
        assert!(sys.state().moon_casts_shadows);
    }

    #[test]
    fn test_clock_advances_with_multiplier() {
        // Default multiplier is 60: one real second = one in-game minute
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        let start = sys.state().time_of_day_hours;
        sys.update(60.0);
        let end = sys.state().time_of_day_hours;
        assert!((end - start - 1.0).abs() < 1e-3, "expected one hour, got {}", end - start);
    }

    #[test]
    fn test_uniform_mirrors_state() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 4);
        sys.set_weather(&foggy(), 0.0);
        sys.update(0.016);
        let u = sys.uniform();
        assert_eq!(u.fog_intensity, sys.state().fog_intensity);
        assert_eq!(u.cloud_preset, 2);
    }

    #[test]
    fn test_state_continuous_across_switch() {
        let mut sys = EnvironmentSystem::new(EnvironmentConfig::default(), 21);
        let rainy = WeatherPreset {
            name: "rainy".to_string(),
            rain: WeatherElementConfig::steady(0.8),
            ..Default::default()
        };
        sys.set_weather(&rainy, 6.0);
        for _ in 0..60 {
            sys.update(0.05); // 3s: mid-transition
        }
        let before = sys.state().rain_intensity;
        sys.set_weather(&WeatherPreset::default(), 6.0);
        assert_eq!(
            sys.state().rain_intensity,
            before,
            "preset switch must re-base, not snap"
        );
    }
}
