//! Tempest demo - drives the environment simulation in real time and logs
//! what a renderer would receive.
//!
//! Cycles through a set of weather presets (built-in, or loaded from a JSON
//! file given as the first argument) while the day/night clock runs.

use std::time::Duration;
use std::{env, fs, thread};

use tempest::core::logging;
use tempest::core::time::FrameTimer;
use tempest::core::Result;
use tempest::environment::{
    CelestialBody, CloudPreset, EnvironmentConfig, EnvironmentSystem, FluctuationConfig,
    PresentationSink, WeatherChannel, WeatherElementConfig, WeatherPreset,
};

/// Seconds each preset stays active before cycling to the next.
const HOLD_SECS: f32 = 12.0;
/// Transition time between presets.
const TRANSITION_SECS: f32 = 4.0;

/// Sink that logs instead of binding shader parameters.
struct LogSink;

impl PresentationSink for LogSink {
    fn set_intensity(&mut self, channel: WeatherChannel, value: f32) {
        log::debug!("sink: {channel:?} intensity -> {value:.3}");
    }
    fn set_fog_attenuation(&mut self, distance: f32) {
        log::debug!("sink: fog attenuation -> {distance:.1}");
    }
    fn apply_cloud_preset(&mut self, clouds: CloudPreset) {
        log::info!("sink: cloud preset -> {clouds:?}");
    }
    fn set_light_dimmers(&mut self, sun: f32, ambient: f32) {
        log::info!("sink: light dimmers -> sun {sun:.2}, ambient {ambient:.2}");
    }
    fn set_celestial_angle(&mut self, _degrees: f32) {}
    fn set_shadow_caster(&mut self, _body: CelestialBody) {}
}

fn builtin_presets() -> Vec<WeatherPreset> {
    vec![
        WeatherPreset::default(),
        WeatherPreset {
            name: "drizzle".to_string(),
            rain: WeatherElementConfig {
                intensity: 0.3,
                fluctuation: FluctuationConfig {
                    amount: 0.1,
                    min_interval: 2.0,
                    max_interval: 6.0,
                },
            },
            fog: WeatherElementConfig {
                intensity: 0.2,
                fluctuation: FluctuationConfig {
                    amount: 0.05,
                    min_interval: 4.0,
                    max_interval: 10.0,
                },
            },
            cloud_preset: CloudPreset::Cloudy,
            sun_dimmer: 0.8,
            ambient_dimmer: 0.9,
            ..Default::default()
        },
        WeatherPreset {
            name: "storm".to_string(),
            rain: WeatherElementConfig {
                intensity: 0.9,
                fluctuation: FluctuationConfig {
                    amount: 0.1,
                    min_interval: 1.0,
                    max_interval: 3.0,
                },
            },
            hail: WeatherElementConfig {
                intensity: 0.4,
                fluctuation: FluctuationConfig {
                    amount: 0.3,
                    min_interval: 2.0,
                    max_interval: 5.0,
                },
            },
            fog: WeatherElementConfig::steady(0.3),
            cloud_preset: CloudPreset::Stormy,
            sun_dimmer: 0.3,
            ambient_dimmer: 0.5,
            fluctuation: FluctuationConfig {
                amount: 0.15,
                min_interval: 1.0,
                max_interval: 3.0,
            },
            ..Default::default()
        },
        WeatherPreset {
            name: "whiteout".to_string(),
            snow: WeatherElementConfig {
                intensity: 0.85,
                fluctuation: FluctuationConfig {
                    amount: 0.15,
                    min_interval: 3.0,
                    max_interval: 8.0,
                },
            },
            fog: WeatherElementConfig::steady(0.6),
            cloud_preset: CloudPreset::Overcast,
            sun_dimmer: 0.5,
            ambient_dimmer: 0.7,
            ..Default::default()
        },
    ]
}

fn load_presets(path: &str) -> Result<Vec<WeatherPreset>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<()> {
    logging::init();

    let presets = match env::args().nth(1) {
        Some(path) => load_presets(&path)?,
        None => builtin_presets(),
    };
    for preset in &presets {
        preset.validate()?;
    }

    let config = EnvironmentConfig::default();
    config.validate()?;
    let mut system = EnvironmentSystem::new(config, 42);
    let mut sink = LogSink;
    let mut timer = FrameTimer::new();

    let mut first = true;
    for preset in &presets {
        let transition = if first { 0.0 } else { TRANSITION_SECS };
        first = false;
        system.set_weather(preset, transition);

        let mut held = 0.0;
        let mut since_report = 0.0;
        while held < HOLD_SECS {
            thread::sleep(Duration::from_millis(16));
            timer.tick();
            let dt = timer.delta_secs();

            system.update(dt);
            system.publish(&mut sink);

            held += dt;
            since_report += dt;
            if since_report >= 2.0 {
                since_report = 0.0;
                let s = system.state();
                log::info!(
                    "{:>5.2}h {} ({:>5.1} deg) | rain {:.2} hail {:.2} snow {:.2} fog {:.2} (gust {:+.2})",
                    s.time_of_day_hours,
                    if s.is_day { "day" } else { "night" },
                    s.celestial_angle_deg,
                    s.rain_intensity,
                    s.hail_intensity,
                    s.snow_intensity,
                    s.fog_intensity,
                    s.gust_offset,
                );
            }
        }
    }

    log::info!(
        "demo finished after {} frames ({:.0} fps)",
        timer.frame_count(),
        timer.fps()
    );
    Ok(())
}
