//! Day/night clock and celestial orientation.
//!
//! An independent accumulator over scaled wall time. The wrapped
//! time-of-day drives a single sun/moon pivot angle: 0° to 180° across the
//! day, 180° to 360° across the night, with the night span wrapping across
//! midnight.

use glam::Vec3;

use crate::environment::config::DayNightConfig;

/// Wrapped time-of-day accumulator with derived sun/moon orientation.
#[derive(Clone, Debug)]
pub struct DayNightClock {
    config: DayNightConfig,
    /// Scaled seconds since midnight, wrapped into
    /// `[0, hours_per_day * 3600)`.
    seconds: f32,
    /// Number of full days that have elapsed.
    day_count: u32,
}

impl DayNightClock {
    /// Create a clock starting at the configured start hour.
    pub fn new(config: DayNightConfig) -> Self {
        let mut clock = Self {
            config,
            seconds: 0.0,
            day_count: 0,
        };
        clock.set_hour(config.start_hour);
        clock
    }

    /// Advance wall time by `dt` seconds, scaled by the configured
    /// multiplier. Time always wraps; it never grows unbounded.
    pub fn advance(&mut self, dt: f32) {
        let day_secs = self.config.hours_per_day * 3600.0;
        self.seconds += dt * self.config.time_multiplier;

        while self.seconds >= day_secs {
            self.seconds -= day_secs;
            self.day_count += 1;
        }
        while self.seconds < 0.0 {
            self.seconds += day_secs;
            self.day_count = self.day_count.saturating_sub(1);
        }
    }

    /// Jump to the given hour, wrapping into the valid range.
    pub fn set_hour(&mut self, hour: f32) {
        self.seconds = hour.rem_euclid(self.config.hours_per_day) * 3600.0;
    }

    /// Wrapped time of day in seconds.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Wrapped time of day in hours.
    #[inline]
    pub fn hour(&self) -> f32 {
        self.seconds / 3600.0
    }

    /// Number of full days that have elapsed.
    #[inline]
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Length of the day span in hours.
    #[inline]
    pub fn day_length(&self) -> f32 {
        self.config.sunset_hour - self.config.sunrise_hour
    }

    /// Length of the night span in hours.
    #[inline]
    pub fn night_length(&self) -> f32 {
        self.config.hours_per_day - self.day_length()
    }

    /// Whether the current hour falls within the day window. Both the
    /// sunrise and sunset boundaries count as day.
    pub fn is_day(&self) -> bool {
        (self.config.sunrise_hour..=self.config.sunset_hour).contains(&self.hour())
    }

    /// Combined sun/moon pivot angle in degrees, 0-360.
    ///
    /// Day sweeps 0° (sunrise) to 180° (sunset); night continues 180° to
    /// 360°, where hours-into-night wraps across midnight.
    pub fn celestial_angle(&self) -> f32 {
        let c = &self.config;
        let h = self.hour();
        if self.is_day() {
            (h - c.sunrise_hour) / self.day_length() * 180.0
        } else {
            let into_night = if h > c.sunset_hour {
                h - c.sunset_hour
            } else {
                h + (c.hours_per_day - c.sunset_hour)
            };
            180.0 + into_night / self.night_length() * 180.0
        }
    }

    /// Unit direction toward the sun on the pivot plane: at the horizon at
    /// sunrise and sunset, overhead mid-day, below the horizon at night.
    pub fn sun_direction(&self) -> Vec3 {
        let a = self.celestial_angle().to_radians();
        Vec3::new(a.cos(), a.sin(), 0.0)
    }

    /// Unit direction toward the moon: the opposite end of the pivot.
    pub fn moon_direction(&self) -> Vec3 {
        -self.sun_direction()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> DayNightClock {
        // Real-time seconds for test readability
        DayNightClock::new(DayNightConfig {
            time_multiplier: 1.0,
            start_hour: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_starts_at_configured_hour() {
        let c = DayNightClock::new(DayNightConfig::default());
        assert!((c.hour() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_advance_scales_by_multiplier() {
        let mut c = DayNightClock::new(DayNightConfig {
            time_multiplier: 60.0,
            start_hour: 0.0,
            ..Default::default()
        });
        c.advance(60.0); // one real minute = one in-game hour
        assert!((c.hour() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_time_wraps_after_full_day() {
        let mut c = clock();
        c.set_hour(7.5);
        let start = c.seconds();
        c.advance(24.0 * 3600.0);
        assert!((c.seconds() - start).abs() < 1e-2, "full day should wrap to start");
        assert_eq!(c.day_count(), 1);
    }

    #[test]
    fn test_day_count_accumulates() {
        let mut c = clock();
        c.advance(3.0 * 24.0 * 3600.0);
        assert_eq!(c.day_count(), 3);
        assert!(c.hour() < 1e-3);
    }

    #[test]
    fn test_day_boundaries_inclusive() {
        let mut c = clock();
        c.set_hour(6.0);
        assert!(c.is_day(), "sunrise counts as day");
        c.set_hour(18.0);
        assert!(c.is_day(), "sunset counts as day");
        c.set_hour(18.01);
        assert!(!c.is_day(), "just after sunset is night");
        c.set_hour(5.99);
        assert!(!c.is_day(), "just before sunrise is night");
    }

    #[test]
    fn test_angle_zero_at_sunrise() {
        let mut c = clock();
        c.set_hour(6.0);
        assert!(c.celestial_angle().abs() < 1e-4);
    }

    #[test]
    fn test_angle_180_at_sunset() {
        let mut c = clock();
        c.set_hour(18.0);
        assert!((c.celestial_angle() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_90_at_noon() {
        let mut c = clock();
        c.set_hour(12.0);
        assert!((c.celestial_angle() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_270_at_midnight() {
        // Sunrise 6, sunset 18: midnight is 6 hours into a 12-hour night
        let mut c = clock();
        c.set_hour(0.0);
        assert!((c.celestial_angle() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_night_angle_wraps_across_midnight() {
        let mut c = clock();
        c.set_hour(21.0); // 3 hours into the night
        assert!((c.celestial_angle() - 225.0).abs() < 1e-4);
        c.set_hour(3.0); // 9 hours into the night
        assert!((c.celestial_angle() - 315.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_monotonic_over_day() {
        let mut c = clock();
        let mut prev = -1.0;
        for i in 0..240 {
            c.set_hour(6.0 + i as f32 * 0.05);
            let a = c.celestial_angle();
            assert!(a >= prev - 1e-4, "angle regressed at step {i}: {prev} -> {a}");
            prev = a;
        }
    }

    #[test]
    fn test_asymmetric_day_window() {
        let mut c = DayNightClock::new(DayNightConfig {
            time_multiplier: 1.0,
            sunrise_hour: 8.0,
            sunset_hour: 16.0,
            start_hour: 0.0,
            ..Default::default()
        });
        c.set_hour(12.0); // halfway through an 8-hour day
        assert!((c.celestial_angle() - 90.0).abs() < 1e-4);
        c.set_hour(0.0); // 8 hours into a 16-hour night
        assert!((c.celestial_angle() - 270.0).abs() < 1e-4);
        assert!((c.night_length() - 16.0).abs() < 1e-5);
    }

    #[test]
    fn test_directions_unit_and_opposite() {
        let mut c = clock();
        for hour in [0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0] {
            c.set_hour(hour);
            let sun = c.sun_direction();
            let moon = c.moon_direction();
            assert!((sun.length() - 1.0).abs() < 1e-5);
            assert!((sun + moon).length() < 1e-5, "moon must oppose sun at hour {hour}");
        }
    }

    #[test]
    fn test_sun_above_horizon_only_by_day() {
        let mut c = clock();
        c.set_hour(12.0);
        assert!(c.sun_direction().y > 0.9);
        c.set_hour(0.0);
        assert!(c.sun_direction().y < 0.0);
        assert!(c.moon_direction().y > 0.0);
    }

    #[test]
    fn test_advance_zero_dt_is_noop() {
        let mut c = clock();
        c.set_hour(13.37);
        let before = c.seconds();
        for _ in 0..10 {
            c.advance(0.0);
        }
        assert_eq!(c.seconds(), before);
    }
}
