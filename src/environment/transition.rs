//! Self-renewing transition machines for weather values.
//!
//! Every motion in the weather layer is the same machine: glide linearly
//! from wherever the value is now toward a freshly drawn random target over
//! a drawn duration, then re-seed and go again. Preset switches are not
//! cancellations but re-basings (new start = current value), so no timeline
//! is stored or replayed and the output never jumps.

use rand::Rng;

use crate::environment::config::{FluctuationConfig, WeatherElementConfig};

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Shared glide core
// ---------------------------------------------------------------------------

/// Linear glide between a start and a target value that re-seeds itself on
/// arrival.
#[derive(Clone, Copy, Debug, Default)]
struct Glide {
    initial: f32,
    current: f32,
    target: f32,
    /// Progress of the current leg, 0.0 to 1.0.
    progress: f32,
    /// Duration of the current leg in seconds.
    duration: f32,
    in_progress: bool,
}

impl Glide {
    /// Re-base on the current value and head toward `target` over
    /// `duration` seconds. A zero duration parks progress at 1 so the next
    /// advance commits immediately.
    fn retarget(&mut self, target: f32, duration: f32) {
        self.initial = self.current;
        self.target = target;
        self.duration = duration;
        self.progress = if duration > 0.0 { 0.0 } else { 1.0 };
        self.in_progress = true;
    }

    /// Force the machine to hold `value` with no leg in flight.
    fn snap_to(&mut self, value: f32) {
        self.initial = value;
        self.current = value;
        self.target = value;
        self.progress = 0.0;
        self.duration = 0.0;
        self.in_progress = false;
    }

    /// Advance by `dt` seconds and return the current value.
    ///
    /// On arrival, `reseed` supplies the next `(target, duration)` draw; a
    /// drawn duration of 0 freezes the machine at the committed value. The
    /// arrival check runs in the same call that finishes a leg, so a
    /// zero-duration leg commits its target and re-seeds within one tick.
    fn advance(&mut self, dt: f32, reseed: impl FnOnce() -> (f32, f32)) -> f32 {
        if !self.in_progress {
            return self.current;
        }
        if self.progress < 1.0 {
            // duration > 0 here: a zero-duration leg starts at progress 1
            self.progress += dt / self.duration;
        }
        self.current = lerp(self.initial, self.target, self.progress.min(1.0));
        if self.progress >= 1.0 {
            let (target, duration) = reseed();
            self.initial = self.current;
            self.target = target;
            self.duration = duration;
            self.progress = 0.0;
            self.in_progress = duration > 0.0;
        }
        self.current
    }

    #[inline]
    fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    fn in_progress(&self) -> bool {
        self.in_progress
    }
}

// ---------------------------------------------------------------------------
// Per-element transition
// ---------------------------------------------------------------------------

/// Intensity transition for a single weather element (rain, hail, snow or
/// fog). Holds 0 until the first preset binds it.
#[derive(Clone, Debug, Default)]
pub struct ElementTransition {
    glide: Glide,
    config: WeatherElementConfig,
}

impl ElementTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a new element config and glide toward a target drawn from it
    /// over `transition_secs`.
    ///
    /// The glide re-bases on the current value, so a switch issued
    /// mid-transition never jumps. Subsequent self-renewals draw from
    /// `config`, not from whatever was active before the switch.
    pub fn switch_to(
        &mut self,
        config: &WeatherElementConfig,
        transition_secs: f32,
        rng: &mut impl Rng,
    ) {
        self.config = *config;
        let target = config.random_intensity(rng);
        self.glide.retarget(target, transition_secs);
    }

    /// Advance by `dt` seconds and return the current intensity.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> f32 {
        let config = self.config;
        self.glide.advance(dt, || {
            let target = config.random_intensity(rng);
            let duration = config.fluctuation.interval(rng);
            log::trace!("element re-seed: target {target:.3} over {duration:.2}s");
            (target, duration)
        })
    }

    /// Last computed intensity.
    #[inline]
    pub fn current(&self) -> f32 {
        self.glide.current()
    }

    /// Whether a leg is currently in flight.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.glide.in_progress()
    }
}

// ---------------------------------------------------------------------------
// Preset-wide gust envelope
// ---------------------------------------------------------------------------

/// Shared fluctuation layered on top of every element's intensity.
///
/// Same machine as [`ElementTransition`] but ranging over the signed band
/// `[-amount, +amount]`. The sum with an element value is clamped by the
/// controller, not here, so gusts can push a saturated element past its cap
/// without distorting the envelope itself.
#[derive(Clone, Debug, Default)]
pub struct FluctuationEnvelope {
    glide: Glide,
    config: FluctuationConfig,
}

impl FluctuationEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seed from a preset's overall fluctuation parameters.
    ///
    /// A calm preset (`amount <= 0`) flattens the envelope immediately: all
    /// three values drop to 0 and no leg is started, so gust state from the
    /// previous preset cannot linger.
    pub fn switch_to(
        &mut self,
        config: &FluctuationConfig,
        transition_secs: f32,
        rng: &mut impl Rng,
    ) {
        self.config = *config;
        if config.amount <= 0.0 {
            self.glide.snap_to(0.0);
            return;
        }
        let target = config.offset(rng);
        self.glide.retarget(target, transition_secs);
    }

    /// Advance by `dt` seconds and return the current signed offset.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> f32 {
        let config = self.config;
        self.glide.advance(dt, || {
            let target = config.offset(rng);
            let duration = config.interval(rng);
            log::trace!("gust re-seed: offset {target:+.3} over {duration:.2}s");
            (target, duration)
        })
    }

    /// Last computed offset.
    #[inline]
    pub fn value(&self) -> f32 {
        self.glide.current()
    }

    /// Whether a leg is currently in flight.
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.glide.in_progress()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
