//! Per-channel fade/blink state machine.
//!
//! A [`LightDimmer`] is a pure function of time: callers sample the clock and
//! pass the resulting [`Instant`] into every time-driven operation. The dimmer
//! never performs I/O; it only computes the brightness the channel should have
//! at that moment.

use embassy_time::{Duration, Instant};

/// Default brightness ceiling.
pub const DEFAULT_MAX_LEVEL: u8 = 255;
/// Default rise ramp duration.
pub const DEFAULT_RISE_TIME: Duration = Duration::from_millis(250);
/// Default fall ramp duration.
pub const DEFAULT_FALL_TIME: Duration = Duration::from_millis(250);
/// Default fully-on hold duration within a blink cycle.
pub const DEFAULT_ON_TIME: Duration = Duration::from_millis(200);
/// Default blink cycle duration.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(900);

/// Phase of a dimmer channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmerState {
    /// Dark, holding at zero.
    Off,
    /// Lit, holding at the brightness ceiling.
    On,
    /// Linear ramp from zero toward the ceiling.
    Rising,
    /// Linear ramp from the ceiling toward zero.
    Falling,
}

/// Timing parameters for one channel.
///
/// `rise_time` and `fall_time` are clamped to at least 1 ms when applied,
/// so ramp interpolation never divides by zero.
#[derive(Debug, Clone, Copy)]
pub struct DimmerConfig {
    /// Brightness ceiling reached at the top of a rise.
    pub max_level: u8,
    /// Duration of the rising ramp.
    pub rise_time: Duration,
    /// Duration of the falling ramp.
    pub fall_time: Duration,
    /// How long the channel holds fully on within a blink cycle.
    pub on_time: Duration,
    /// Total blink cycle duration. Blinking is honored only while
    /// `period >= rise_time + on_time + fall_time`.
    pub period: Duration,
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            rise_time: DEFAULT_RISE_TIME,
            fall_time: DEFAULT_FALL_TIME,
            on_time: DEFAULT_ON_TIME,
            period: DEFAULT_PERIOD,
        }
    }
}

/// Fade/blink state machine for a single LED channel.
#[derive(Debug, Clone)]
pub struct LightDimmer {
    state: DimmerState,
    max_level: u8,
    rise_time: Duration,
    fall_time: Duration,
    on_time: Duration,
    period: Duration,
    /// When the current ramp completes, or when the next blink edge fires.
    next_event: Instant,
    blink: bool,
}

impl LightDimmer {
    /// Create a dimmer in the Off state with default timings.
    pub const fn new() -> Self {
        Self {
            state: DimmerState::Off,
            max_level: DEFAULT_MAX_LEVEL,
            rise_time: DEFAULT_RISE_TIME,
            fall_time: DEFAULT_FALL_TIME,
            on_time: DEFAULT_ON_TIME,
            period: DEFAULT_PERIOD,
            next_event: Instant::from_millis(0),
            blink: false,
        }
    }

    /// Apply a full set of timing parameters at once.
    pub fn configure(&mut self, config: &DimmerConfig) {
        self.set_max_level(config.max_level);
        self.set_rise_time(config.rise_time);
        self.set_fall_time(config.fall_time);
        self.set_on_time(config.on_time);
        self.set_period(config.period);
    }

    /// Set the brightness ceiling.
    pub fn set_max_level(&mut self, max_level: u8) {
        self.max_level = max_level;
    }

    /// Set the rising ramp duration, clamped to at least 1 ms.
    pub fn set_rise_time(&mut self, rise_time: Duration) {
        self.rise_time = Duration::from_millis(rise_time.as_millis().max(1));
    }

    /// Set the falling ramp duration, clamped to at least 1 ms.
    pub fn set_fall_time(&mut self, fall_time: Duration) {
        self.fall_time = Duration::from_millis(fall_time.as_millis().max(1));
    }

    /// Set the fully-on hold duration within a blink cycle.
    pub fn set_on_time(&mut self, on_time: Duration) {
        self.on_time = on_time;
    }

    /// Set the total blink cycle duration.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    pub const fn max_level(&self) -> u8 {
        self.max_level
    }

    pub const fn rise_time(&self) -> Duration {
        self.rise_time
    }

    pub const fn fall_time(&self) -> Duration {
        self.fall_time
    }

    pub const fn on_time(&self) -> Duration {
        self.on_time
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn state(&self) -> DimmerState {
        self.state
    }

    pub const fn is_on(&self) -> bool {
        matches!(self.state, DimmerState::On)
    }

    pub const fn is_off(&self) -> bool {
        matches!(self.state, DimmerState::Off)
    }

    pub const fn is_rising(&self) -> bool {
        matches!(self.state, DimmerState::Rising)
    }

    pub const fn is_falling(&self) -> bool {
        matches!(self.state, DimmerState::Falling)
    }

    pub const fn is_blinking(&self) -> bool {
        self.blink
    }

    /// Activate the channel at full brightness without a visible ramp.
    ///
    /// Enters Rising with the completion deadline already due, so the next
    /// [`advance`](Self::advance) snaps straight to On at `max_level`.
    pub fn force_full(&mut self, max_level: u8, now: Instant) {
        self.max_level = max_level;
        self.next_event = now;
        self.state = DimmerState::Rising;
        self.blink = false;
    }

    /// Start fading the channel in. Cancels blinking.
    ///
    /// From Off the rise takes the full `rise_time`. From Falling the ramp
    /// reverses proportionally: a channel half-faded rises back over half of
    /// `rise_time`, keeping the transition visually symmetric. Already On or
    /// Rising is a no-op.
    pub fn turn_on(&mut self, now: Instant) {
        match self.state {
            DimmerState::Off => {
                self.next_event = now + self.rise_time;
                self.state = DimmerState::Rising;
            }
            DimmerState::Falling => {
                let remaining = self.remaining_ms(now);
                let rise = self.rise_time.as_millis();
                let fall = self.fall_time.as_millis();
                self.next_event = now + Duration::from_millis(rise * remaining / fall);
                self.state = DimmerState::Rising;
            }
            DimmerState::On | DimmerState::Rising => {}
        }
        self.blink = false;
    }

    /// Start fading the channel out. Cancels blinking.
    ///
    /// Symmetric to [`turn_on`](Self::turn_on): full `fall_time` from On,
    /// proportional reversal from Rising, no-op from Off or Falling.
    pub fn turn_off(&mut self, now: Instant) {
        match self.state {
            DimmerState::On => {
                self.next_event = now + self.fall_time;
                self.state = DimmerState::Falling;
            }
            DimmerState::Rising => {
                let remaining = self.remaining_ms(now);
                let rise = self.rise_time.as_millis();
                let fall = self.fall_time.as_millis();
                self.next_event = now + Duration::from_millis(fall * remaining / rise);
                self.state = DimmerState::Falling;
            }
            DimmerState::Off | DimmerState::Falling => {}
        }
        self.blink = false;
    }

    /// Enable blinking, if the cycle timing allows it.
    ///
    /// The request is silently dropped when `period` is too short to fit
    /// rise, hold and fall.
    pub fn start_blink(&mut self) {
        let cycle_min = self.rise_time.as_millis()
            + self.on_time.as_millis()
            + self.fall_time.as_millis();
        if self.period.as_millis() >= cycle_min {
            self.blink = true;
        }
    }

    /// Disable blinking. The channel settles wherever the current ramp ends.
    pub fn stop_blink(&mut self) {
        self.blink = false;
    }

    /// Advance the state machine to `now` and return the channel brightness.
    ///
    /// The result is always within `[0, max_level]`.
    pub fn advance(&mut self, now: Instant) -> u8 {
        match self.state {
            DimmerState::Off => {
                if self.blink && now >= self.next_event {
                    self.next_event = now + self.rise_time;
                    self.state = DimmerState::Rising;
                }
                0
            }
            DimmerState::Rising => {
                if now < self.next_event {
                    self.ramp_level(now, self.rise_time)
                } else {
                    self.next_event = now + self.idle_time();
                    self.state = DimmerState::On;
                    self.max_level
                }
            }
            DimmerState::On => {
                if self.blink && now >= self.next_event {
                    self.next_event = now + self.fall_time;
                    self.state = DimmerState::Falling;
                }
                self.max_level
            }
            DimmerState::Falling => {
                if now < self.next_event {
                    self.max_level - self.ramp_level(now, self.fall_time)
                } else {
                    self.next_event = now + self.idle_time();
                    self.state = DimmerState::Off;
                    0
                }
            }
        }
    }

    /// Milliseconds until the current ramp completes, zero if already due.
    fn remaining_ms(&self, now: Instant) -> u64 {
        self.next_event.as_millis().saturating_sub(now.as_millis())
    }

    /// Interpolated ramp progress scaled to `max_level`.
    ///
    /// Only called while `now < next_event`, so the elapsed share of the
    /// ramp is strictly less than `ramp` and the result below `max_level`.
    fn ramp_level(&self, now: Instant, ramp: Duration) -> u8 {
        let ramp = ramp.as_millis();
        let elapsed = ramp.saturating_sub(self.remaining_ms(now));
        (u64::from(self.max_level) * elapsed / ramp) as u8
    }

    /// Dark span of the blink cycle: `period - on_time - rise_time - fall_time`.
    ///
    /// Saturates at zero when `period` is shorter than the active span;
    /// blinking cannot be enabled in that regime, so the stale deadline is
    /// never consulted.
    fn idle_time(&self) -> Duration {
        let active = self.rise_time.as_millis()
            + self.on_time.as_millis()
            + self.fall_time.as_millis();
        Duration::from_millis(self.period.as_millis().saturating_sub(active))
    }
}

impl Default for LightDimmer {
    fn default() -> Self {
        Self::new()
    }
}
