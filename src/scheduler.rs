//! Refresh scheduling and transmission.
//!
//! Owns the dimmer array and the output driver, and decides when the
//! brightness buffer is pushed out. The caller polls from its own loop and
//! passes the current time in; nothing here blocks or sleeps.

use embassy_time::{Duration, Instant};

use crate::array::DimmerArray;
use crate::command::{CommandProcessor, CommandReceiver};
use crate::OutputDriver;

/// Drives a [`DimmerArray`] and transmits its buffer through an
/// [`OutputDriver`].
///
/// `CAP` is the channel capacity, `QUEUE` the command queue size.
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandQueue<8> = CommandQueue::new();
/// let mut scheduler: RefreshScheduler<_, 12, 8> =
///     RefreshScheduler::new(COMMANDS.receiver(), driver, 10);
///
/// loop {
///     scheduler.update_throttled(Instant::now(), Duration::from_millis(20));
/// }
/// ```
pub struct RefreshScheduler<'a, O: OutputDriver, const CAP: usize, const QUEUE: usize> {
    output: O,
    commands: CommandProcessor<'a, QUEUE>,
    array: DimmerArray<CAP>,
    next_refresh: Instant,
}

impl<'a, O: OutputDriver, const CAP: usize, const QUEUE: usize>
    RefreshScheduler<'a, O, CAP, QUEUE>
{
    /// Create a scheduler bound to an output driver.
    ///
    /// `requested_channels` is rounded up to whole chips by
    /// [`DimmerArray::new`]. The driver binding is fixed for the scheduler's
    /// lifetime.
    pub fn new(
        commands: CommandReceiver<'a, QUEUE>,
        driver: O,
        requested_channels: usize,
    ) -> Self {
        Self {
            output: driver,
            commands: CommandProcessor::new(commands),
            array: DimmerArray::new(requested_channels),
            next_refresh: Instant::from_millis(0),
        }
    }

    /// Run one refresh tick: drain pending commands, advance every channel,
    /// and transmit the whole buffer.
    pub fn update(&mut self, now: Instant) {
        self.commands.process_pending(&mut self.array, now);
        let frame = self.array.refresh(now);
        self.output.write(frame);
    }

    /// Throttled variant of [`update`](Self::update).
    ///
    /// Performs the refresh-and-transmit cycle only once the previous
    /// `refresh_period` has elapsed, capping the output protocol rate
    /// independently of how fast the caller polls. Returns whether a
    /// transmission happened.
    pub fn update_throttled(&mut self, now: Instant, refresh_period: Duration) -> bool {
        if now < self.next_refresh {
            return false;
        }
        self.next_refresh = now + refresh_period;
        self.update(now);
        true
    }

    /// Get a reference to the bound output driver.
    pub fn driver(&self) -> &O {
        &self.output
    }

    /// Get a reference to the dimmer array.
    pub fn array(&self) -> &DimmerArray<CAP> {
        &self.array
    }

    /// Get a mutable reference to the dimmer array, for direct per-channel
    /// configuration.
    pub fn array_mut(&mut self) -> &mut DimmerArray<CAP> {
        &mut self.array
    }
}
