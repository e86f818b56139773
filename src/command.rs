//! Command queue for driving dimmer channels from another context.
//!
//! Control code (interrupt handlers, other tasks) pushes [`DimmerCommand`]s
//! into a bounded [`CommandQueue`]; the refresh scheduler drains them on each
//! update. Synchronization uses critical sections, so senders may run from
//! interrupt context.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::array::DimmerArray;
use crate::dimmer::DimmerConfig;

/// What to do with a channel.
#[derive(Debug, Clone, Copy)]
pub enum DimmerAction {
    /// Fade the channel in.
    On,
    /// Fade the channel out.
    Off,
    /// Enable blinking (honored only if the cycle timing fits).
    StartBlink,
    /// Disable blinking.
    StopBlink,
    /// Jump to full brightness at the given ceiling, without a ramp.
    ForceFull(u8),
    /// Replace the channel's timing parameters.
    Configure(DimmerConfig),
}

/// A [`DimmerAction`] addressed to one channel by index.
#[derive(Debug, Clone, Copy)]
pub struct DimmerCommand {
    pub channel: usize,
    pub action: DimmerAction,
}

/// Error returned when trying to send to a full queue.
///
/// Carries the rejected command back to the sender.
#[derive(Debug, Clone, Copy)]
pub struct TrySendError(pub DimmerCommand);

/// A bounded, interrupt-safe queue of dimmer commands.
///
/// Backed by a fixed-size `heapless::Deque` behind a critical-section mutex.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<DimmerCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// Multiple senders can coexist; they share the same queue.
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Get a receiver handle for this queue.
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    fn try_send(&self, command: DimmerCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(TrySendError)
        })
    }

    fn try_receive(&self) -> Option<DimmerCommand> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Try to enqueue a command.
    ///
    /// Returns `Err(TrySendError(command))` if the queue is full.
    pub fn try_send(&self, command: DimmerCommand) -> Result<(), TrySendError> {
        self.queue.try_send(command)
    }
}

/// A receiver handle for a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Try to dequeue a command. Returns `None` if the queue is empty.
    pub fn try_receive(&self) -> Option<DimmerCommand> {
        self.queue.try_receive()
    }
}

/// Drains pending commands and applies them to a dimmer array.
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    /// Create a processor draining the given receiver.
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Apply all pending commands to the array (non-blocking).
    ///
    /// Commands addressing a channel outside the array are dropped.
    pub fn process_pending<const CAP: usize>(
        &mut self,
        array: &mut DimmerArray<CAP>,
        now: Instant,
    ) {
        while let Some(command) = self.commands.try_receive() {
            let Some(dimmer) = array.get_mut(command.channel) else {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[CommandProcessor] dropping command for unknown channel {}",
                    command.channel
                );
                continue;
            };
            match command.action {
                DimmerAction::On => dimmer.turn_on(now),
                DimmerAction::Off => dimmer.turn_off(now),
                DimmerAction::StartBlink => dimmer.start_blink(),
                DimmerAction::StopBlink => dimmer.stop_blink(),
                DimmerAction::ForceFull(max_level) => dimmer.force_full(max_level, now),
                DimmerAction::Configure(config) => dimmer.configure(&config),
            }
        }
    }
}
