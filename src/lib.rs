#![no_std]

pub mod array;
pub mod command;
pub mod dimmer;
pub mod driver;
pub mod scheduler;

pub use array::{CHANNELS_PER_CHIP, DimmerArray};
pub use command::{
    CommandProcessor, CommandQueue, CommandReceiver, CommandSender, DimmerAction, DimmerCommand,
    TrySendError,
};
pub use dimmer::{DimmerConfig, DimmerState, LightDimmer};
pub use driver::SmartLedsOutput;
pub use scheduler::RefreshScheduler;

pub use embassy_time::{Duration, Instant};

/// Abstract brightness output driver
///
/// Implement this trait to support different hardware platforms. The refresh
/// scheduler is generic over this trait, so the timing logic never touches
/// hardware addressing directly.
///
/// Contract: `write` transmits one byte per channel, in index order, to
/// `levels.len() / 3` driver chips. The transmission is timing-critical and
/// must complete uninterrupted; it has no error channel.
pub trait OutputDriver {
    /// Write brightness levels to the LED chips
    fn write(&mut self, levels: &[u8]);
}
