//! Fixed-capacity array of dimmer channels with its brightness buffer.

use embassy_time::Instant;
use heapless::Vec;

use crate::dimmer::LightDimmer;

/// Channels driven by one WS2811 chip.
pub const CHANNELS_PER_CHIP: usize = 3;

/// An owned, fixed-length sequence of [`LightDimmer`] channels and the
/// brightness buffer transmitted to the driver chips.
///
/// `CAP` is the compile-time capacity; the runtime length is chosen once at
/// construction and never changes. The buffer keeps the last computed value
/// for every channel between refreshes, in 1:1 positional correspondence
/// with the channels.
#[derive(Debug, Default)]
pub struct DimmerArray<const CAP: usize> {
    channels: Vec<LightDimmer, CAP>,
    levels: Vec<u8, CAP>,
}

impl<const CAP: usize> DimmerArray<CAP> {
    /// Allocate `requested` channels, rounded up to the next multiple of 3
    /// so whole WS2811 chips are always addressed.
    ///
    /// The rounded count is capped at the largest multiple of 3 that fits
    /// `CAP`. All channels start Off; the buffer starts zeroed.
    pub fn new(requested: usize) -> Self {
        let ceiling = CAP - CAP % CHANNELS_PER_CHIP;
        let count = (requested.div_ceil(CHANNELS_PER_CHIP) * CHANNELS_PER_CHIP).min(ceiling);

        let mut channels = Vec::new();
        let mut levels = Vec::new();
        for _ in 0..count {
            let _ = channels.push(LightDimmer::new());
            let _ = levels.push(0);
        }
        Self { channels, levels }
    }

    /// Number of allocated channels. Always a multiple of 3.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of physical driver chips covered by this array.
    pub fn chip_count(&self) -> usize {
        self.channels.len() / CHANNELS_PER_CHIP
    }

    /// Bounds-checked access to a channel.
    pub fn get(&self, index: usize) -> Option<&LightDimmer> {
        self.channels.get(index)
    }

    /// Bounds-checked mutable access to a channel.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut LightDimmer> {
        self.channels.get_mut(index)
    }

    /// The brightness buffer as of the last refresh.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Advance every channel to `now`, in index order, and return the
    /// refreshed brightness buffer.
    pub fn refresh(&mut self, now: Instant) -> &[u8] {
        for (dimmer, level) in self.channels.iter_mut().zip(self.levels.iter_mut()) {
            *level = dimmer.advance(now);
        }
        &self.levels
    }
}
