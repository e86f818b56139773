//! Output driver adapter for `smart-leds` strips.

use smart_leds::{RGB8, SmartLedsWrite};

use crate::OutputDriver;

/// Adapts any [`SmartLedsWrite`] implementation into an [`OutputDriver`].
///
/// Each WS2811 chip drives 3 independent channels through its R, G and B
/// outputs, so consecutive triples of brightness bytes are packed into one
/// pixel. Write errors are discarded: the transmission contract has no
/// failure channel.
pub struct SmartLedsOutput<S> {
    strip: S,
}

impl<S> SmartLedsOutput<S> {
    pub const fn new(strip: S) -> Self {
        Self { strip }
    }

    /// Consume the adapter and return the wrapped strip.
    pub fn into_inner(self) -> S {
        self.strip
    }
}

impl<S> OutputDriver for SmartLedsOutput<S>
where
    S: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, levels: &[u8]) {
        let pixels = levels
            .chunks_exact(3)
            .map(|chip| RGB8::new(chip[0], chip[1], chip[2]));
        let _ = self.strip.write(pixels);
    }
}
