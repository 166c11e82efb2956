use log::error;

use crate::{
    channel::{CHANNEL_COUNT, Channel},
    gpio::{GpioPort, Level},
};

/// Level reported for a button whose pin could not be read.
///
/// Buttons are pulled up, so HIGH is the idle (released) level.
const FALLBACK_LEVEL: Level = Level::High;

/// Reads the button inputs straight from the hardware.
///
/// No caching and no debouncing: every call samples the pins again.
pub struct InputSampler<'a, G: GpioPort> {
    gpio: &'a G,
}

impl<'a, G: GpioPort> InputSampler<'a, G> {
    pub const fn new(gpio: &'a G) -> Self {
        Self { gpio }
    }

    /// Instantaneous level of every input, channel 1 first (HIGH = `true`).
    pub fn read_all(&self) -> [bool; CHANNEL_COUNT] {
        let mut levels = [FALLBACK_LEVEL.is_high(); CHANNEL_COUNT];
        for channel in Channel::all() {
            levels[channel.slot()] = self.read(channel).is_high();
        }
        levels
    }

    fn read(&self, channel: Channel) -> Level {
        self.gpio
            .read(channel.input_pin())
            .unwrap_or_else(|e| {
                error!("io: failed to read button {}: {:?}", channel.index(), e);
                FALLBACK_LEVEL
            })
    }
}
