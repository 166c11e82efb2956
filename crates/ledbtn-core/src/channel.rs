//! Channel index shared by the outputs and the inputs.

/// Number of output channels and of input channels.
pub const CHANNEL_COUNT: usize = 4;

/// A validated 1-based channel index (1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from its 1-based index.
    ///
    /// Returns `None` for anything outside `1..=CHANNEL_COUNT`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= CHANNEL_COUNT as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The 1-based index of the channel.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Zero-based position, used to address per-channel arrays.
    pub const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }

    /// All channels in ascending order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn all() -> impl Iterator<Item = Channel> {
        (1..=CHANNEL_COUNT as u8).map(Channel)
    }
}
