//! Output registry
//!
//! Holds what the four LEDs *should* be. The physical pins only mirror it.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::channel::{CHANNEL_COUNT, Channel};

/// Authoritative on/off state of the output channels.
///
/// Every cell is an independent atomic, so request handlers running in
/// different tasks can read and write without a lock. There is no
/// cross-channel atomicity: `set_all` is four single-cell stores.
pub struct OutputRegistry {
    cells: [AtomicBool; CHANNEL_COUNT],
}

impl OutputRegistry {
    /// Create a registry with every output off
    pub const fn new() -> Self {
        Self {
            cells: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
        }
    }

    pub fn get(&self, channel: Channel) -> bool {
        self.cells[channel.slot()].load(Ordering::SeqCst)
    }

    pub fn set(&self, channel: Channel, on: bool) {
        self.cells[channel.slot()].store(on, Ordering::SeqCst);
    }

    /// Snapshot of all outputs, channel 1 first.
    pub fn get_all(&self) -> [bool; CHANNEL_COUNT] {
        core::array::from_fn(|slot| self.cells[slot].load(Ordering::SeqCst))
    }

    pub fn set_all(&self, on: bool) {
        for cell in &self.cells {
            cell.store(on, Ordering::SeqCst);
        }
    }
}

impl Default for OutputRegistry {
    fn default() -> Self {
        Self::new()
    }
}
