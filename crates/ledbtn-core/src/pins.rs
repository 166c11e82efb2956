//! Channel to GPIO lookup tables.
//!
//! LEDs sit on GPIO 17, 5, 18, 19 and buttons on GPIO 13, 12, 14, 27
//! (ESP32 DevKit wiring). The tables are fixed for the lifetime of the
//! firmware and never overlap.

use crate::channel::{CHANNEL_COUNT, Channel};

/// Physical GPIO number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(u8);

impl PinId {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Raw GPIO number
    pub const fn number(self) -> u8 {
        self.0
    }
}

pub(crate) const OUTPUT_PINS: [PinId; CHANNEL_COUNT] =
    [PinId(17), PinId(5), PinId(18), PinId(19)];

pub(crate) const INPUT_PINS: [PinId; CHANNEL_COUNT] =
    [PinId(13), PinId(12), PinId(14), PinId(27)];

impl Channel {
    /// GPIO driving the LED of this channel.
    pub const fn output_pin(self) -> PinId {
        OUTPUT_PINS[self.slot()]
    }

    /// GPIO sensing the button of this channel.
    pub const fn input_pin(self) -> PinId {
        INPUT_PINS[self.slot()]
    }
}

/// Output pin for a raw 1-based index, `None` outside 1..=4.
pub const fn output_pin(index: u8) -> Option<PinId> {
    match Channel::new(index) {
        Some(channel) => Some(channel.output_pin()),
        None => None,
    }
}

/// Input pin for a raw 1-based index, `None` outside 1..=4.
pub const fn input_pin(index: u8) -> Option<PinId> {
    match Channel::new(index) {
        Some(channel) => Some(channel.input_pin()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_board_wiring() {
        let outputs: Vec<u8> = (1..=4)
            .map(|i| output_pin(i).unwrap().number())
            .collect();
        let inputs: Vec<u8> = (1..=4)
            .map(|i| input_pin(i).unwrap().number())
            .collect();

        assert_eq!(outputs, vec![17, 5, 18, 19]);
        assert_eq!(inputs, vec![13, 12, 14, 27]);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        for index in [0, 5, 42, u8::MAX] {
            assert_eq!(output_pin(index), None);
            assert_eq!(input_pin(index), None);
        }
    }

    #[test]
    fn tables_are_bijective_and_disjoint() {
        for (i, a) in OUTPUT_PINS.iter().enumerate() {
            for b in &OUTPUT_PINS[i + 1..] {
                assert_ne!(a, b);
            }
            assert!(!INPUT_PINS.contains(a));
        }
        for (i, a) in INPUT_PINS.iter().enumerate() {
            for b in &INPUT_PINS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
