//! JSON rendering of the board state
//!
//! The wire document is `{"leds":[..4],"btns":[..4]}` with every element
//! `0` or `1`, channel 1 first.

use heapless::Vec;
use serde::Serialize;

use crate::channel::CHANNEL_COUNT;

/// Capacity of a rendered document.
///
/// The fixed schema renders to 35 bytes.
pub const STATE_DOCUMENT_SIZE: usize = 64;

/// Rendered JSON body.
pub type RenderedState = Vec<u8, STATE_DOCUMENT_SIZE>;

#[derive(Debug, Clone, Serialize)]
struct StateDocument {
    leds: [u8; CHANNEL_COUNT],
    btns: [u8; CHANNEL_COUNT],
}

impl StateDocument {
    fn new(outputs: [bool; CHANNEL_COUNT], inputs: [bool; CHANNEL_COUNT]) -> Self {
        Self {
            leds: outputs.map(u8::from),
            btns: inputs.map(u8::from),
        }
    }
}

/// Render outputs and inputs into the state document.
pub fn render(outputs: [bool; CHANNEL_COUNT], inputs: [bool; CHANNEL_COUNT]) -> RenderedState {
    let document = StateDocument::new(outputs, inputs);
    match serde_json_core::to_vec(&document) {
        Ok(body) => body,
        // Eight single digit integers always fit.
        Err(_) => unreachable!("state document exceeds {} bytes", STATE_DOCUMENT_SIZE),
    }
}
