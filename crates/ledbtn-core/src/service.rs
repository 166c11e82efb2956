//! Request handlers
//!
//! Every state-producing handler ends the same way: re-drive all output pins
//! from the registry, sample the buttons, render. A missed or interleaved pin
//! write is therefore corrected by the next response.
//!
//! Malformed parameters never produce an error response. The mutation is
//! skipped, a warning is logged and the current state is returned.

use log::{debug, error, warn};

use crate::{
    channel::Channel,
    gpio::{GpioPort, Level},
    query::{SetAllParams, SetOutputParams},
    registry::OutputRegistry,
    sampler::InputSampler,
    state::{RenderedState, render},
};

pub struct IoService<'a, G: GpioPort> {
    registry: &'a OutputRegistry,
    gpio: &'a G,
}

impl<'a, G: GpioPort> IoService<'a, G> {
    pub const fn new(registry: &'a OutputRegistry, gpio: &'a G) -> Self {
        Self { registry, gpio }
    }

    /// The control page, byte for byte.
    pub fn serve_page(&self) -> &'static [u8] {
        ledbtn_control_page::CONTROL_PAGE_HTML
    }

    /// Current outputs and a fresh input sample.
    pub fn read_state(&self) -> RenderedState {
        self.current_state()
    }

    /// Handle `/set?led=N&state=0|1`.
    pub fn set_output(&self, query: Option<&str>) -> RenderedState {
        match SetOutputParams::parse(query) {
            Some(SetOutputParams { channel, on }) => {
                debug!("io: led {} -> {}", channel.index(), u8::from(on));
                self.registry.set(channel, on);
                self.drive(channel, on);
            }
            None => warn!("io: ignoring /set with query {:?}", query),
        }
        self.current_state()
    }

    /// Handle `/all?state=0|1`.
    pub fn set_all_outputs(&self, query: Option<&str>) -> RenderedState {
        match SetAllParams::parse(query) {
            Some(SetAllParams { on }) => {
                debug!("io: all leds -> {}", u8::from(on));
                for channel in Channel::all() {
                    self.registry.set(channel, on);
                    self.drive(channel, on);
                }
            }
            None => warn!("io: ignoring /all with query {:?}", query),
        }
        self.current_state()
    }

    fn current_state(&self) -> RenderedState {
        let outputs = self.registry.get_all();
        for channel in Channel::all() {
            self.drive(channel, outputs[channel.slot()]);
        }
        let inputs = InputSampler::new(self.gpio).read_all();
        render(outputs, inputs)
    }

    fn drive(&self, channel: Channel, on: bool) {
        if let Err(e) = self.gpio.write(channel.output_pin(), Level::from(on)) {
            error!("io: failed to drive led {}: {:?}", channel.index(), e);
        }
    }
}
