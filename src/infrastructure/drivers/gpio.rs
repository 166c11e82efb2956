use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use esp_hal::gpio::{self, Input, Output};
use ledbtn_core::{CHANNEL_COUNT, Channel, GpioError, GpioPort, Level, PinId};

type SharedOutput = Mutex<CriticalSectionRawMutex, RefCell<Output<'static>>>;
type SharedInput = Mutex<CriticalSectionRawMutex, Input<'static>>;

/// Board GPIO behind the [`GpioPort`] seam.
///
/// Slots follow channel order: `outputs[0]` drives channel 1 and so on.
/// Every pin access is a short critical section, so concurrent handlers
/// never interleave on the same register.
pub struct EspGpio {
    outputs: [SharedOutput; CHANNEL_COUNT],
    inputs: [SharedInput; CHANNEL_COUNT],
}

impl EspGpio {
    pub fn new(
        outputs: [Output<'static>; CHANNEL_COUNT],
        inputs: [Input<'static>; CHANNEL_COUNT],
    ) -> Self {
        Self {
            outputs: outputs.map(|pin| Mutex::new(RefCell::new(pin))),
            inputs: inputs.map(Mutex::new),
        }
    }
}

impl GpioPort for EspGpio {
    fn write(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        let channel = Channel::all()
            .find(|channel| channel.output_pin() == pin)
            .ok_or(GpioError::UnknownPin(pin))?;
        self.outputs[channel.slot()].lock(|output| {
            output.borrow_mut().set_level(to_hal_level(level));
        });
        Ok(())
    }

    fn read(&self, pin: PinId) -> Result<Level, GpioError> {
        let channel = Channel::all()
            .find(|channel| channel.input_pin() == pin)
            .ok_or(GpioError::UnknownPin(pin))?;
        let level = self.inputs[channel.slot()].lock(Input::level);
        Ok(from_hal_level(level))
    }
}

fn to_hal_level(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

fn from_hal_level(level: gpio::Level) -> Level {
    match level {
        gpio::Level::Low => Level::Low,
        gpio::Level::High => Level::High,
    }
}
