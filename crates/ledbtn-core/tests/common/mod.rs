use std::{collections::HashMap, sync::Mutex};

use ledbtn_core::{GpioError, GpioPort, Level, PinId, input_pin, output_pin};

/// In-memory GPIO bank wired like the real board.
///
/// Outputs remember the last written level, inputs idle HIGH (pull-up) until a
/// test presses them.
pub struct FakeGpio {
    levels: Mutex<HashMap<PinId, Level>>,
}

impl FakeGpio {
    pub fn new() -> Self {
        let mut levels = HashMap::new();
        for index in 1..=4 {
            levels.insert(output_pin(index).unwrap(), Level::Low);
            levels.insert(input_pin(index).unwrap(), Level::High);
        }
        Self {
            levels: Mutex::new(levels),
        }
    }

    pub fn press(&self, button: u8) {
        self.set(input_pin(button).unwrap(), Level::Low);
    }

    pub fn release(&self, button: u8) {
        self.set(input_pin(button).unwrap(), Level::High);
    }

    /// Simulate a pin that lost its level behind the registry's back.
    pub fn force_led(&self, led: u8, level: Level) {
        self.set(output_pin(led).unwrap(), level);
    }

    pub fn led_levels(&self) -> [Level; 4] {
        let levels = self.levels.lock().unwrap();
        core::array::from_fn(|i| levels[&output_pin(i as u8 + 1).unwrap()])
    }

    fn set(&self, pin: PinId, level: Level) {
        self.levels.lock().unwrap().insert(pin, level);
    }
}

impl GpioPort for FakeGpio {
    fn write(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        let mut levels = self.levels.lock().unwrap();
        match levels.get_mut(&pin) {
            Some(current) => {
                *current = level;
                Ok(())
            }
            None => Err(GpioError::UnknownPin(pin)),
        }
    }

    fn read(&self, pin: PinId) -> Result<Level, GpioError> {
        self.levels
            .lock()
            .unwrap()
            .get(&pin)
            .copied()
            .ok_or(GpioError::UnknownPin(pin))
    }
}

pub fn body(state: &[u8]) -> &str {
    std::str::from_utf8(state).unwrap()
}
