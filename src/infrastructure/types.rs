use ledbtn_core::IoService;

use crate::infrastructure::drivers::EspGpio;

pub type IoServiceImpl = IoService<'static, EspGpio>;
