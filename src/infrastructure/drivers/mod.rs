mod gpio;
pub mod wifi_ap;

pub use gpio::EspGpio;
pub use wifi_ap::start_wifi_ap;
