use embassy_net::Ipv4Address;
use embassy_time::Duration;

pub struct WifiApConfig {
    pub ssid: &'static str,
    /// Empty passphrase opens the network
    pub password: &'static str,
    pub channel: u8,
    pub max_connections: u16,
    pub ip_address: Ipv4Address,
    pub prefix_len: u8,
}

pub struct HttpConfig {
    pub port: u16,
    pub socket_timeout: Duration,
}

/// Number of sockets accepting HTTP connections in parallel.
pub const HTTP_LISTENERS: usize = 4;

pub const ACCESS_POINT: WifiApConfig = WifiApConfig {
    ssid: match option_env!("AP_SSID") {
        Some(ssid) => ssid,
        None => "ESP32_LAB",
    },
    password: match option_env!("AP_PASSWORD") {
        Some(password) => password,
        None => "12345678",
    },
    channel: 1,
    max_connections: 4,
    ip_address: Ipv4Address::new(192, 168, 4, 1),
    prefix_len: 24,
};

pub const HTTP: HttpConfig = HttpConfig {
    port: 80,
    socket_timeout: Duration::from_secs(5),
};

/// Configure the board I/O and return `(leds, buttons)`.
///
/// LEDs are push-pull outputs starting LOW, buttons are pulled-up inputs.
/// Pin order matches the channel tables in `ledbtn_core::pins`.
#[macro_export]
macro_rules! io_pins {
    ($p:expr) => {{
        use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};

        let button = || InputConfig::default().with_pull(Pull::Up);
        (
            [
                Output::new($p.GPIO17, Level::Low, OutputConfig::default()),
                Output::new($p.GPIO5, Level::Low, OutputConfig::default()),
                Output::new($p.GPIO18, Level::Low, OutputConfig::default()),
                Output::new($p.GPIO19, Level::Low, OutputConfig::default()),
            ],
            [
                Input::new($p.GPIO13, button()),
                Input::new($p.GPIO12, button()),
                Input::new($p.GPIO14, button()),
                Input::new($p.GPIO27, button()),
            ],
        )
    }};
}
