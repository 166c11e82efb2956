#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_println::println;
use ledbtn_core::{IoService, OutputRegistry};
use ledbtn_server::{
    config::{ACCESS_POINT, HTTP, HTTP_LISTENERS},
    controllers::IoHttpController,
    infrastructure::{
        drivers::{EspGpio, start_wifi_ap},
        tasks::http_server_task,
        types::IoServiceImpl,
    },
    io_pins,
    mk_static,
};
use log::info;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    println!("ledbtn-server: booting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // LEDs come up LOW, matching the fresh registry
    let (leds, buttons) = io_pins!(peripherals);
    let registry = mk_static!(OutputRegistry, OutputRegistry::new());
    let gpio = mk_static!(EspGpio, EspGpio::new(leds, buttons));
    let service = mk_static!(IoServiceImpl, IoService::new(registry, gpio));
    let controller: &'static IoHttpController =
        mk_static!(IoHttpController, IoHttpController::new(service));

    let stack = start_wifi_ap(spawner, peripherals.WIFI, &ACCESS_POINT).await;

    for _ in 0..HTTP_LISTENERS {
        spawner.spawn(http_server_task(stack, controller)).ok();
    }
    info!(
        "app: control panel at http://{}:{}/ on '{}'",
        ACCESS_POINT.ip_address, HTTP.port, ACCESS_POINT.ssid
    );

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
