use embassy_executor::Spawner;
use embassy_net::{
    Ipv4Address,
    Ipv4Cidr,
    Runner,
    Stack,
    StackResources,
    StaticConfigV4,
    udp::{PacketMetadata, UdpSocket},
};
use embassy_time::{Duration, Timer};
use esp_hal::{peripherals::WIFI, rng::Rng};
use esp_radio::{
    Controller,
    wifi::{AccessPointConfig, AuthMethod, Config, ModeConfig, WifiController, WifiDevice},
};
use ledbtn_core::net::dhcp::{DHCP_CLIENT_PORT, DHCP_SERVER_PORT, handle_packet};
use log::{debug, error, info, warn};

use crate::{
    config::{HTTP_LISTENERS, WifiApConfig},
    mk_static,
};

/// HTTP listeners plus the DHCP socket
const MAX_SOCKETS: usize = HTTP_LISTENERS + 2;

/// Bring up the soft access point and its network stack.
///
/// The board owns a static address and hands out leases to stations itself.
/// Returns once the link is up and the DHCP server is running.
///
/// # Panics
///
/// Panics if the radio cannot be initialized. Nothing can be served without
/// it, so the board resets through the panic handler.
pub async fn start_wifi_ap(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    config: &'static WifiApConfig,
) -> Stack<'static> {
    let esp_radio_ctrl: &'static Controller<'static> = mk_static!(
        Controller<'static>,
        esp_radio::init().expect("radio init failed")
    );
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .expect("wifi init failed");

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(config.ip_address, config.prefix_len),
        gateway: Some(config.ip_address),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let network_resources = mk_static!(
        StackResources<MAX_SOCKETS>,
        StackResources::<MAX_SOCKETS>::new()
    );
    let (stack, runner) =
        embassy_net::new(interfaces.ap, net_config, network_resources, stack_seed());

    spawner.spawn(wifi_ap_task(controller, config)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }
    Timer::after(Duration::from_millis(100)).await;

    spawner
        .spawn(dhcp_server_task(stack, config.ip_address))
        .ok();

    stack
}

/// Random seed for the network stack (TCP sequence numbers, ports)
fn stack_seed() -> u64 {
    let rng = Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}

/// Keeps the access point configured and running
#[embassy_executor::task]
async fn wifi_ap_task(
    mut controller: WifiController<'static>,
    config: &'static WifiApConfig,
) {
    let auth_method = if config.password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WpaWpa2Personal
    };
    let ap_config = AccessPointConfig::default()
        .with_ssid(config.ssid.into())
        .with_password(config.password.into())
        .with_auth_method(auth_method)
        .with_channel(config.channel)
        .with_max_connections(config.max_connections);

    if let Err(e) = controller.set_config(&ModeConfig::AccessPoint(ap_config)) {
        error!("wifi_ap: failed to configure AP: {:?}", e);
        return;
    }
    if let Err(e) = controller.start_async().await {
        error!("wifi_ap: failed to start AP: {:?}", e);
        return;
    }
    info!(
        "wifi_ap: AP '{}' up on channel {} ({:?})",
        config.ssid, config.channel, auth_method
    );

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Stateless DHCP server
///
/// Leases are derived from the client MAC, so no table is kept.
#[embassy_executor::task]
async fn dhcp_server_task(stack: Stack<'static>, server_ip: Ipv4Address) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    if let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        error!("dhcp_server: failed to bind port {}: {:?}", DHCP_SERVER_PORT, e);
        return;
    }
    info!("dhcp_server: listening on port {}", DHCP_SERVER_PORT);

    let mut packet = [0u8; 576];

    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => len,
            Err(e) => {
                warn!("dhcp_server: recv error: {:?}", e);
                continue;
            }
        };

        let Some(reply) = handle_packet(server_ip, &mut packet, len) else {
            continue;
        };
        debug!(
            "dhcp_server: {} to {:02x?} (type {})",
            reply.offered_ip, reply.client_mac, reply.message_type
        );

        let dest = (Ipv4Address::BROADCAST, DHCP_CLIENT_PORT);
        if let Err(e) = socket.send_to(&packet[..reply.len], dest).await {
            warn!("dhcp_server: send error: {:?}", e);
        }
    }
}
