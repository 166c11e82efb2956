//! DHCP Protocol Implementation
//!
//! Message parsing and reply building for the stateless server that hands
//! out addresses on the access point subnet. Leases are not tracked: a
//! client always gets the address derived from its MAC.

use core::net::Ipv4Addr;

/// DHCP server and client ports
pub const DHCP_SERVER_PORT: u16 = 67;
pub const DHCP_CLIENT_PORT: u16 = 68;

/// DHCP message types
pub const DHCP_DISCOVER: u8 = 1;
pub const DHCP_OFFER: u8 = 2;
pub const DHCP_REQUEST: u8 = 3;
pub const DHCP_ACK: u8 = 5;

/// DHCP options
const DHCP_OPTION_SUBNET_MASK: u8 = 1;
const DHCP_OPTION_ROUTER: u8 = 3;
const DHCP_OPTION_DNS: u8 = 6;
const DHCP_OPTION_LEASE_TIME: u8 = 51;
const DHCP_OPTION_MESSAGE_TYPE: u8 = 53;
const DHCP_OPTION_SERVER_ID: u8 = 54;
const DHCP_OPTION_END: u8 = 255;

/// DHCP magic cookie
const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

/// Lease configuration
const LEASE_TIME_SECS: u32 = 3600; // 1 hour
const SUBNET_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// BOOTP header + magic cookie
const MIN_DHCP_PACKET_SIZE: usize = 240;

/// Header plus the options written by [`build_dhcp_response`]
const REPLY_SIZE: usize = MIN_DHCP_PACKET_SIZE + 3 + 5 * 6 + 1;

/// Host part range handed out to clients
const FIRST_CLIENT_HOST: u8 = 2;
const CLIENT_HOSTS: u8 = 49;

/// Parsed DHCP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpRequest {
    /// Transaction ID
    pub xid: [u8; 4],
    /// Client MAC address
    pub client_mac: [u8; 6],
    /// Message type (DISCOVER, REQUEST, etc.)
    pub message_type: u8,
}

/// Summary of a reply written by [`handle_packet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpReply {
    pub len: usize,
    pub message_type: u8,
    pub client_mac: [u8; 6],
    pub offered_ip: Ipv4Addr,
}

/// Parse a DHCP request from a raw packet
///
/// Returns `None` if the packet is invalid or not a BOOTREQUEST
pub fn parse_dhcp_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < MIN_DHCP_PACKET_SIZE {
        return None;
    }

    // op must be BOOTREQUEST
    if packet[0] != 1 {
        return None;
    }

    if packet[236..240] != DHCP_MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);

    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let message_type = find_dhcp_option(&packet[240..], DHCP_OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Allocate an IP address for a client based on its MAC address
///
/// The address lives in the server's /24 with a host part in 2..=50.
pub fn allocate_ip(server_ip: Ipv4Addr, mac: &[u8; 6]) -> Ipv4Addr {
    let [a, b, c, _] = server_ip.octets();
    Ipv4Addr::new(a, b, c, (mac[5] % CLIENT_HOSTS) + FIRST_CLIENT_HOST)
}

/// Build a DHCP response (OFFER or ACK)
///
/// Returns the length of the response packet, or `None` when the buffer
/// cannot hold it.
pub fn build_dhcp_response(
    server_ip: Ipv4Addr,
    buffer: &mut [u8],
    request: &DhcpRequest,
    offered_ip: Ipv4Addr,
    response_type: u8,
) -> Option<usize> {
    if buffer.len() < REPLY_SIZE {
        return None;
    }
    buffer.fill(0);

    // BOOTP header
    buffer[0] = 2; // op: BOOTREPLY
    buffer[1] = 1; // htype: Ethernet
    buffer[2] = 6; // hlen: MAC length
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&[0x80, 0x00]); // broadcast flag
    buffer[16..20].copy_from_slice(&offered_ip.octets()); // yiaddr
    buffer[20..24].copy_from_slice(&server_ip.octets()); // siaddr
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);

    let mut opt_idx = MIN_DHCP_PACKET_SIZE;

    buffer[opt_idx..opt_idx + 3].copy_from_slice(&[DHCP_OPTION_MESSAGE_TYPE, 1, response_type]);
    opt_idx += 3;

    // The AP is also the router and the DNS server of its subnet.
    for (code, value) in [
        (DHCP_OPTION_SERVER_ID, server_ip.octets()),
        (DHCP_OPTION_LEASE_TIME, LEASE_TIME_SECS.to_be_bytes()),
        (DHCP_OPTION_SUBNET_MASK, SUBNET_MASK.octets()),
        (DHCP_OPTION_ROUTER, server_ip.octets()),
        (DHCP_OPTION_DNS, server_ip.octets()),
    ] {
        buffer[opt_idx] = code;
        buffer[opt_idx + 1] = 4;
        buffer[opt_idx + 2..opt_idx + 6].copy_from_slice(&value);
        opt_idx += 6;
    }

    buffer[opt_idx] = DHCP_OPTION_END;
    opt_idx += 1;

    Some(opt_idx)
}

/// Answer the request held in `packet[..len]`, writing the reply in place.
///
/// DISCOVER gets an OFFER, REQUEST gets an ACK; anything else is ignored.
pub fn handle_packet(server_ip: Ipv4Addr, packet: &mut [u8], len: usize) -> Option<DhcpReply> {
    let request = parse_dhcp_request(packet.get(..len)?)?;
    let message_type = match request.message_type {
        DHCP_DISCOVER => DHCP_OFFER,
        DHCP_REQUEST => DHCP_ACK,
        _ => return None,
    };
    let offered_ip = allocate_ip(server_ip, &request.client_mac);
    let len = build_dhcp_response(server_ip, packet, &request, offered_ip, message_type)?;

    Some(DhcpReply {
        len,
        message_type,
        client_mac: request.client_mac,
        offered_ip,
    })
}

/// Find a DHCP option in the options section
///
/// The options slice should start AFTER the magic cookie (at offset 240 in the
/// packet)
fn find_dhcp_option(options: &[u8], option_code: u8) -> Option<&[u8]> {
    let mut i = 0;

    while i < options.len() {
        let code = options[i];
        if code == DHCP_OPTION_END {
            break;
        }
        if code == 0 {
            // Padding
            i += 1;
            continue;
        }
        if i + 1 >= options.len() {
            break;
        }
        let len = options[i + 1] as usize;
        if i + 2 + len > options.len() {
            break;
        }
        if code == option_code {
            return Some(&options[i + 2..i + 2 + len]);
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);
    const MAC: [u8; 6] = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];

    fn request_packet(message_type: u8) -> [u8; 576] {
        let mut packet = [0u8; 576];
        packet[0] = 1;
        packet[1] = 1;
        packet[2] = 6;
        packet[4..8].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        packet[28..34].copy_from_slice(&MAC);
        packet[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);
        // pad, message type, end
        packet[240] = 0;
        packet[241..244].copy_from_slice(&[DHCP_OPTION_MESSAGE_TYPE, 1, message_type]);
        packet[244] = DHCP_OPTION_END;
        packet
    }

    #[test]
    fn parses_discover() {
        let packet = request_packet(DHCP_DISCOVER);
        let request = parse_dhcp_request(&packet[..245]).unwrap();

        assert_eq!(request.xid, [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(request.client_mac, MAC);
        assert_eq!(request.message_type, DHCP_DISCOVER);
    }

    #[test]
    fn rejects_malformed_packets() {
        let packet = request_packet(DHCP_DISCOVER);
        assert_eq!(parse_dhcp_request(&packet[..100]), None);

        let mut reply = packet;
        reply[0] = 2;
        assert_eq!(parse_dhcp_request(&reply), None);

        let mut no_cookie = packet;
        no_cookie[236] = 0;
        assert_eq!(parse_dhcp_request(&no_cookie), None);

        let mut no_type = packet;
        no_type[241] = DHCP_OPTION_END;
        assert_eq!(parse_dhcp_request(&no_type), None);
    }

    #[test]
    fn allocates_stable_address_in_server_subnet() {
        let ip = allocate_ip(SERVER, &MAC);
        assert_eq!(ip, allocate_ip(SERVER, &MAC));
        assert_eq!(ip.octets()[..3], [192, 168, 4]);
        for last in 0..=u8::MAX {
            let host = allocate_ip(SERVER, &[0, 0, 0, 0, 0, last]).octets()[3];
            assert!((2..=50).contains(&host));
        }
    }

    #[test]
    fn answers_discover_with_offer_and_request_with_ack() {
        for (incoming, expected) in [(DHCP_DISCOVER, DHCP_OFFER), (DHCP_REQUEST, DHCP_ACK)] {
            let mut packet = request_packet(incoming);
            let reply = handle_packet(SERVER, &mut packet, 245).unwrap();

            assert_eq!(reply.message_type, expected);
            assert_eq!(reply.client_mac, MAC);
            assert_eq!(reply.len, REPLY_SIZE);
            assert_eq!(packet[0], 2);
            assert_eq!(packet[4..8], [0xDE, 0xAD, 0xBE, 0xEF]);
            assert_eq!(packet[16..20], reply.offered_ip.octets());
            assert_eq!(packet[20..24], SERVER.octets());
            assert_eq!(
                find_dhcp_option(&packet[240..reply.len], DHCP_OPTION_MESSAGE_TYPE),
                Some(&[expected][..])
            );
            assert_eq!(
                find_dhcp_option(&packet[240..reply.len], DHCP_OPTION_ROUTER),
                Some(&SERVER.octets()[..])
            );
        }
    }

    #[test]
    fn ignores_other_message_types() {
        let mut packet = request_packet(7); // RELEASE
        assert_eq!(handle_packet(SERVER, &mut packet, 245), None);
    }

    #[test]
    fn refuses_short_reply_buffer() {
        let packet = request_packet(DHCP_DISCOVER);
        let request = parse_dhcp_request(&packet).unwrap();
        let mut buffer = [0u8; 250];
        assert_eq!(
            build_dhcp_response(SERVER, &mut buffer, &request, SERVER, DHCP_OFFER),
            None
        );
    }
}
