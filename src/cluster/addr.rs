//! Peer address validation.

/// Reports whether `addr` is `host:port`, where host is `localhost` or a dotted
/// IPv4 address with every octet in `0..=255`.
pub fn check_addr(addr: &str) -> bool {
    let mut parts = addr.split(':');
    let (Some(host), Some(port), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if port.parse::<u16>().is_err() {
        return false;
    }
    if host == "localhost" {
        return true;
    }

    let octets: Vec<&str> = host.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| o.parse::<u8>().is_ok())
}
