use serde::Deserialize;
use std::net::IpAddr;

use crate::online::types::Online;

/// How listing rows are ordered by tunnel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpOrdering {
    /// Byte-lexicographic over the raw address bytes. IPv4 (4 bytes) and
    /// IPv6 (16 bytes) are compared as-is, so mixed families do not follow
    /// numeric address order. Rows without an address come first.
    #[default]
    Raw,
    /// IPv4 is widened to its IPv4-mapped IPv6 form before comparing, so
    /// every address compares as 16 bytes.
    Canonical,
}

/// Sorts `onlines` in place. Rows with equal keys keep their input order.
pub fn sort_onlines(onlines: &mut [Online], ordering: IpOrdering) {
    match ordering {
        IpOrdering::Raw => onlines.sort_by_cached_key(|o| o.ip_octets()),
        IpOrdering::Canonical => onlines.sort_by_cached_key(|o| canonical_octets(o.ip)),
    }
}

fn canonical_octets(ip: Option<IpAddr>) -> Vec<u8> {
    match ip {
        Some(IpAddr::V4(v4)) => v4.to_ipv6_mapped().octets().to_vec(),
        Some(IpAddr::V6(v6)) => v6.octets().to_vec(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::online::types::TransportProtocol;
    use chrono::Utc;

    fn row(token: &str, ip: Option<&str>) -> Online {
        Online {
            token: token.into(),
            username: String::new(),
            nickname: String::new(),
            email: String::new(),
            group: String::new(),
            mac_addr: String::new(),
            unique_mac: false,
            ip: ip.map(|s| s.parse().unwrap()),
            remote_addr: String::new(),
            transport_protocol: TransportProtocol::Tcp,
            tun_name: String::new(),
            mtu: 0,
            client: String::new(),
            bandwidth_up: String::new(),
            bandwidth_down: String::new(),
            bandwidth_up_all: String::new(),
            bandwidth_down_all: String::new(),
            last_login: Utc::now(),
        }
    }

    fn tokens(rows: &[Online]) -> Vec<&str> {
        rows.iter().map(|r| r.token.as_str()).collect()
    }

    #[test]
    fn test_raw_orders_same_family_numerically() {
        let mut rows = vec![
            row("c", Some("10.0.0.20")),
            row("a", Some("10.0.0.3")),
            row("b", Some("10.0.0.5")),
            row("none", None),
        ];
        sort_onlines(&mut rows, IpOrdering::Raw);
        assert_eq!(tokens(&rows), vec!["none", "a", "b", "c"]);
    }

    #[test]
    fn test_raw_keeps_mixed_family_byte_quirk() {
        // The first IPv4 octet is compared against the first IPv6 octet.
        let mut rows = vec![row("v4", Some("10.0.0.1")), row("v6", Some("fd00::1"))];
        sort_onlines(&mut rows, IpOrdering::Raw);
        assert_eq!(tokens(&rows), vec!["v4", "v6"]);

        let mut rows = vec![row("v4", Some("254.0.0.1")), row("v6", Some("fd00::1"))];
        sort_onlines(&mut rows, IpOrdering::Raw);
        assert_eq!(tokens(&rows), vec!["v6", "v4"]);
    }

    #[test]
    fn test_canonical_orders_ipv4_before_ula_ipv6() {
        let mut rows = vec![row("v4", Some("254.0.0.1")), row("v6", Some("fd00::1"))];
        sort_onlines(&mut rows, IpOrdering::Canonical);
        assert_eq!(tokens(&rows), vec!["v4", "v6"]);

        let mut rows = vec![row("v6", Some("::1")), row("v4", Some("10.0.0.1"))];
        sort_onlines(&mut rows, IpOrdering::Canonical);
        assert_eq!(tokens(&rows), vec!["v6", "v4"]);
    }

    #[test]
    fn test_ordering_parses_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            ip_ordering: IpOrdering,
        }
        let w: Wrapper = toml::from_str("ip_ordering = \"canonical\"").unwrap();
        assert_eq!(w.ip_ordering, IpOrdering::Canonical);
    }

    #[test]
    fn test_equal_addresses_keep_input_order() {
        let mut rows = vec![
            row("b1", Some("10.0.0.9")),
            row("n1", None),
            row("a1", Some("10.0.0.1")),
            row("b2", Some("10.0.0.9")),
            row("n2", None),
            row("a2", Some("10.0.0.1")),
        ];
        sort_onlines(&mut rows, IpOrdering::Raw);
        assert_eq!(tokens(&rows), vec!["n1", "n2", "a1", "a2", "b1", "b2"]);

        sort_onlines(&mut rows, IpOrdering::Canonical);
        assert_eq!(tokens(&rows), vec!["n1", "n2", "a1", "a2", "b1", "b2"]);
    }
}
