//! Record and query types of the online listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Field a search text is matched against.
///
/// Anything that does not name a known field parses as `None`, which
/// disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchCategory {
    #[default]
    None,
    Username,
    Nickname,
    Email,
    Group,
    MacAddr,
    Ip,
    RemoteAddr,
}

impl SearchCategory {
    pub fn parse(value: &str) -> Self {
        match value {
            "username" => SearchCategory::Username,
            "nickname" => SearchCategory::Nickname,
            "email" => SearchCategory::Email,
            "group" => SearchCategory::Group,
            "mac_addr" => SearchCategory::MacAddr,
            "ip" => SearchCategory::Ip,
            "remote_addr" => SearchCategory::RemoteAddr,
            _ => SearchCategory::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::None => "",
            SearchCategory::Username => "username",
            SearchCategory::Nickname => "nickname",
            SearchCategory::Email => "email",
            SearchCategory::Group => "group",
            SearchCategory::MacAddr => "mac_addr",
            SearchCategory::Ip => "ip",
            SearchCategory::RemoteAddr => "remote_addr",
        }
    }
}

impl From<&str> for SearchCategory {
    fn from(value: &str) -> Self {
        SearchCategory::parse(value)
    }
}

/// Transport a connection is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportProtocol {
    /// TLS stream only.
    #[serde(rename = "TCP")]
    Tcp,
    /// DTLS datagram channel established.
    #[serde(rename = "UDP")]
    Udp,
}

/// One row of the online listing.
///
/// Fully owned: nothing in it points back into the registry, so it stays
/// valid and unchanged after the query returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Online {
    pub token: String,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub group: String,
    pub mac_addr: String,
    pub unique_mac: bool,
    /// Tunnel address; `None` when the session had no connection binding.
    pub ip: Option<IpAddr>,
    pub remote_addr: String,
    pub transport_protocol: TransportProtocol,
    pub tun_name: String,
    pub mtu: u32,
    pub client: String,
    pub bandwidth_up: String,
    pub bandwidth_down: String,
    pub bandwidth_up_all: String,
    pub bandwidth_down_all: String,
    pub last_login: DateTime<Utc>,
}

impl Online {
    /// Raw address bytes: 4 for IPv4, 16 for IPv6, none without an address.
    pub fn ip_octets(&self) -> Vec<u8> {
        match self.ip {
            Some(IpAddr::V4(v4)) => v4.octets().to_vec(),
            Some(IpAddr::V6(v6)) => v6.octets().to_vec(),
            None => Vec::new(),
        }
    }
}
