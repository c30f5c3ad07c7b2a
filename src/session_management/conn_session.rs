//! Live transport binding of a session.
//!
//! A [`ConnSession`] exists while a client has an established tunnel. Its
//! addressing fields are written once by the runtime when the tunnel comes
//! up; the bandwidth counters keep changing for as long as traffic flows and
//! can be read at any instant without holding any lock.

use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

/// Handle of the secondary datagram (DTLS) channel of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtlsSession {
    /// Hex-encoded DTLS session identifier.
    pub session_id: String,
    /// When the datagram channel was established.
    pub established_at: DateTime<Utc>,
}

/// Four traffic counters updated by the connection's I/O loops.
///
/// Each counter is an independent atomic. A [`BandwidthSnapshot`] is four
/// separate loads, so the values may come from slightly different instants.
#[derive(Debug, Default)]
pub struct BandwidthCounters {
    up_period: AtomicU64,
    down_period: AtomicU64,
    up_all: AtomicU64,
    down_all: AtomicU64,
}

/// Point-in-time copy of [`BandwidthCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandwidthSnapshot {
    /// Bytes sent by the client during the current measurement period.
    pub up_period: u64,
    /// Bytes sent to the client during the current measurement period.
    pub down_period: u64,
    /// Bytes sent by the client since the connection started.
    pub up_all: u64,
    /// Bytes sent to the client since the connection started.
    pub down_all: u64,
}

impl BandwidthCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts `bytes` received from the client.
    pub fn record_up(&self, bytes: u64) {
        self.up_period.fetch_add(bytes, Ordering::Relaxed);
        self.up_all.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Accounts `bytes` sent to the client.
    pub fn record_down(&self, bytes: u64) {
        self.down_period.fetch_add(bytes, Ordering::Relaxed);
        self.down_all.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Starts a new measurement period. Cumulative totals are untouched.
    pub fn reset_period(&self) {
        self.up_period.store(0, Ordering::Relaxed);
        self.down_period.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BandwidthSnapshot {
        BandwidthSnapshot {
            up_period: self.up_period.load(Ordering::Relaxed),
            down_period: self.down_period.load(Ordering::Relaxed),
            up_all: self.up_all.load(Ordering::Relaxed),
            down_all: self.down_all.load(Ordering::Relaxed),
        }
    }
}

/// Transport binding attached to a session while the client is connected.
///
/// `ConnSession::default()` is the zero-valued binding: no address, empty
/// strings, zero MTU and counters, no DTLS channel.
#[derive(Debug, Default)]
pub struct ConnSession {
    /// Address assigned to the client inside the tunnel.
    pub ip_addr: Option<IpAddr>,
    /// Client endpoint as observed by the server (`ip:port`).
    pub remote_addr: String,
    /// Name of the local virtual interface carrying this connection.
    pub if_name: String,
    /// Negotiated MTU.
    pub mtu: u32,
    /// Free-form client identification (user agent, version).
    pub client: String,
    pub bandwidth: BandwidthCounters,
    dtls: Mutex<Option<Arc<DtlsSession>>>,
}

impl ConnSession {
    pub fn new(
        ip_addr: IpAddr,
        remote_addr: impl Into<String>,
        if_name: impl Into<String>,
        mtu: u32,
        client: impl Into<String>,
    ) -> Self {
        Self {
            ip_addr: Some(ip_addr),
            remote_addr: remote_addr.into(),
            if_name: if_name.into(),
            mtu,
            client: client.into(),
            bandwidth: BandwidthCounters::new(),
            dtls: Mutex::new(None),
        }
    }

    /// Attaches or detaches the datagram channel.
    pub fn set_dtls_session(&self, dtls: Option<Arc<DtlsSession>>) {
        let mut slot = self.dtls.lock().unwrap_or_else(|e| e.into_inner());
        *slot = dtls;
    }

    pub fn dtls_session(&self) -> Option<Arc<DtlsSession>> {
        self.dtls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
