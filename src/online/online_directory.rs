//! Query, filter and projection engine of the online listing.
//!
//! [`OnlineDirectory`] walks the session registry and produces one
//! [`Online`] row per visible session, enriched with directory attributes
//! and sorted by tunnel address.
//!
//! Locking
//! - The directory pre-pass runs first and takes its own registry and
//!   session locks, releasing them before the store lookup.
//! - The registry lock is then held for the whole enumeration.
//! - Each session lock is held only while that session is read.
//! - Bandwidth counters are read lock-free; the four values of one row may
//!   come from slightly different instants.

use std::borrow::Cow;
use std::sync::Arc;

use log::debug;

use crate::directory::{resolve_user_info, DirectoryStore, UserExtraInfo};
use crate::online::human_byte::human_byte;
use crate::online::ordering::{sort_onlines, IpOrdering};
use crate::online::types::{Online, SearchCategory, TransportProtocol};
use crate::session_management::{ConnSession, SessionRegistry, SessionState};

/// Read-only view over the session registry for operator listings.
pub struct OnlineDirectory {
    registry: Arc<SessionRegistry>,
    store: Arc<dyn DirectoryStore>,
    ip_ordering: IpOrdering,
}

impl OnlineDirectory {
    pub fn new(registry: Arc<SessionRegistry>, store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            registry,
            store,
            ip_ordering: IpOrdering::default(),
        }
    }

    pub fn with_ip_ordering(mut self, ip_ordering: IpOrdering) -> Self {
        self.ip_ordering = ip_ordering;
        self
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Every active session, unfiltered.
    pub fn list_active(&self) -> Vec<Online> {
        self.list_sessions(SearchCategory::None, "", false)
    }

    /// Lists sessions whose `category` field contains `text`.
    ///
    /// Matching is a case-sensitive substring test. A blank `text` disables
    /// the search whatever the category. Sleepers are only listed when
    /// `include_sleepers` is set.
    pub fn list_sessions(
        &self,
        category: SearchCategory,
        text: &str,
        include_sleepers: bool,
    ) -> Vec<Online> {
        let category = if text.trim().is_empty() {
            SearchCategory::None
        } else {
            category
        };

        let user_info = resolve_user_info(&self.registry, self.store.as_ref());

        let placeholder = ConnSession::default();
        let no_info = UserExtraInfo::default();
        let mut onlines = Vec::new();
        {
            let sessions = self.registry.lock();
            for session in sessions.values() {
                let state = session.lock();
                let conn = state.conn.as_deref().unwrap_or(&placeholder);
                let info = user_info.get(&state.username).unwrap_or(&no_info);

                if category != SearchCategory::None
                    && !compare_text(category, &state, conn, info).contains(text)
                {
                    continue;
                }
                if !include_sleepers && !state.is_active {
                    continue;
                }

                onlines.push(project(session.token(), &state, conn, info));
            }
        }

        sort_onlines(&mut onlines, self.ip_ordering);
        debug!(
            "Listed {} session(s) (category={:?}, sleepers={})",
            onlines.len(),
            category.as_str(),
            include_sleepers
        );
        onlines
    }
}

fn compare_text<'a>(
    category: SearchCategory,
    state: &'a SessionState,
    conn: &'a ConnSession,
    info: &'a UserExtraInfo,
) -> Cow<'a, str> {
    match category {
        SearchCategory::Username => Cow::Borrowed(&state.username),
        SearchCategory::Nickname => Cow::Borrowed(&info.nickname),
        SearchCategory::Email => Cow::Borrowed(&info.email),
        SearchCategory::Group => Cow::Borrowed(&state.group),
        SearchCategory::MacAddr => Cow::Borrowed(&state.mac_addr),
        SearchCategory::Ip => match conn.ip_addr {
            Some(ip) => Cow::Owned(ip.to_string()),
            None => Cow::Borrowed(""),
        },
        SearchCategory::RemoteAddr => Cow::Borrowed(&conn.remote_addr),
        SearchCategory::None => Cow::Borrowed(""),
    }
}

fn project(token: &str, state: &SessionState, conn: &ConnSession, info: &UserExtraInfo) -> Online {
    let transport_protocol = if conn.dtls_session().is_some() {
        TransportProtocol::Udp
    } else {
        TransportProtocol::Tcp
    };
    let bandwidth = conn.bandwidth.snapshot();

    Online {
        token: token.to_string(),
        username: state.username.clone(),
        nickname: info.nickname.clone(),
        email: info.email.clone(),
        group: state.group.clone(),
        mac_addr: state.mac_addr.clone(),
        unique_mac: state.unique_mac,
        ip: conn.ip_addr,
        remote_addr: conn.remote_addr.clone(),
        transport_protocol,
        tun_name: conn.if_name.clone(),
        mtu: conn.mtu,
        client: conn.client.clone(),
        bandwidth_up: format!("{}/s", human_byte(bandwidth.up_period)),
        bandwidth_down: format!("{}/s", human_byte(bandwidth.down_period)),
        bandwidth_up_all: human_byte(bandwidth.up_all),
        bandwidth_down_all: human_byte(bandwidth.down_all),
        last_login: state.last_login,
    }
}
