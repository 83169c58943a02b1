// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instance-name synthesis for the highest-priority boot service.
//!
//! When `CORVID_INSTANCE_NAME` is absent at boot, the agent needs a stable
//! per-process identity to report to the collector. `<uuid-without-dashes>@<ipv4>`
//! mirrors what a restart-tolerant but not persisted identity should look
//! like: unique per process start, and still useful to a human scanning logs.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Build `<uuid-without-dashes>@<ipv4>`. Falls back to `0.0.0.0` if the local
/// address can't be determined (e.g. no network interfaces at all).
pub fn synthesize_instance_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{id}@{}", local_ipv4())
}

fn local_ipv4() -> Ipv4Addr {
    // Doesn't actually send anything; connect() on a UDP socket just binds
    // the local route without a wire round-trip.
    let probe = || -> std::io::Result<Ipv4Addr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect("8.8.8.8:80")?;
        match socket.local_addr()?.ip() {
            IpAddr::V4(v4) => Ok(v4),
            IpAddr::V6(_) => Ok(Ipv4Addr::UNSPECIFIED),
        }
    };
    probe().unwrap_or(Ipv4Addr::UNSPECIFIED)
}
