// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The owned handle to an active transport connection.

use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::error::ChannelError;

/// An active transport connection to one collector endpoint. Built lazily
/// (`connect_lazy`): the first RPC on it drives the actual TCP/TLS handshake,
/// so construction itself never blocks on the network.
pub struct ManagedChannel {
    endpoint: String,
    channel: Channel,
}

impl ManagedChannel {
    /// Builds a channel to `endpoint` (`host:port`), selecting TLS vs
    /// plaintext transport at build time per `use_tls`.
    pub fn connect(endpoint: &str, use_tls: bool) -> Result<Self, ChannelError> {
        let uri = if use_tls { format!("https://{endpoint}") } else { format!("http://{endpoint}") };
        let mut builder = Endpoint::from_shared(uri).map_err(|e| ChannelError::InvalidEndpoint(endpoint.to_string(), e))?;
        if use_tls {
            builder = builder
                .tls_config(ClientTlsConfig::new())
                .map_err(|e| ChannelError::InvalidEndpoint(endpoint.to_string(), e))?;
        }
        let channel = builder.connect_lazy();
        Ok(Self { endpoint: endpoint.to_string(), channel })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_lazy_succeeds_without_a_reachable_peer() {
        let chan = ManagedChannel::connect("127.0.0.1:1", false).unwrap();
        assert_eq!(chan.endpoint(), "127.0.0.1:1");
    }
}
