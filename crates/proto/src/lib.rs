// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generated wire types and client/server stubs for
//! `ConfigurationDiscoveryService` (see `proto/discovery.proto`).

#![allow(clippy::derive_partial_eq_without_eq)]

/// Generated protobuf message and service types.
pub mod pb {
    tonic::include_proto!("corvid.discovery.v1");
}

pub use pb::{
    configuration_discovery_service_client::ConfigurationDiscoveryServiceClient,
    configuration_discovery_service_server::{
        ConfigurationDiscoveryService, ConfigurationDiscoveryServiceServer,
    },
    Command, Commands, ConfigurationSyncRequest, KeyStringValuePair,
};

/// Reserved `args` key carrying a command's dedup serial number.
pub const SERIAL_NUMBER_KEY: &str = "SerialNumber";

/// Reserved `args` key carrying the sync cursor to echo on the next round.
pub const UUID_KEY: &str = "UUID";
