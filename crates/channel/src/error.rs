// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("no collector endpoint is configured")]
    NoEndpointsConfigured,
    #[error("failed to build transport endpoint {0:?}: {1}")]
    InvalidEndpoint(String, #[source] tonic::transport::Error),
    #[error("failed to connect to {0:?}: {1}")]
    ConnectFailed(String, #[source] tonic::transport::Error),
    #[error("DNS resolution of {0:?} failed: {1}")]
    DnsResolutionFailed(String, #[source] std::io::Error),
}

/// A transport-layer error is network-class when its status code is one of
/// `UNAVAILABLE`, `PERMISSION_DENIED`, `UNAUTHENTICATED`, `RESOURCE_EXHAUSTED`,
/// `UNKNOWN`. All other codes leave channel state unchanged.
pub fn is_network_error(status: &tonic::Status) -> bool {
    use tonic::Code;
    matches!(
        status.code(),
        Code::Unavailable | Code::PermissionDenied | Code::Unauthenticated | Code::ResourceExhausted | Code::Unknown
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::{Code, Status};

    #[test]
    fn classifies_network_class_codes() {
        for code in [Code::Unavailable, Code::PermissionDenied, Code::Unauthenticated, Code::ResourceExhausted, Code::Unknown]
        {
            assert!(is_network_error(&Status::new(code, "x")), "{code:?} should be network-class");
        }
    }

    #[test]
    fn other_codes_are_not_network_class() {
        for code in [Code::InvalidArgument, Code::NotFound, Code::Ok, Code::DeadlineExceeded] {
            assert!(!is_network_error(&Status::new(code, "x")), "{code:?} should not be network-class");
        }
    }
}
