// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound call decoration: instance-name header, then bearer auth header,
//! applied in that order to every outbound RPC.

use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Inserts the agent identifier header, then (if configured) a bearer
/// authentication header, on every outgoing request.
#[derive(Clone)]
pub struct HeaderDecorator {
    instance_name: String,
    auth_token: Option<String>,
}

impl HeaderDecorator {
    pub fn new(instance_name: String, auth_token: Option<String>) -> Self {
        Self { instance_name, auth_token }
    }
}

impl Interceptor for HeaderDecorator {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let agent_id = self
            .instance_name
            .parse()
            .map_err(|_| Status::invalid_argument("instance name is not a valid header value"))?;
        request.metadata_mut().insert("x-agent-id", agent_id);

        if let Some(token) = &self.auth_token {
            let value = format!("Bearer {token}")
                .parse()
                .map_err(|_| Status::invalid_argument("auth token is not a valid header value"))?;
            request.metadata_mut().insert("authorization", value);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_agent_id_and_auth_headers_in_order() {
        let mut decorator = HeaderDecorator::new("abc@1.2.3.4".to_string(), Some("tok".to_string()));
        let req = decorator.call(Request::new(())).unwrap();
        assert_eq!(req.metadata().get("x-agent-id").unwrap().to_str().unwrap(), "abc@1.2.3.4");
        assert_eq!(req.metadata().get("authorization").unwrap().to_str().unwrap(), "Bearer tok");
    }

    #[test]
    fn omits_auth_header_when_no_token_configured() {
        let mut decorator = HeaderDecorator::new("abc@1.2.3.4".to_string(), None);
        let req = decorator.call(Request::new(())).unwrap();
        assert!(req.metadata().get("authorization").is_none());
    }
}
