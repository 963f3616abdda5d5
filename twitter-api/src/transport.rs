//! The request seam.
//!
//! Connection handling, request signing and status mapping all live behind
//! [`Transport`]; this crate only builds paths and parameters and decodes the
//! JSON that comes back.

use crate::error::ApiResult;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Request parameters, serialized by the transport.
pub type Params = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs one signed request and returns the decoded response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform_request(&self, method: Method, path: &str, params: Params) -> ApiResult<Value>;
}

/// A scripted transport for tests and offline use.
pub mod mock {
    use super::{Method, Params, Transport};
    use crate::error::ApiResult;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::{Mutex, PoisonError};

    /// One request as the mock saw it.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Request {
        pub method: Method,
        pub path: String,
        pub params: Params,
    }

    type Responder = Box<dyn Fn(&Request) -> ApiResult<Value> + Send + Sync>;

    /// Answers every request with `responder` and records it.
    pub struct MockTransport {
        responder: Responder,
        requests: Mutex<Vec<Request>>,
    }

    impl MockTransport {
        pub fn new(responder: impl Fn(&Request) -> ApiResult<Value> + Send + Sync + 'static) -> Self {
            Self {
                responder: Box::new(responder),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Answers every request with a clone of `body`.
        pub fn returning(body: Value) -> Self {
            Self::new(move |_| Ok(body.clone()))
        }

        /// Every request received so far, in arrival order.
        pub fn requests(&self) -> Vec<Request> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn perform_request(&self, method: Method, path: &str, params: Params) -> ApiResult<Value> {
            let request = Request {
                method,
                path: path.to_string(),
                params,
            };
            let response = (self.responder)(&request);
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            response
        }
    }
}
