//! Twitter REST calls over an injected [`Transport`].
//!
//! [`Client`] resolves overloaded positional arguments into request
//! parameters, sends them through its transport and turns the decoded bodies
//! into `twitter-model` entities. Covered here:
//! - list calls, including chunked member batches and cursored collections
//! - help calls
//! - spam reporting

pub mod args;
pub mod batch;
mod client;
mod config;
mod error;
mod help;
mod lists;
pub mod merge;
mod resolver;
mod spam;
pub mod transport;

pub use args::{Arg, Arguments};
pub use client::{Client, Pager};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use lists::{ListCursor, UserCursor};
pub use resolver::{ArgumentResolver, CallShape, CurrentUser, ResolvedCall};
pub use transport::{Method, Params, Transport};
