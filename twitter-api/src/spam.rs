//! Spam reporting.

use crate::args::{Arg, Arguments};
use crate::client::Client;
use crate::error::ApiResult;
use crate::merge;
use crate::transport::{Method, Transport};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;
use twitter_model::User;

impl<T: Transport> Client<T> {
    /// Reports each user as a spammer and blocks them.
    ///
    /// One request is sent per user, concurrently. The reported users come
    /// back in argument order; any failed report fails the call.
    pub async fn report_spam(&self, args: Vec<Arg>) -> ApiResult<Vec<Arc<User>>> {
        let mut arguments = Arguments::new(args);
        let options = arguments.take_options();
        let users = arguments.flatten();
        debug!(users = users.len(), "reporting spam");

        let requests = users
            .into_iter()
            .map(|user| merge::with_user(&options, user))
            .collect::<ApiResult<Vec<_>>>()?;
        try_join_all(
            requests
                .into_iter()
                .map(|params| self.object::<User>(Method::Post, "/1.1/users/report_spam.json", params)),
        )
        .await
    }
}
