//! Help calls: service configuration, supported languages and policy texts.

use crate::client::Client;
use crate::error::ApiResult;
use crate::transport::{Method, Params, Transport};
use serde_json::Value;
use std::sync::Arc;
use twitter_model::{Configuration, Language};
use twitter_types::Error;

impl<T: Transport> Client<T> {
    /// Current service limits: reserved characters, photo sizes, short URL
    /// lengths and so on.
    pub async fn configuration(&self, options: Params) -> ApiResult<Arc<Configuration>> {
        self.object(Method::Get, "/1.1/help/configuration.json", options).await
    }

    pub async fn languages(&self, options: Params) -> ApiResult<Vec<Arc<Language>>> {
        self.objects(Method::Get, "/1.1/help/languages.json", options).await
    }

    /// The privacy policy text.
    pub async fn privacy(&self, options: Params) -> ApiResult<String> {
        self.text_field("/1.1/help/privacy.json", "privacy", options).await
    }

    /// The terms of service text.
    pub async fn tos(&self, options: Params) -> ApiResult<String> {
        self.text_field("/1.1/help/tos.json", "tos", options).await
    }

    async fn text_field(&self, path: &str, field: &str, options: Params) -> ApiResult<String> {
        let body = self.request(Method::Get, path, options).await?;
        match body.get(field) {
            Some(Value::String(text)) => Ok(text.clone()),
            _ => Err(Error::missing(field).into()),
        }
    }
}
