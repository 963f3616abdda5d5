use crate::entity::{Entity, IdentityKey, Identified, id_equality, require_id};
use crate::lazy::{self, Lazy};
use crate::user::User;
use crate::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use twitter_types::{Attrs, Id, Result};

#[derive(Debug)]
pub struct DirectMessage {
    ctx: Context,
    attrs: Attrs,
    id: Id,
    sender: Lazy<Option<Arc<User>>>,
    recipient: Lazy<Option<Arc<User>>>,
}

impl DirectMessage {
    pub fn text(&self) -> Option<&str> {
        self.attrs.get_str("text")
    }

    /// Direct messages are never truncated, so this is [`text`](Self::text).
    pub fn full_text(&self) -> Option<&str> {
        self.text()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        twitter_types::created_at(&self.attrs)
    }

    pub fn sender(&self) -> Result<Option<&Arc<User>>> {
        let sender = self
            .sender
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "sender"))?;
        Ok(sender.as_ref())
    }

    pub fn recipient(&self) -> Result<Option<&Arc<User>>> {
        let recipient = self
            .recipient
            .get_or_try_init(|| lazy::one(&self.ctx, &self.attrs, "recipient"))?;
        Ok(recipient.as_ref())
    }
}

impl Entity for DirectMessage {
    const KIND: &'static str = "DirectMessage";

    fn from_attrs(ctx: &Context, attrs: Attrs) -> Result<Self> {
        let id = require_id(&attrs)?;
        Ok(Self {
            ctx: ctx.clone(),
            attrs,
            id,
            sender: Lazy::new(),
            recipient: Lazy::new(),
        })
    }

    fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    fn key_of(attrs: &Attrs) -> Option<IdentityKey> {
        IdentityKey::id(attrs)
    }
}

impl Identified for DirectMessage {
    fn id(&self) -> &Id {
        &self.id
    }
}

id_equality!(DirectMessage);
