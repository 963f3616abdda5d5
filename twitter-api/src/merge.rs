//! Folding positional identifiers into request parameters.
//!
//! Each identifier slot owns a group of keys (`user_id`/`screen_name`,
//! `list_id`/`slug`, `owner_id`/`owner_screen_name`). When the caller's
//! options already hold any key of a group, the positional value for that
//! group is dropped.

use crate::args::Arg;
use crate::error::{ApiError, ApiResult};
use crate::transport::Params;
use serde_json::Value;
use twitter_model::Identified;
use twitter_types::Id;

pub const USER_KEYS: [&str; 2] = ["user_id", "screen_name"];
pub const OWNER_KEYS: [&str; 2] = ["owner_id", "owner_screen_name"];
pub const LIST_KEYS: [&str; 2] = ["list_id", "slug"];

/// True when `params` holds any of `keys`.
pub fn has_any(params: &Params, keys: &[&str]) -> bool {
    keys.iter().any(|key| params.contains_key(*key))
}

fn id_value(id: &Id) -> Value {
    match id {
        Id::Num(n) => Value::from(*n),
        Id::Str(s) => Value::from(s.as_str()),
    }
}

fn merge_identity(params: &mut Params, keys: [&str; 2], arg: Option<Arg>, slot: &str) -> ApiResult<()> {
    let [id_key, name_key] = keys;
    if has_any(params, &keys) {
        return Ok(());
    }
    match arg {
        None => {}
        Some(Arg::Id(id)) => {
            params.insert(id_key.to_string(), Value::from(id));
        }
        Some(Arg::Name(name)) => {
            params.insert(name_key.to_string(), Value::from(name));
        }
        Some(Arg::User(user)) => {
            params.insert(id_key.to_string(), id_value(user.id()));
        }
        Some(other) => {
            return Err(ApiError::InvalidArguments(format!(
                "expected a {slot} id, name or entity, got {other:?}"
            )));
        }
    }
    Ok(())
}

/// Merges a user: id → `user_id`, name → `screen_name`, entity → its id.
pub fn merge_user(params: &mut Params, user: Option<Arg>) -> ApiResult<()> {
    merge_identity(params, USER_KEYS, user, "user")
}

/// Merges a list owner: id → `owner_id`, name → `owner_screen_name`.
pub fn merge_owner(params: &mut Params, owner: Option<Arg>) -> ApiResult<()> {
    merge_identity(params, OWNER_KEYS, owner, "owner")
}

/// Merges a list: id → `list_id`, name → `slug`, entity → its id plus its
/// owner.
pub fn merge_list(params: &mut Params, list: Option<Arg>) -> ApiResult<()> {
    match list {
        Some(Arg::List(list)) => {
            if !has_any(params, &LIST_KEYS) {
                params.insert("list_id".to_string(), id_value(list.id()));
            }
            let owner = list.user()?.cloned().map(Arg::User);
            merge_owner(params, owner)
        }
        Some(Arg::User(user)) => Err(ApiError::InvalidArguments(format!(
            "expected a list, got user {}",
            user.id()
        ))),
        other => merge_identity(params, LIST_KEYS, other, "list"),
    }
}

/// A copy of `params` with `users` partitioned into comma-joined `user_id`
/// and `screen_name` groups.
pub fn merge_users(params: &Params, users: &[Arg]) -> ApiResult<Params> {
    let mut ids = Vec::new();
    let mut names = Vec::new();
    for user in users {
        match user {
            Arg::Id(id) => ids.push(id.to_string()),
            Arg::Name(name) => names.push(name.clone()),
            Arg::User(user) => ids.push(user.id().to_string()),
            other => {
                return Err(ApiError::InvalidArguments(format!(
                    "expected a user id, name or entity, got {other:?}"
                )));
            }
        }
    }

    let mut merged = params.clone();
    if !ids.is_empty() {
        merged
            .entry("user_id")
            .or_insert_with(|| Value::from(ids.join(",")));
    }
    if !names.is_empty() {
        merged
            .entry("screen_name")
            .or_insert_with(|| Value::from(names.join(",")));
    }
    Ok(merged)
}

/// A copy of `params` with one user merged in.
pub fn with_user(params: &Params, user: Arg) -> ApiResult<Params> {
    let mut merged = params.clone();
    merge_user(&mut merged, Some(user))?;
    Ok(merged)
}
