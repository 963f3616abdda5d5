//! `created_at` parsing shared by every entity that records a creation time.

use crate::{Attrs, Error, Result};
use chrono::{DateTime, Utc};

/// The format the REST API uses: `Mon Jul 16 12:59:01 +0000 2007`.
const TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parses a creation timestamp.
///
/// Accepts the REST API's own format and falls back to RFC 3339 and
/// RFC 2822, which the search and streaming endpoints have used.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(raw, TWITTER_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))
}

/// Returns the entity's `created_at` time, or `None` when it is absent or
/// unparseable.
pub fn created_at(attrs: &Attrs) -> Option<DateTime<Utc>> {
    attrs
        .get_str("created_at")
        .and_then(|raw| parse_created_at(raw).ok())
}
