use crate::alias::Alias;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A stored URL record.
///
/// Records returned by a store are independent copies; mutating one has no
/// effect on the stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The primary identity of the record.
    pub alias: Alias,
    /// The destination URL, stored as given.
    pub original_url: String,
    /// When the record stops resolving.
    pub expire_at: Timestamp,
    /// When the record was first persisted.
    pub created_at: Timestamp,
    /// When the record was last modified, if ever.
    pub updated_at: Option<Timestamp>,
}

impl UrlRecord {
    /// Whether the record is expired at `now`.
    ///
    /// A record expires at the instant `expire_at` is reached.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expire_at
    }
}

/// Input for [`LinkStore::create`](crate::LinkStore::create).
///
/// `created_at` is filled by the store with the current time when absent.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct NewUrl {
    pub alias: Alias,
    #[builder(setter(into))]
    pub original_url: String,
    pub expire_at: Timestamp,
    #[builder(default, setter(strip_option))]
    pub created_at: Option<Timestamp>,
    #[builder(default, setter(strip_option))]
    pub updated_at: Option<Timestamp>,
}

impl NewUrl {
    /// Produces the record a store persists for this input.
    ///
    /// Every timestamp is truncated to whole seconds, the precision all
    /// backends store, so a record reads back equal to what was written.
    pub fn into_record(self, now: Timestamp) -> UrlRecord {
        UrlRecord {
            alias: self.alias,
            original_url: self.original_url,
            expire_at: truncate_to_second(self.expire_at),
            created_at: truncate_to_second(self.created_at.unwrap_or(now)),
            updated_at: self.updated_at.map(truncate_to_second),
        }
    }
}

fn truncate_to_second(ts: Timestamp) -> Timestamp {
    Timestamp::from_second(ts.as_second()).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn into_record_fills_created_at() {
        let now = ts("2017-05-01T08:02:16Z");
        let record = NewUrl::builder()
            .alias(Alias::new("220uFicCJj").unwrap())
            .original_url("http://www.google.com")
            .expire_at(ts("2019-05-01T08:02:16Z"))
            .build()
            .into_record(now);

        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, None);
    }

    #[test]
    fn into_record_keeps_caller_created_at() {
        let created = ts("2016-01-01T00:00:00Z");
        let record = NewUrl::builder()
            .alias(Alias::new("gg").unwrap())
            .original_url("http://www.google.com")
            .expire_at(ts("2019-05-01T08:02:16Z"))
            .created_at(created)
            .build()
            .into_record(Timestamp::now());

        assert_eq!(record.created_at, created);
    }

    #[test]
    fn into_record_truncates_to_seconds() {
        let precise = ts("2019-05-01T08:02:16.987654321Z");
        let record = NewUrl::builder()
            .alias(Alias::new("gg").unwrap())
            .original_url("http://www.google.com")
            .expire_at(precise)
            .updated_at(precise)
            .build()
            .into_record(precise);

        let whole = ts("2019-05-01T08:02:16Z");
        assert_eq!(record.expire_at, whole);
        assert_eq!(record.created_at, whole);
        assert_eq!(record.updated_at, Some(whole));
    }

    #[test]
    fn expiry_boundary() {
        let expire_at = ts("2019-05-01T08:02:16Z");
        let record = NewUrl::builder()
            .alias(Alias::new("gg").unwrap())
            .original_url("http://www.google.com")
            .expire_at(expire_at)
            .build()
            .into_record(expire_at);

        assert!(!record.is_expired_at(expire_at - SignedDuration::from_secs(1)));
        assert!(record.is_expired_at(expire_at));
        assert!(record.is_expired_at(expire_at + SignedDuration::from_secs(1)));
    }
}
