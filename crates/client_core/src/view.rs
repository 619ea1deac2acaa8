use std::fmt;

use chrono::{DateTime, Utc};
use shared::protocol::UrlStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeView {
    Unbounded,
    Days(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryView {
    /// The link never expires; any `expires_in` from the server is ignored.
    Unbounded,
    Expired,
    Active { remaining_days: Option<i64> },
}

/// Display state derived from a [`UrlStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub url: String,
    pub lifetime: LifetimeView,
    pub expiry: ExpiryView,
    pub registered_at: String,
    pub modified_at: String,
    pub expires_at: Option<String>,
}

impl From<&UrlStatus> for StatusView {
    fn from(status: &UrlStatus) -> Self {
        let (lifetime, expiry) = match status.lifetime_days {
            None => (LifetimeView::Unbounded, ExpiryView::Unbounded),
            Some(days) if status.expired => (LifetimeView::Days(days), ExpiryView::Expired),
            Some(days) => (
                LifetimeView::Days(days),
                ExpiryView::Active {
                    remaining_days: status.expires_in_days,
                },
            ),
        };

        Self {
            url: status.url.clone(),
            lifetime,
            expiry,
            registered_at: timestamp(status.registered_at_utc(), &status.registered_at),
            modified_at: timestamp(status.modified_at_utc(), &status.modified_at),
            expires_at: match expiry {
                ExpiryView::Unbounded => None,
                _ => status
                    .expires_at
                    .as_deref()
                    .map(|raw| timestamp(status.expires_at_utc(), raw)),
            },
        }
    }
}

/// Unparseable timestamps are shown as the server sent them.
fn timestamp(parsed: Option<DateTime<Utc>>, raw: &str) -> String {
    match parsed {
        Some(ts) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => raw.to_string(),
    }
}

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

impl StatusView {
    pub fn status_label(&self) -> &'static str {
        match self.expiry {
            ExpiryView::Expired => "expired",
            ExpiryView::Unbounded | ExpiryView::Active { .. } => "active",
        }
    }

    pub fn lifetime_label(&self) -> String {
        match self.lifetime {
            LifetimeView::Unbounded => "unbounded".to_string(),
            LifetimeView::Days(n) => days(n),
        }
    }

    pub fn remaining_label(&self) -> Option<String> {
        match self.expiry {
            ExpiryView::Unbounded => Some("never expires".to_string()),
            ExpiryView::Expired => None,
            ExpiryView::Active { remaining_days } => {
                remaining_days.map(|n| format!("{} remaining", days(n)))
            }
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "URL:        {}", self.url)?;
        write!(f, "Status:     {}", self.status_label())?;
        if let Some(remaining) = self.remaining_label() {
            write!(f, " ({remaining})")?;
        }
        writeln!(f)?;
        writeln!(f, "Lifetime:   {}", self.lifetime_label())?;
        writeln!(f, "Registered: {}", self.registered_at)?;
        write!(f, "Modified:   {}", self.modified_at)?;
        if let Some(expires_at) = &self.expires_at {
            write!(f, "\nExpires at: {expires_at}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(lifetime_days: Option<i64>, expires_in_days: Option<i64>, expired: bool) -> UrlStatus {
        UrlStatus {
            url: "https://example.com/a/b".to_string(),
            lifetime_days,
            registered_at: "2024-05-01T10:00:00Z".to_string(),
            modified_at: "2024-05-01T10:00:00Z".to_string(),
            expires_at: Some("2024-05-31T10:00:00Z".to_string()),
            expires_in_days,
            expired,
        }
    }

    #[test]
    fn active_link_shows_remaining_days() {
        let view = StatusView::from(&status(Some(30), Some(5), false));
        assert_eq!(view.status_label(), "active");
        assert_eq!(view.remaining_label().as_deref(), Some("5 days remaining"));
        assert_eq!(view.lifetime_label(), "30 days");
    }

    #[test]
    fn singular_day_is_not_pluralized() {
        let view = StatusView::from(&status(Some(1), Some(1), false));
        assert_eq!(view.remaining_label().as_deref(), Some("1 day remaining"));
        assert_eq!(view.lifetime_label(), "1 day");
    }

    #[test]
    fn expired_link_hides_remaining_days() {
        let view = StatusView::from(&status(Some(7), Some(-3), true));
        assert_eq!(view.status_label(), "expired");
        assert_eq!(view.remaining_label(), None);
    }

    #[test]
    fn null_lifetime_overrides_expiry_fields() {
        let view = StatusView::from(&status(None, Some(5), true));
        assert_eq!(view.lifetime, LifetimeView::Unbounded);
        assert_eq!(view.expiry, ExpiryView::Unbounded);
        assert_eq!(view.status_label(), "active");
        assert_eq!(view.lifetime_label(), "unbounded");
        assert_eq!(view.remaining_label().as_deref(), Some("never expires"));
        assert_eq!(view.expires_at, None);
    }

    #[test]
    fn zero_lifetime_is_a_literal_zero() {
        let view = StatusView::from(&status(Some(0), Some(0), false));
        assert_eq!(view.lifetime, LifetimeView::Days(0));
        assert_eq!(view.lifetime_label(), "0 days");
    }

    #[test]
    fn renders_summary_lines() {
        let rendered = StatusView::from(&status(Some(30), Some(5), false)).to_string();
        assert!(rendered.contains("Status:     active (5 days remaining)"));
        assert!(rendered.contains("Lifetime:   30 days"));
        assert!(rendered.contains("Registered: 2024-05-01 10:00 UTC"));
        assert!(rendered.ends_with("Expires at: 2024-05-31 10:00 UTC"));
    }

    #[test]
    fn offsets_are_normalized_and_unparseable_dates_kept() {
        let mut raw = status(Some(30), Some(5), false);
        raw.modified_at = "2024-05-02T10:00:00+02:00".to_string();
        raw.registered_at = "last tuesday".to_string();

        let view = StatusView::from(&raw);
        assert_eq!(view.modified_at, "2024-05-02 08:00 UTC");
        assert_eq!(view.registered_at, "last tuesday");
    }
}
