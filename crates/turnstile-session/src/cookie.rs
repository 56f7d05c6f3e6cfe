//! Cookie `Expires` attribute formatting.
//!
//! The registry emits the attribute portion of a `Set-Cookie` header value;
//! the hosting HTTP layer picks the cookie name. We use `Expires` rather
//! than `Max-Age` because every browser honors it, including the legacy
//! ones that predate `Max-Age`.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// How long a reset cookie stays alive before the browser deletes it.
///
/// One second: long enough to reach the client, short enough that the
/// cookie is effectively an immediate deletion order.
pub(crate) const RESET_COOKIE_TTL: Duration = Duration::from_secs(1);

/// Formats an `Expires` stamp `from_now` in the future, per RFC 1123.
///
/// The stamp is computed in UTC; the trailing `GMT` is what the cookie
/// grammar expects. Durations too large for the calendar saturate at the
/// maximum representable date instead of overflowing.
pub(crate) fn expires_attribute(from_now: Duration) -> String {
    let delta = TimeDelta::from_std(from_now).unwrap_or(TimeDelta::MAX);
    let expires = Utc::now()
        .checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    format_rfc1123(expires)
}

/// RFC 1123 date, in the exact shape browsers expect in cookies:
/// `Tue, 15-Jan-13 21:47:38 GMT`.
fn format_rfc1123(t: DateTime<Utc>) -> String {
    t.format("%a, %d-%b-%y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_attribute_has_rfc1123_shape() {
        let stamp = expires_attribute(Duration::from_secs(3600));

        // e.g. "Tue, 15-Jan-13 21:47:38 GMT"
        assert!(stamp.ends_with(" GMT"), "missing GMT suffix: {stamp}");
        assert_eq!(stamp.len(), "Tue, 15-Jan-13 21:47:38 GMT".len());
        assert_eq!(&stamp[3..5], ", ");
    }

    #[test]
    fn test_expires_attribute_is_in_the_future() {
        let stamp = expires_attribute(Duration::from_secs(3600));
        let parsed = chrono::NaiveDateTime::parse_from_str(
            &stamp,
            "%a, %d-%b-%y %H:%M:%S GMT",
        )
        .expect("stamp should parse back");

        assert!(parsed.and_utc() > Utc::now());
    }

    #[test]
    fn test_huge_duration_saturates_instead_of_panicking() {
        let stamp = expires_attribute(Duration::MAX);

        assert!(stamp.ends_with(" GMT"));
    }
}
