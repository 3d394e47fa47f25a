use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Parse an incident `opened_at` value.
///
/// Deterministic allowlist only (no fuzzy parsing):
/// - `YYYY-MM-DD HH:MM:SS`, the feed's native form, assumed UTC
/// - the same with a `T` separator, assumed UTC
/// - RFC3339 with an explicit offset
///
/// The offset of an RFC3339 value is kept so the calendar day stays the one written in the
/// feed; comparisons between values are on the absolute instant.
pub fn parse_opened_at(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in [
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ] {
        if let Ok(pdt) = PrimitiveDateTime::parse(trimmed, fmt) {
            return Some(pdt.assume_utc());
        }
    }

    OffsetDateTime::parse(trimmed, &Rfc3339).ok()
}

/// Calendar day bucket key, `YYYY-MM-DD`.
pub fn day_key(dt: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day()
    )
}

/// Short axis label for a day bucket, `MM-DD`.
pub fn day_label(dt: OffsetDateTime) -> String {
    format!("{:02}-{:02}", u8::from(dt.month()), dt.day())
}
