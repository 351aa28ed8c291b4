//! Optional ordering of listing and search results.

use std::cmp::Reverse;

use scholara_core::models::scholarship::Scholarship;

use crate::expiration::parse_deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Parsed deadline timestamp.
    Date,
    /// Digits of the free-form amount text, read as one integer.
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    /// Build a sort request from raw `sortBy` / `order` query values.
    ///
    /// Both must be present and non-empty. An unknown `sortBy` yields
    /// `None` (keep store order); any `order` other than `asc` sorts
    /// descending.
    pub fn from_params(sort_by: Option<&str>, order: Option<&str>) -> Option<Self> {
        let (sort_by, order) = (sort_by?, order?);
        if sort_by.is_empty() || order.is_empty() {
            return None;
        }

        let key = match sort_by {
            "date" => SortKey::Date,
            "amount" => SortKey::Amount,
            _ => return None,
        };
        let order = if order == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };

        Some(Self { key, order })
    }
}

/// Integer formed by every ASCII digit in `amount`, in order.
///
/// `"$1,000"` → 1000, `"abc"` or missing → 0. Saturates instead of
/// overflowing on absurdly long digit runs.
pub fn amount_value(amount: Option<&str>) -> u64 {
    amount
        .unwrap_or_default()
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// Deadline as Unix milliseconds, 0 when missing or unparseable.
pub fn deadline_timestamp(scholarship: &Scholarship) -> i64 {
    scholarship
        .deadline_date()
        .and_then(parse_deadline)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Stable in-place sort: equal keys keep their relative order in both
/// directions.
pub fn sort_scholarships(items: &mut [Scholarship], spec: SortSpec) {
    match (spec.key, spec.order) {
        (SortKey::Date, SortOrder::Asc) => items.sort_by_key(deadline_timestamp),
        (SortKey::Date, SortOrder::Desc) => {
            items.sort_by_key(|s| Reverse(deadline_timestamp(s)))
        }
        (SortKey::Amount, SortOrder::Asc) => {
            items.sort_by_key(|s| amount_value(s.amount.as_deref()))
        }
        (SortKey::Amount, SortOrder::Desc) => {
            items.sort_by_key(|s| Reverse(amount_value(s.amount.as_deref())))
        }
    }
}
