//! Display helpers for the id-ID locale

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::OrderStatus;

const CURRENCY: &str = "Rp";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format an amount as rupiah: `Rp 20.000`, `Rp 1.250.000`, `Rp 7.500,5`.
///
/// Thousands are grouped with `.`; up to two fraction digits are shown with
/// `,` and only when non-zero.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = format!("{sign}{CURRENCY} {}", group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Indonesian label of an order status
pub fn status_label(status: OrderStatus) -> &'static str {
    status.label()
}

/// `HH:MM` of a unix timestamp in local time
pub fn format_time(timestamp: i64) -> String {
    time_in(timestamp, &Local)
}

/// `19 Okt 2026` of a unix timestamp in local time
pub fn format_date(timestamp: i64) -> String {
    date_in(timestamp, &Local)
}

fn to_datetime<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz))
}

fn time_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String {
    match to_datetime(timestamp, tz) {
        Some(dt) => format!("{:02}:{:02}", dt.hour(), dt.minute()),
        None => String::from("-"),
    }
}

fn date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String {
    match to_datetime(timestamp, tz) {
        Some(dt) => format!("{} {} {}", dt.day(), MONTHS[dt.month0() as usize], dt.year()),
        None => String::from("-"),
    }
}
