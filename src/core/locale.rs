//! Default currency detection from the system timezone.

use crate::core::currency::{self, Currency};
use tracing::debug;

/// IANA timezone prefix to currency code. Checked in order; the
/// `Australia/` entry is a deliberate prefix match for the whole region.
static TIMEZONE_CURRENCIES: &[(&str, &str)] = &[
    ("Asia/Jakarta", "IDR"),
    ("Asia/Pontianak", "IDR"),
    ("Asia/Makassar", "IDR"),
    ("Asia/Jayapura", "IDR"),
    ("Europe/London", "GBP"),
    ("Europe/Berlin", "EUR"),
    ("Europe/Paris", "EUR"),
    ("Europe/Rome", "EUR"),
    ("Europe/Madrid", "EUR"),
    ("Asia/Tokyo", "JPY"),
    ("Australia/", "AUD"),
    ("America/New_York", "USD"),
    ("America/Los_Angeles", "USD"),
    ("America/Chicago", "USD"),
    ("Asia/Singapore", "SGD"),
    ("Asia/Kuala_Lumpur", "MYR"),
    ("Asia/Bangkok", "THB"),
    ("Asia/Seoul", "KRW"),
    ("Asia/Shanghai", "CNY"),
    ("Asia/Hong_Kong", "HKD"),
    ("Asia/Dubai", "AED"),
    ("Asia/Riyadh", "SAR"),
    ("America/Toronto", "CAD"),
    ("America/Vancouver", "CAD"),
    ("Europe/Zurich", "CHF"),
    ("Asia/Kolkata", "INR"),
];

/// Currency for a timezone name, if the table covers it.
pub fn currency_for_timezone(timezone: &str) -> Option<&'static str> {
    TIMEZONE_CURRENCIES
        .iter()
        .find(|(prefix, _)| timezone.starts_with(prefix))
        .map(|(_, code)| *code)
}

/// The user's likely home currency, derived from the system timezone.
/// Falls back to USD when the timezone is unknown or unmapped.
pub fn detect_default_currency() -> &'static Currency {
    let timezone = iana_time_zone::get_timezone().ok();
    let code = timezone
        .as_deref()
        .and_then(currency_for_timezone)
        .unwrap_or("USD");
    debug!(
        timezone = timezone.as_deref().unwrap_or("unknown"),
        code, "Detected home currency"
    );
    currency::find_or_default(code)
}

/// Startup pair for the detected home currency. The home currency leads
/// the pair against IDR; an IDR home gets USD to IDR instead so the two
/// sides always differ.
pub fn pair_for(home: &'static Currency) -> (&'static Currency, &'static Currency) {
    if home.code == "IDR" {
        (currency::find_or_default("USD"), home)
    } else {
        (home, currency::find_or_default("IDR"))
    }
}

/// Startup pair derived from the system timezone.
pub fn default_pair() -> (&'static Currency, &'static Currency) {
    pair_for(detect_default_currency())
}
