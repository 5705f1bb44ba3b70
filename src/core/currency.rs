//! Currency catalog and lookups.
//!
//! The catalog is a fixed list of currencies the converter knows how to
//! display. Rates are never stored here; they always come from a provider.

/// A currency the converter can display.
///
/// `flag` is the lowercase ISO 3166 country code used to render a flag
/// emoji. It is a country code, not a currency code ("us" vs "USD").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

impl Currency {
    /// Regional-indicator flag emoji for this currency's country.
    pub fn flag_emoji(&self) -> String {
        self.flag
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32) - ('a' as u32)))
            .collect()
    }
}

/// All supported currencies. Majors first, then grouped by region.
/// The first entry doubles as the fallback for unknown codes.
pub const CATALOG: &[Currency] = &[
    // Majors
    Currency { code: "USD", name: "US Dollar", flag: "us" },
    Currency { code: "IDR", name: "Indonesian Rupiah", flag: "id" },
    Currency { code: "EUR", name: "Euro", flag: "eu" },
    Currency { code: "GBP", name: "British Pound", flag: "gb" },
    Currency { code: "JPY", name: "Japanese Yen", flag: "jp" },
    Currency { code: "SGD", name: "Singapore Dollar", flag: "sg" },
    Currency { code: "AUD", name: "Australian Dollar", flag: "au" },
    Currency { code: "CAD", name: "Canadian Dollar", flag: "ca" },
    Currency { code: "CHF", name: "Swiss Franc", flag: "ch" },
    Currency { code: "CNY", name: "Chinese Yuan", flag: "cn" },
    Currency { code: "HKD", name: "Hong Kong Dollar", flag: "hk" },
    Currency { code: "NZD", name: "New Zealand Dollar", flag: "nz" },
    // Asia
    Currency { code: "INR", name: "Indian Rupee", flag: "in" },
    Currency { code: "MYR", name: "Malaysian Ringgit", flag: "my" },
    Currency { code: "THB", name: "Thai Baht", flag: "th" },
    Currency { code: "KRW", name: "South Korean Won", flag: "kr" },
    Currency { code: "PHP", name: "Philippine Peso", flag: "ph" },
    Currency { code: "VND", name: "Vietnamese Dong", flag: "vn" },
    Currency { code: "TWD", name: "New Taiwan Dollar", flag: "tw" },
    Currency { code: "PKR", name: "Pakistani Rupee", flag: "pk" },
    Currency { code: "BDT", name: "Bangladeshi Taka", flag: "bd" },
    Currency { code: "LKR", name: "Sri Lankan Rupee", flag: "lk" },
    Currency { code: "NPR", name: "Nepalese Rupee", flag: "np" },
    Currency { code: "MMK", name: "Myanmar Kyat", flag: "mm" },
    Currency { code: "KHR", name: "Cambodian Riel", flag: "kh" },
    // Europe
    Currency { code: "SEK", name: "Swedish Krona", flag: "se" },
    Currency { code: "NOK", name: "Norwegian Krone", flag: "no" },
    Currency { code: "DKK", name: "Danish Krone", flag: "dk" },
    Currency { code: "PLN", name: "Polish Zloty", flag: "pl" },
    Currency { code: "CZK", name: "Czech Koruna", flag: "cz" },
    Currency { code: "HUF", name: "Hungarian Forint", flag: "hu" },
    Currency { code: "RUB", name: "Russian Ruble", flag: "ru" },
    Currency { code: "TRY", name: "Turkish Lira", flag: "tr" },
    Currency { code: "UAH", name: "Ukrainian Hryvnia", flag: "ua" },
    Currency { code: "KZT", name: "Kazakhstani Tenge", flag: "kz" },
    Currency { code: "RON", name: "Romanian Leu", flag: "ro" },
    Currency { code: "BGN", name: "Bulgarian Lev", flag: "bg" },
    // Middle East
    Currency { code: "AED", name: "UAE Dirham", flag: "ae" },
    Currency { code: "SAR", name: "Saudi Riyal", flag: "sa" },
    Currency { code: "ILS", name: "Israeli New Shekel", flag: "il" },
    Currency { code: "QAR", name: "Qatari Riyal", flag: "qa" },
    Currency { code: "KWD", name: "Kuwaiti Dinar", flag: "kw" },
    Currency { code: "BHD", name: "Bahraini Dinar", flag: "bh" },
    Currency { code: "OMR", name: "Omani Rial", flag: "om" },
    Currency { code: "JOD", name: "Jordanian Dinar", flag: "jo" },
    // Africa
    Currency { code: "EGP", name: "Egyptian Pound", flag: "eg" },
    Currency { code: "ZAR", name: "South African Rand", flag: "za" },
    Currency { code: "NGN", name: "Nigerian Naira", flag: "ng" },
    Currency { code: "KES", name: "Kenyan Shilling", flag: "ke" },
    Currency { code: "GHS", name: "Ghanaian Cedi", flag: "gh" },
    Currency { code: "MAD", name: "Moroccan Dirham", flag: "ma" },
    // Americas
    Currency { code: "BRL", name: "Brazilian Real", flag: "br" },
    Currency { code: "MXN", name: "Mexican Peso", flag: "mx" },
    Currency { code: "ARS", name: "Argentine Peso", flag: "ar" },
    Currency { code: "CLP", name: "Chilean Peso", flag: "cl" },
    Currency { code: "COP", name: "Colombian Peso", flag: "co" },
    Currency { code: "PEN", name: "Peruvian Sol", flag: "pe" },
    Currency { code: "UYU", name: "Uruguayan Peso", flag: "uy" },
];

/// Case-insensitive lookup by ISO code.
pub fn find(code: &str) -> Option<&'static Currency> {
    CATALOG.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Lookup that falls back to the first catalog entry (USD) for unknown
/// codes, for places where a display currency is always needed.
pub fn find_or_default(code: &str) -> &'static Currency {
    find(code).unwrap_or(&CATALOG[0])
}

/// Currencies whose code or name contains `query`, case-insensitively.
/// An empty query matches the whole catalog.
pub fn search(query: &str) -> Vec<&'static Currency> {
    let query = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|c| {
            c.code.to_lowercase().contains(&query) || c.name.to_lowercase().contains(&query)
        })
        .collect()
}
