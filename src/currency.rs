//! Currency inference from a country code.
//!
//! A finite table keyed by ISO 3166-1 alpha-3 code. Inference is total:
//! anything not in the table is `CurrencyLabel::Unknown`, never an error.

use std::fmt;

use serde::Serialize;

/// A national currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// ISO 4217 code
    pub code: &'static str,
    /// Display symbol
    pub symbol: &'static str,
    /// English name
    pub name: &'static str,
}

/// Result of currency inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyLabel {
    /// The country code is mapped
    Known(Currency),
    /// No code was available, or the code is not mapped
    #[default]
    Unknown,
}

impl CurrencyLabel {
    /// The currency, if known.
    pub fn currency(&self) -> Option<&Currency> {
        match self {
            CurrencyLabel::Known(currency) => Some(currency),
            CurrencyLabel::Unknown => None,
        }
    }

    /// ISO 4217 code, or `"unknown"`.
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyLabel::Known(currency) => currency.code,
            CurrencyLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CurrencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyLabel::Known(currency) => write!(f, "{} {}", currency.code, currency.symbol),
            CurrencyLabel::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for CurrencyLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CurrencyLabel::Known(currency) => currency.serialize(serializer),
            CurrencyLabel::Unknown => serializer.serialize_none(),
        }
    }
}

const fn currency(code: &'static str, symbol: &'static str, name: &'static str) -> Currency {
    Currency { code, symbol, name }
}

const USD: Currency = currency("USD", "$", "United States dollar");
const EUR: Currency = currency("EUR", "€", "Euro");

/// Alpha-3 country code to currency.
///
/// `TPE` is the code the desktop tool historically used for Taiwan; it maps
/// alongside the ISO code `TWN`.
static CURRENCY_TABLE: &[(&str, Currency)] = &[
    ("USA", USD),
    ("KOR", currency("KRW", "₩", "South Korean won")),
    ("JPN", currency("JPY", "¥", "Japanese yen")),
    ("CHN", currency("CNY", "¥", "Chinese yuan")),
    ("TPE", currency("TWD", "NT$", "New Taiwan dollar")),
    ("TWN", currency("TWD", "NT$", "New Taiwan dollar")),
    ("UKR", currency("UAH", "₴", "Ukrainian hryvnia")),
    ("RUS", currency("RUB", "₽", "Russian ruble")),
    ("GBR", currency("GBP", "£", "Pound sterling")),
    ("CAN", currency("CAD", "$", "Canadian dollar")),
    ("AUS", currency("AUD", "$", "Australian dollar")),
    ("IND", currency("INR", "₹", "Indian rupee")),
    ("BRA", currency("BRL", "R$", "Brazilian real")),
    ("CHE", currency("CHF", "Fr", "Swiss franc")),
    ("HKG", currency("HKD", "$", "Hong Kong dollar")),
    ("SGP", currency("SGD", "$", "Singapore dollar")),
    ("DEU", EUR),
    ("FRA", EUR),
    ("NLD", EUR),
    ("ITA", EUR),
    ("ESP", EUR),
    ("IRL", EUR),
    ("FIN", EUR),
    ("AUT", EUR),
    ("BEL", EUR),
];

/// Infers the currency for an ISO 3166-1 alpha-3 country code.
///
/// Depends on the code alone. Case-insensitive.
///
/// # Examples
///
/// ```
/// use ip_tracker::infer_currency;
///
/// assert_eq!(infer_currency("KOR").code(), "KRW");
/// assert_eq!(infer_currency("ZZZ").to_string(), "unknown");
/// ```
pub fn infer_currency(country_code3: &str) -> CurrencyLabel {
    let code = country_code3.trim();
    CURRENCY_TABLE
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|(_, currency)| CurrencyLabel::Known(*currency))
        .unwrap_or(CurrencyLabel::Unknown)
}
