//! Minimal currency support
//!
//! Maps popular currency spellings to their ISO 4217 codes; anything
//! unknown mirrors back unchanged, so already-correct codes pass
//! through.

use once_cell::sync::Lazy;

use crate::mappings::Mirror;

const ALIASES: &[(&str, &[&str])] = &[
    ("EUR", &["€", "Euro", "euro"]),
    ("JPY", &["¥", "yen", "Yen", "YEN"]),
    ("USD", &["US$", "$"]),
];

/// Popular currency spellings, mirrored to ISO 4217 codes
pub static ISO4217: Lazy<Mirror<String>> = Lazy::new(|| {
    let mut mirror = Mirror::new();
    for (code, aliases) in ALIASES {
        for alias in aliases.iter() {
            mirror.insert(alias.to_string(), code.to_string());
        }
    }
    mirror
});

/// The ISO 4217 code for a currency spelling
///
/// ```
/// use sundry::currency::currency_code;
///
/// assert_eq!(currency_code("euro"), "EUR");
/// assert_eq!(currency_code("€"), "EUR");
/// assert_eq!(currency_code("EUR"), "EUR");
/// assert_eq!(currency_code("CHF"), "CHF");
/// ```
pub fn currency_code(spelling: &str) -> &str {
    ISO4217.resolve(spelling)
}
