//! Byte-to-text decoding that never gives up
//!
//! Legacy data mixes UTF-8 and Latin-1; these helpers try the likely
//! encodings in order and always come back with text.

use std::borrow::Cow;

use sundry_core::{Error, Result};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Decode bytes as UTF-8, falling back to Latin-1
///
/// A leading UTF-8 byte order mark is dropped. Since every byte is a
/// valid Latin-1 character, this cannot fail.
///
/// ```
/// use sundry::coding::safe_decode;
///
/// assert_eq!(safe_decode("äöü".as_bytes()), "äöü");
/// assert_eq!(safe_decode(&[0xe4, 0xf6, 0xfc]), "äöü");
/// ```
pub fn safe_decode(bytes: &[u8]) -> String {
    let bytes = strip_bom(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!(len = bytes.len(), "not UTF-8, assuming Latin-1");
            latin1(bytes)
        }
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(String::from),
            Encoding::Latin1 => Some(latin1(bytes)),
        }
    }
}

/// A decoder bound to an ordered list of encodings to try
///
/// The default preference list is UTF-8, then Latin-1, which makes
/// decoding infallible; [`strict`](Self::strict) drops the fallbacks
/// so that undecodable input surfaces as an error instead of mojibake.
#[derive(Debug, Clone)]
pub struct Decoder {
    preflist: Vec<Encoding>,
    strict: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            preflist: vec![Encoding::Utf8, Encoding::Latin1],
            strict: false,
        }
    }

    #[must_use]
    pub fn with_preflist(mut self, preflist: &[Encoding]) -> Self {
        self.preflist = preflist.to_vec();
        self
    }

    /// Fail instead of substituting replacement characters
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let bytes = strip_bom(bytes);
        for encoding in &self.preflist {
            if let Some(s) = encoding.decode(bytes) {
                return Ok(s);
            }
        }
        if self.strict {
            return Err(Error::Decode {
                message: format!("none of {:?} understands the input", self.preflist),
            });
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Removes whitespace characters XML parsers refuse
///
/// Vertical tabs and form feeds count as whitespace in most places,
/// but etree-style parsers reject them. Runs of a purged character
/// plus a space collapse into the space.
///
/// ```
/// use sundry::coding::WhitespacePurger;
///
/// let purger = WhitespacePurger::new();
/// assert_eq!(purger.purge("shore up the pit\u{b}"), "shore up the pit");
/// assert_eq!(
///     purger.purge("shore up\u{b} the pit"),
///     "shore up the pit"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WhitespacePurger {
    chars: Vec<char>,
}

impl Default for WhitespacePurger {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespacePurger {
    pub fn new() -> Self {
        Self {
            chars: vec!['\u{b}', '\u{c}'],
        }
    }

    pub fn with_chars(chars: &[char]) -> Self {
        Self {
            chars: chars.to_vec(),
        }
    }

    pub fn purge<'a>(&self, s: &'a str) -> Cow<'a, str> {
        let is_inapt = |c: char| self.chars.contains(&c);
        if !s.chars().any(is_inapt) {
            return Cow::Borrowed(s);
        }
        let trimmed = s.trim_matches(is_inapt);
        if !trimmed.chars().any(is_inapt) {
            return Cow::Owned(trimmed.to_string());
        }
        let mut res = trimmed.to_string();
        for &ch in &self.chars {
            let mut pattern = ch.to_string();
            pattern.push(' ');
            res = res.replace(&pattern, " ");
        }
        for &ch in &self.chars {
            res = res.replace(ch, " ");
        }
        Cow::Owned(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_decode_utf8_passthrough() {
        assert_eq!(safe_decode("Verfüllen".as_bytes()), "Verfüllen");
    }

    #[test]
    fn test_safe_decode_latin1_fallback() {
        assert_eq!(safe_decode(&[0xe4, 0xf6, 0xfc]), "äöü");
    }

    #[test]
    fn test_safe_decode_strips_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"abc");
        assert_eq!(safe_decode(&bytes), "abc");
    }

    #[test]
    fn test_strict_decoder_rejects_non_utf8() {
        let decoder = Decoder::new()
            .with_preflist(&[Encoding::Utf8])
            .strict();
        assert!(decoder.decode(&[0xe4]).is_err());
        assert_eq!(decoder.decode("äöü".as_bytes()).unwrap(), "äöü");
    }

    #[test]
    fn test_lenient_decoder_replaces() {
        let decoder = Decoder::new().with_preflist(&[Encoding::Utf8]);
        assert_eq!(decoder.decode(&[0x61, 0xe4]).unwrap(), "a\u{fffd}");
    }

    #[test]
    fn test_purger_trailing() {
        let purger = WhitespacePurger::new();
        assert_eq!(
            purger.purge("Verbau entfernen und Baugrube verfüllen\u{b}"),
            "Verbau entfernen und Baugrube verfüllen"
        );
    }

    #[test]
    fn test_purger_inner_collapses_with_space() {
        let purger = WhitespacePurger::new();
        assert_eq!(
            purger.purge("Baugrube verfüllen\u{b} (Fortsetzung)"),
            "Baugrube verfüllen (Fortsetzung)"
        );
        assert_eq!(purger.purge("a\u{c}b"), "a b");
    }

    #[test]
    fn test_purger_borrows_clean_input() {
        let purger = WhitespacePurger::new();
        assert!(matches!(purger.purge("clean"), Cow::Borrowed(_)));
    }
}
