//! The HTML4 named character entities
//!
//! Looking entities up by name yields the proper Unicode character,
//! which naive uses of legacy entity tables get wrong for characters
//! like `&nbsp;`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use sundry_core::{Error, Result};

/// All HTML4 named entities, `name -> character`
#[rustfmt::skip]
pub static ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    NAMED.iter().copied().collect()
});

#[rustfmt::skip]
const NAMED: &[(&str, char)] = &[
    // markup basics
    ("quot", '"'), ("amp", '&'), ("lt", '<'), ("gt", '>'), ("apos", '\''),
    // Latin-1
    ("nbsp", '\u{a0}'), ("iexcl", '¡'), ("cent", '¢'), ("pound", '£'),
    ("curren", '¤'), ("yen", '¥'), ("brvbar", '¦'), ("sect", '§'),
    ("uml", '¨'), ("copy", '©'), ("ordf", 'ª'), ("laquo", '«'),
    ("not", '¬'), ("shy", '\u{ad}'), ("reg", '®'), ("macr", '¯'),
    ("deg", '°'), ("plusmn", '±'), ("sup2", '²'), ("sup3", '³'),
    ("acute", '´'), ("micro", 'µ'), ("para", '¶'), ("middot", '·'),
    ("cedil", '¸'), ("sup1", '¹'), ("ordm", 'º'), ("raquo", '»'),
    ("frac14", '¼'), ("frac12", '½'), ("frac34", '¾'), ("iquest", '¿'),
    ("Agrave", 'À'), ("Aacute", 'Á'), ("Acirc", 'Â'), ("Atilde", 'Ã'),
    ("Auml", 'Ä'), ("Aring", 'Å'), ("AElig", 'Æ'), ("Ccedil", 'Ç'),
    ("Egrave", 'È'), ("Eacute", 'É'), ("Ecirc", 'Ê'), ("Euml", 'Ë'),
    ("Igrave", 'Ì'), ("Iacute", 'Í'), ("Icirc", 'Î'), ("Iuml", 'Ï'),
    ("ETH", 'Ð'), ("Ntilde", 'Ñ'), ("Ograve", 'Ò'), ("Oacute", 'Ó'),
    ("Ocirc", 'Ô'), ("Otilde", 'Õ'), ("Ouml", 'Ö'), ("times", '×'),
    ("Oslash", 'Ø'), ("Ugrave", 'Ù'), ("Uacute", 'Ú'), ("Ucirc", 'Û'),
    ("Uuml", 'Ü'), ("Yacute", 'Ý'), ("THORN", 'Þ'), ("szlig", 'ß'),
    ("agrave", 'à'), ("aacute", 'á'), ("acirc", 'â'), ("atilde", 'ã'),
    ("auml", 'ä'), ("aring", 'å'), ("aelig", 'æ'), ("ccedil", 'ç'),
    ("egrave", 'è'), ("eacute", 'é'), ("ecirc", 'ê'), ("euml", 'ë'),
    ("igrave", 'ì'), ("iacute", 'í'), ("icirc", 'î'), ("iuml", 'ï'),
    ("eth", 'ð'), ("ntilde", 'ñ'), ("ograve", 'ò'), ("oacute", 'ó'),
    ("ocirc", 'ô'), ("otilde", 'õ'), ("ouml", 'ö'), ("divide", '÷'),
    ("oslash", 'ø'), ("ugrave", 'ù'), ("uacute", 'ú'), ("ucirc", 'û'),
    ("uuml", 'ü'), ("yacute", 'ý'), ("thorn", 'þ'), ("yuml", 'ÿ'),
    // Latin Extended and spacing
    ("OElig", 'Œ'), ("oelig", 'œ'), ("Scaron", 'Š'), ("scaron", 'š'),
    ("Yuml", 'Ÿ'), ("fnof", 'ƒ'), ("circ", 'ˆ'), ("tilde", '˜'),
    ("ensp", '\u{2002}'), ("emsp", '\u{2003}'), ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200c}'), ("zwj", '\u{200d}'),
    ("lrm", '\u{200e}'), ("rlm", '\u{200f}'),
    ("ndash", '–'), ("mdash", '—'),
    ("lsquo", '\u{2018}'), ("rsquo", '\u{2019}'), ("sbquo", '\u{201a}'),
    ("ldquo", '\u{201c}'), ("rdquo", '\u{201d}'), ("bdquo", '\u{201e}'),
    ("dagger", '†'), ("Dagger", '‡'), ("bull", '•'), ("hellip", '…'),
    ("permil", '‰'), ("prime", '′'), ("Prime", '″'),
    ("lsaquo", '‹'), ("rsaquo", '›'), ("oline", '‾'), ("frasl", '⁄'),
    ("euro", '€'),
    // Greek
    ("Alpha", 'Α'), ("Beta", 'Β'), ("Gamma", 'Γ'), ("Delta", 'Δ'),
    ("Epsilon", 'Ε'), ("Zeta", 'Ζ'), ("Eta", 'Η'), ("Theta", 'Θ'),
    ("Iota", 'Ι'), ("Kappa", 'Κ'), ("Lambda", 'Λ'), ("Mu", 'Μ'),
    ("Nu", 'Ν'), ("Xi", 'Ξ'), ("Omicron", 'Ο'), ("Pi", 'Π'),
    ("Rho", 'Ρ'), ("Sigma", 'Σ'), ("Tau", 'Τ'), ("Upsilon", 'Υ'),
    ("Phi", 'Φ'), ("Chi", 'Χ'), ("Psi", 'Ψ'), ("Omega", 'Ω'),
    ("alpha", 'α'), ("beta", 'β'), ("gamma", 'γ'), ("delta", 'δ'),
    ("epsilon", 'ε'), ("zeta", 'ζ'), ("eta", 'η'), ("theta", 'θ'),
    ("iota", 'ι'), ("kappa", 'κ'), ("lambda", 'λ'), ("mu", 'μ'),
    ("nu", 'ν'), ("xi", 'ξ'), ("omicron", 'ο'), ("pi", 'π'),
    ("rho", 'ρ'), ("sigmaf", 'ς'), ("sigma", 'σ'), ("tau", 'τ'),
    ("upsilon", 'υ'), ("phi", 'φ'), ("chi", 'χ'), ("psi", 'ψ'),
    ("omega", 'ω'), ("thetasym", 'ϑ'), ("upsih", 'ϒ'), ("piv", 'ϖ'),
    // arrows, math, technical
    ("larr", '←'), ("uarr", '↑'), ("rarr", '→'), ("darr", '↓'),
    ("harr", '↔'), ("crarr", '↵'),
    ("lArr", '⇐'), ("uArr", '⇑'), ("rArr", '⇒'), ("dArr", '⇓'), ("hArr", '⇔'),
    ("forall", '∀'), ("part", '∂'), ("exist", '∃'), ("empty", '∅'),
    ("nabla", '∇'), ("isin", '∈'), ("notin", '∉'), ("ni", '∋'),
    ("prod", '∏'), ("sum", '∑'), ("minus", '−'), ("lowast", '∗'),
    ("radic", '√'), ("prop", '∝'), ("infin", '∞'), ("ang", '∠'),
    ("and", '∧'), ("or", '∨'), ("cap", '∩'), ("cup", '∪'),
    ("int", '∫'), ("there4", '∴'), ("sim", '∼'), ("cong", '≅'),
    ("asymp", '≈'), ("ne", '≠'), ("equiv", '≡'), ("le", '≤'), ("ge", '≥'),
    ("sub", '⊂'), ("sup", '⊃'), ("nsub", '⊄'), ("sube", '⊆'), ("supe", '⊇'),
    ("oplus", '⊕'), ("otimes", '⊗'), ("perp", '⊥'), ("sdot", '⋅'),
    ("lceil", '⌈'), ("rceil", '⌉'), ("lfloor", '⌊'), ("rfloor", '⌋'),
    ("lang", '〈'), ("rang", '〉'),
    // misc symbols
    ("loz", '◊'), ("spades", '♠'), ("clubs", '♣'), ("hearts", '♥'),
    ("diams", '♦'), ("image", 'ℑ'), ("real", 'ℜ'), ("trade", '™'),
    ("alefsym", 'ℵ'), ("weierp", '℘'),
];

/// The character for a named entity, if known
///
/// ```
/// use sundry::html::entity;
///
/// assert_eq!(entity("nbsp"), Some('\u{a0}'));
/// assert_eq!(entity("euro"), Some('\u{20ac}'));
/// assert_eq!(entity("gipsnich"), None);
/// ```
pub fn entity(name: &str) -> Option<char> {
    ENTITIES.get(name).copied()
}

/// An entity table with per-instance overrides
///
/// Overrides shadow the built-in table, e.g. to render `&nbsp;` as a
/// plain space in text/plain output.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    overrides: HashMap<String, char>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: char) {
        self.overrides.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<char> {
        self.overrides.get(name).copied().or_else(|| entity(name))
    }

    pub fn lookup(&self, name: &str) -> Result<char> {
        self.get(name).ok_or_else(|| Error::UnknownEntity {
            name: name.to_string(),
        })
    }
}

/// Minimal HTML escaping for `&`, `<`, `>` and `"`
///
/// ```
/// use sundry::html::escape;
///
/// assert_eq!(escape("S & P"), "S &amp; P");
/// assert_eq!(escape("a < \"b\""), "a &lt; &quot;b&quot;");
/// ```
pub fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            other => res.push(other),
        }
    }
    res
}

/// Replace `&name;`, `&#nnn;` and `&#xhh;` references in a text
///
/// Unknown names and malformed references stay verbatim.
///
/// ```
/// use sundry::html::decode_entities;
///
/// assert_eq!(decode_entities("S &amp; P"), "S & P");
/// assert_eq!(decode_entities("&#8364; &#x20ac;"), "\u{20ac} \u{20ac}");
/// assert_eq!(decode_entities("&gipsnich; & more"), "&gipsnich; & more");
/// ```
pub fn decode_entities(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        res.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail[1..].find(';').map(|i| &tail[1..i + 1]) {
            Some(name) if !name.is_empty() && is_reference_name(name) => {
                match decode_reference(name) {
                    Some(ch) => res.push(ch),
                    None => {
                        res.push('&');
                        res.push_str(name);
                        res.push(';');
                    }
                }
                rest = &tail[name.len() + 2..];
            }
            _ => {
                res.push('&');
                rest = &tail[1..];
            }
        }
    }
    res.push_str(rest);
    res
}

// something like "amp" or "#xe4"; a stray ampersand is no reference
fn is_reference_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse().ok()?
        };
        return char::from_u32(code);
    }
    entity(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_is_real_unicode() {
        assert_eq!(entity("nbsp"), Some('\u{a0}'));
        assert_eq!(entity("rarr"), Some('\u{2192}'));
    }

    #[test]
    fn test_overrides_shadow_the_table() {
        let mut entities = Entities::new();
        entities.insert("nbsp", ' ');
        assert_eq!(entities.get("nbsp"), Some(' '));
        assert_eq!(entities.get("euro"), Some('\u{20ac}'));
        assert!(matches!(
            entities.lookup("gipsnich"),
            Err(Error::UnknownEntity { .. })
        ));
    }

    #[test]
    fn test_escape_roundtrips_through_decode() {
        let raw = "a < b & \"c\"";
        assert_eq!(decode_entities(&escape(raw)), raw);
    }

    #[test]
    fn test_decode_numeric_references() {
        assert_eq!(decode_entities("&#228;&#xe4;&#XE4;"), "äää");
    }

    #[test]
    fn test_decode_leaves_broken_references_alone() {
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("&;"), "&;");
        assert_eq!(decode_entities("&#xzz;"), "&#xzz;");
        assert_eq!(decode_entities("dangling &amp"), "dangling &amp");
    }
}
