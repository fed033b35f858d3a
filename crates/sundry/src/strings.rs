//! Conversions between strings, lists and sets
//!
//! Useful around form handling, where multi-line text inputs become
//! lists and lists are joined back to prefill text inputs.

use std::collections::BTreeSet;

use sundry_core::{Error, Result};

/// Convert a multi-line string into a list of trimmed, non-empty lines
///
/// ```
/// use sundry::strings::lines_to_list;
///
/// assert_eq!(lines_to_list("\none\ntwo"), vec!["one", "two"]);
/// assert!(lines_to_list("").is_empty());
/// ```
pub fn lines_to_list(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Join lines into a single string, skipping empty ones
///
/// The counterpart of [`lines_to_list`]; both directions trim the
/// individual lines, so the pair round-trips.
///
/// ```
/// use sundry::strings::string_of_list;
///
/// assert_eq!(string_of_list(&["a", "", "b"]), "a\nb");
/// ```
pub fn string_of_list<S: AsRef<str>>(lines: &[S]) -> String {
    join_list(lines, "\n")
}

/// Like [`string_of_list`] with a custom separator
pub fn join_list<S: AsRef<str>>(lines: &[S], sep: &str) -> String {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Split on a separator character, trimming every item
///
/// ```
/// use sundry::strings::as_list;
///
/// assert_eq!(as_list("one, two", ','), vec!["one", "two"]);
/// ```
pub fn as_list(val: &str, sep: char) -> Vec<String> {
    val.split(sep).map(|s| s.trim().to_string()).collect()
}

/// Split into a non-empty list, or None
///
/// Empty items are dropped; if nothing remains, the answer is `None`
/// (e.g. to skip a filter entirely instead of filtering on nothing).
///
/// ```
/// use sundry::strings::list_or_none;
///
/// assert_eq!(list_or_none("one,two", ','), Some(vec!["one".to_string(), "two".to_string()]));
/// assert_eq!(list_or_none(", ,", ','), None);
/// assert_eq!(list_or_none("", ','), None);
/// ```
pub fn list_or_none(val: &str, sep: char) -> Option<Vec<String>> {
    let items: Vec<String> = val
        .split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Collect the trimmed non-empty lines of a string into a set
///
/// ```
/// use sundry::strings::make_set;
///
/// let set = make_set("\n  \n two three \n \n");
/// assert_eq!(set.len(), 1);
/// assert!(set.contains("two three"));
/// ```
pub fn make_set(s: &str) -> BTreeSet<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Split a string into groups of at most `size` characters
///
/// Operates on characters, not bytes, so multi-byte input stays valid.
///
/// ```
/// use sundry::strings::group_string;
///
/// assert_eq!(group_string("abcdef", 2), vec!["ab", "cd", "ef"]);
/// assert_eq!(group_string("abc", 2), vec!["ab", "c"]);
/// ```
pub fn group_string(s: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Interpret a form value as a boolean
///
/// Accepts the usual request-variable spellings in English and German,
/// case-insensitively; an empty value counts as `false`. Numbers work
/// too (`"0"` is false, anything else true).
///
/// ```
/// use sundry::strings::parse_bool;
///
/// assert!(parse_bool("True").unwrap());
/// assert!(!parse_bool("").unwrap());
/// assert!(parse_bool("1").unwrap());
/// assert!(parse_bool("häh?").is_err());
/// ```
pub fn parse_bool(val: &str) -> Result<bool> {
    let s = val.trim().to_lowercase();
    match s.as_str() {
        "" | "no" | "n" | "nein" | "false" | "off" => Ok(false),
        "yes" | "y" | "ja" | "j" | "true" | "on" => Ok(true),
        other => other
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| Error::invalid_value("boolean", format!("{val:?}"))),
    }
}

/// Like [`parse_bool`], consulting a default spelling for empty input
///
/// The common case is an optional request variable:
///
/// ```
/// use sundry::strings::parse_bool_or;
///
/// assert!(parse_bool_or("", "yes").unwrap());
/// assert!(!parse_bool_or("off", "yes").unwrap());
/// ```
pub fn parse_bool_or(val: &str, default: &str) -> Result<bool> {
    if val.trim().is_empty() {
        parse_bool(default)
    } else {
        parse_bool(val)
    }
}

/// A boolean that may legitimately be absent
///
/// Empty strings and the spelling `none` yield `None`, e.g. to skip the
/// variable during query-string generation.
///
/// ```
/// use sundry::strings::opt_bool;
///
/// assert_eq!(opt_bool("").unwrap(), None);
/// assert_eq!(opt_bool("True").unwrap(), Some(true));
/// ```
pub fn opt_bool(val: &str) -> Result<Option<bool>> {
    let s = val.trim().to_lowercase();
    if s.is_empty() || s == "none" {
        return Ok(None);
    }
    parse_bool(&s).map(Some)
}

/// A valid integer, or `None` for empty input
///
/// ```
/// use sundry::strings::opt_int;
///
/// assert_eq!(opt_int(" ").unwrap(), None);
/// assert_eq!(opt_int(" 3 ").unwrap(), Some(3));
/// assert!(opt_int("drei").is_err());
/// ```
pub fn opt_int(val: &str) -> Result<Option<i64>> {
    let s = val.trim();
    if s.is_empty() || s == "None" {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| Error::invalid_value("integer", format!("{val:?}")))
}

/// A non-empty trimmed string, or `None`
///
/// ```
/// use sundry::strings::opt_str;
///
/// assert_eq!(opt_str(" "), None);
/// assert_eq!(opt_str(" honk "), Some("honk".to_string()));
/// ```
pub fn opt_str(val: &str) -> Option<String> {
    let s = val.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_to_list_strips() {
        assert_eq!(
            lines_to_list("  one \n\n two three \n \n"),
            vec!["one", "two three"]
        );
    }

    #[test]
    fn test_round_trip() {
        let text = "a\nb\nc";
        assert_eq!(string_of_list(&lines_to_list(text)), text);
        let list = vec!["a", "b", "c"];
        assert_eq!(lines_to_list(&string_of_list(&list)), list);
    }

    #[test]
    fn test_as_list_keeps_empties() {
        assert_eq!(as_list("one,,two", ','), vec!["one", "", "two"]);
    }

    #[test]
    fn test_list_or_none_default_handling() {
        assert_eq!(list_or_none("one", ','), Some(vec!["one".to_string()]));
        assert_eq!(list_or_none("  ", ','), None);
    }

    #[test]
    fn test_parse_bool_spellings() {
        for yes in ["yes", "Ja", "j", "ON", "true", "y"] {
            assert!(parse_bool(yes).unwrap(), "{yes} should be true");
        }
        for no in ["no", "NEIN", "n", "off", "False", ""] {
            assert!(!parse_bool(no).unwrap(), "{no:?} should be false");
        }
        assert!(parse_bool("2").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(matches!(
            parse_bool("vielleicht"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_bool_or_default() {
        assert!(parse_bool_or("", "yes").unwrap());
        assert!(!parse_bool_or("", "").unwrap());
        assert!(!parse_bool_or("no", "yes").unwrap());
    }

    #[test]
    fn test_optional_coercions() {
        assert_eq!(opt_bool("none").unwrap(), None);
        assert_eq!(opt_bool("off").unwrap(), Some(false));
        assert_eq!(opt_int("None").unwrap(), None);
        assert_eq!(opt_int("-7").unwrap(), Some(-7));
        assert!(opt_int("3.5").is_err());
        assert_eq!(opt_str(""), None);
        assert_eq!(opt_str(" x "), Some("x".to_string()));
    }

    #[test]
    fn test_group_string_multibyte() {
        assert_eq!(group_string("äöüß", 3), vec!["äöü", "ß"]);
        assert_eq!(group_string("", 2), Vec::<String>::new());
    }
}
