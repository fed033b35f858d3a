//! HTML entity handling and small HTML generation helpers

pub mod builder;
pub mod entities;

pub use builder::{from_plain_text, Picture};
pub use entities::{decode_entities, entity, escape, Entities};

/// Collapse every whitespace run into a single space
///
/// Meant for HTML to text/plain conversion; the input is treated as
/// plain text, elements are not parsed. Non-breaking spaces count as
/// whitespace too. With `preserve_edge`, leading and trailing runs
/// collapse like inner ones; otherwise they disappear.
///
/// ```
/// use sundry::html::collapse_whitespace;
///
/// let html = "  <div> <p>  Bla\n  Blubb  </p> </div>  ";
/// assert_eq!(collapse_whitespace(html, true), " <div> <p> Bla Blubb </p> </div> ");
/// assert_eq!(collapse_whitespace(html, false), "<div> <p> Bla Blubb </p> </div>");
/// ```
pub fn collapse_whitespace(s: &str, preserve_edge: bool) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut has_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !buf.is_empty() || preserve_edge {
                has_whitespace = true;
            }
            continue;
        }
        if has_whitespace {
            buf.push(' ');
            has_whitespace = false;
        }
        buf.push(ch);
    }
    if preserve_edge && has_whitespace {
        buf.push(' ');
    }
    buf
}
