//! Simple text-to-HTML conversions and a responsive image builder

use sundry_core::{Error, Result};

use super::escape;
use crate::sequences::sequence_slide;

const BULLET_CHARS: [char; 4] = ['*', '-', '+', '\u{2022}'];

/// What a single input line means for [`from_plain_text`]
#[derive(Debug, Clone)]
struct LineInfo {
    bullet: Option<char>,
    indented: bool,
    text: String,
}

impl LineInfo {
    fn parse(line: &str) -> Self {
        let s = line.trim_end();
        let mut bullet_seen = None;
        let mut bullet = None;
        let mut prefix = 0usize;
        for ch in s.chars() {
            if BULLET_CHARS.contains(&ch) {
                bullet_seen = Some(ch);
            } else if ch.is_whitespace() {
                if bullet_seen.is_none() {
                    prefix += 1;
                } else {
                    // a bullet counts only when followed by whitespace
                    bullet = bullet_seen;
                    break;
                }
            } else {
                break;
            }
        }
        let offset = prefix + if bullet.is_some() { 2 } else { 0 };
        let text: String = s.chars().skip(offset).collect();
        Self {
            bullet,
            indented: prefix > 0,
            text: text.trim_start().to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Convert plain text to minimal HTML
///
/// Supported are paragraphs, non-nested unordered lists (`*`, `-`, `+`
/// or a bullet character) and hard linebreaks; content is escaped.
/// Closing `</p>` tags are omitted, since the next block terminates a
/// paragraph anyway. The `joiner` goes between the generated pieces.
///
/// ```
/// use sundry::html::from_plain_text;
///
/// assert_eq!(
///     from_plain_text("A two-line\nparagraph", " "),
///     "<p> A two-line <br> paragraph"
/// );
/// assert_eq!(
///     from_plain_text("Trouble with\n* Harry\n* Sally", " "),
///     "<p> Trouble with <ul> <li> Harry <li> Sally"
/// );
/// ```
pub fn from_plain_text(txt: &str, joiner: &str) -> String {
    let mut res: Vec<String> = Vec::new();
    let mut in_list = false;
    let lines = txt.lines().map(LineInfo::parse);
    for (prev, line, _next) in sequence_slide(lines) {
        if line.is_empty() {
            if in_list {
                res.push("</ul>".to_string());
                in_list = false;
            }
            continue;
        }
        if line.bullet.is_some() {
            if !in_list {
                res.push("<ul>".to_string());
                in_list = true;
            }
            res.push("<li>".to_string());
            res.push(escape(&line.text));
        } else if in_list && line.indented {
            // continuation of the current list item
            res.push("<br>".to_string());
            res.push(escape(&line.text));
        } else {
            if in_list {
                res.push("</ul>".to_string());
            }
            if in_list || prev.map_or(true, |p| p.is_empty()) {
                res.push("<p>".to_string());
                in_list = false;
            } else {
                res.push("<br>".to_string());
            }
            res.push(escape(&line.text));
        }
    }
    res.join(joiner)
}

/// Builds an `<img>` element, wrapped in `<picture>` and/or `<a>` as
/// needed
///
/// Masks carry a `{width}` placeholder; the `srcset` attribute is
/// built from the width list, and the `src` attribute defaults to the
/// smallest resolution to save bandwidth for browsers ignoring
/// `srcset`. With both an image and a source mask, a `<picture>`
/// element with an alternate-format `<source>` is produced. Given only
/// `href` and `title`, the result is a plain text link.
///
/// ```
/// use sundry::html::Picture;
///
/// let html = Picture::new()
///     .prefix("/++images++/")
///     .source_mask("babyface-{width}.jpg")
///     .widths(&[300, 600])
///     .render()
///     .unwrap();
/// assert!(html.starts_with("<img srcset=\"/++images++/babyface-300.jpg 300w, "));
/// assert!(html.ends_with("src=\"/++images++/babyface-300.jpg\" alt=\"\">"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Picture {
    prefix: Option<String>,
    source_mask: Option<String>,
    img_mask: Option<String>,
    source_type: Option<String>,
    widths: Vec<u32>,
    src_width: Option<u32>,
    use_largest: bool,
    href: Option<String>,
    id: Option<String>,
    alt: String,
    title: Option<String>,
    img_class: Option<String>,
    joiner: String,
}

impl Picture {
    pub fn new() -> Self {
        Self {
            joiner: " ".to_string(),
            ..Self::default()
        }
    }

    /// A common prefix for all image resource paths
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// The mask for the `srcset` entries, with a `{width}` placeholder
    #[must_use]
    pub fn source_mask(mut self, mask: &str) -> Self {
        self.source_mask = Some(mask.to_string());
        self
    }

    /// The mask for the fallback `src`; given next to a source mask,
    /// a `<picture>` element is built
    #[must_use]
    pub fn img_mask(mut self, mask: &str) -> Self {
        self.img_mask = Some(mask.to_string());
        self
    }

    /// The MIME type of the alternate `<source>` element
    #[must_use]
    pub fn source_type(mut self, mime: &str) -> Self {
        self.source_type = Some(mime.to_string());
        self
    }

    /// The available widths, in ascending order
    #[must_use]
    pub fn widths(mut self, widths: &[u32]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    /// An explicit width for the `src` attribute
    #[must_use]
    pub fn src_width(mut self, width: u32) -> Self {
        self.src_width = Some(width);
        self
    }

    /// Use the largest resolution for `src` instead of the smallest
    #[must_use]
    pub fn use_largest(mut self) -> Self {
        self.use_largest = true;
        self
    }

    /// Wrap everything in an `<a>` element
    #[must_use]
    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn alt(mut self, alt: &str) -> Self {
        self.alt = alt.to_string();
        self
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub fn img_class(mut self, class: &str) -> Self {
        self.img_class = Some(class.to_string());
        self
    }

    /// The string placed between the generated elements
    #[must_use]
    pub fn joiner(mut self, joiner: &str) -> Self {
        self.joiner = joiner.to_string();
        self
    }

    pub fn render(&self) -> Result<String> {
        let source_mask = self.prefixed(self.source_mask.as_deref());
        let mut img_mask = self.prefixed(self.img_mask.as_deref());
        let need_picture = img_mask.is_some() && source_mask.is_some();
        if img_mask.is_none() {
            img_mask = source_mask.clone();
        }

        let img_mask = match img_mask {
            Some(mask) => mask,
            None => return self.render_bare_anchor(),
        };

        let mut srcset = Vec::new();
        if !self.widths.is_empty() {
            let mask = source_mask.as_deref().ok_or_else(|| {
                Error::invalid_value("widths", "given without a source mask")
            })?;
            for (prev, width, _next) in sequence_slide(self.widths.iter().copied()) {
                if let Some(prev) = prev {
                    if width <= prev {
                        return Err(Error::invalid_value(
                            "widths",
                            format!("expected ascending order, got {prev} before {width}"),
                        ));
                    }
                }
                srcset.push(format!("{} {width}w", expand(mask, width)));
            }
        }

        let src = match self.src_width_choice() {
            Some(width) => expand(&img_mask, width),
            None if img_mask.contains("{width}") => {
                return Err(Error::invalid_value(
                    "img_mask",
                    "a {width} placeholder needs widths or src_width",
                ));
            }
            None => img_mask,
        };

        let mut elements = Vec::new();
        let mut leadout = Vec::new();
        if let Some(href) = &self.href {
            let mut attrs = vec![("href", href.clone())];
            if let Some(id) = &self.id {
                attrs.push(("id", id.clone()));
            }
            elements.push(singleton("a", &attrs));
            leadout.push("</a>".to_string());
        }
        if need_picture {
            let source_type = self.source_type.as_deref().ok_or_else(|| {
                Error::invalid_value("source_type", "required for a picture element")
            })?;
            elements.push("<picture>".to_string());
            leadout.insert(0, "</picture>".to_string());

            let mut source_attrs = Vec::new();
            if !srcset.is_empty() {
                source_attrs.push(("srcset", srcset.join(", ")));
            }
            source_attrs.push(("type", source_type.to_string()));
            elements.push(singleton("source", &source_attrs));
            elements.push(singleton("img", &self.img_attrs(src, None)));
        } else {
            let mut attrs = Vec::new();
            if !srcset.is_empty() {
                attrs.push(("srcset", srcset.join(", ")));
            }
            elements.push(singleton("img", &self.img_attrs(src, Some(attrs))));
        }
        elements.extend(leadout);
        Ok(elements.join(&self.joiner))
    }

    /// Just `<a href="...">title</a>`, for image-less use
    fn render_bare_anchor(&self) -> Result<String> {
        let href = self.href.as_deref().ok_or_else(|| {
            Error::invalid_value("picture", "neither an image mask nor a link given")
        })?;
        let title = self.title.as_deref().ok_or_else(|| {
            Error::invalid_value("title", "a bare link needs a visible text")
        })?;
        let mut attrs = vec![("href", href.to_string())];
        if let Some(id) = &self.id {
            attrs.push(("id", id.clone()));
        }
        Ok([singleton("a", &attrs), escape(title), "</a>".to_string()].join(&self.joiner))
    }

    fn prefixed(&self, mask: Option<&str>) -> Option<String> {
        let mask = mask?;
        match self.prefix.as_deref() {
            None | Some("") => Some(mask.to_string()),
            Some(prefix) if prefix.ends_with('/') || mask.starts_with('/') => {
                Some(format!("{prefix}{mask}"))
            }
            Some(prefix) => Some(format!("{prefix}/{mask}")),
        }
    }

    fn src_width_choice(&self) -> Option<u32> {
        if let Some(width) = self.src_width {
            return Some(width);
        }
        if self.use_largest {
            self.widths.last().copied()
        } else {
            self.widths.first().copied()
        }
    }

    /// The attributes of the img element: leading positional ones,
    /// then src/alt/class/title in a fixed order
    fn img_attrs(
        &self,
        src: String,
        leading: Option<Vec<(&'static str, String)>>,
    ) -> Vec<(&'static str, String)> {
        let mut attrs = leading.unwrap_or_default();
        attrs.push(("src", src));
        attrs.push(("alt", self.alt.clone()));
        if let Some(class) = &self.img_class {
            attrs.push(("class", class.clone()));
        }
        if let Some(title) = &self.title {
            attrs.push(("title", title.clone()));
        }
        attrs
    }
}

fn expand(mask: &str, width: u32) -> String {
    mask.replace("{width}", &width.to_string())
}

fn singleton<S: AsRef<str>>(elem: &str, attrs: &[(&str, S)]) -> String {
    let mut parts = vec![format!("<{elem}")];
    for (key, val) in attrs {
        parts.push(format!("{key}=\"{}\"", escape(val.as_ref())));
    }
    parts.join(" ") + ">"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fpt(txt: &str) -> String {
        from_plain_text(txt, " ")
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(fpt("  "), "");
    }

    #[test]
    fn test_plain_text_linebreak_and_paragraphs() {
        assert_eq!(fpt("A two-line\nparagraph"), "<p> A two-line <br> paragraph");
        assert_eq!(
            fpt("A paragraph\n  \nand a 2nd one"),
            "<p> A paragraph <p> and a 2nd one"
        );
    }

    #[test]
    fn test_plain_text_lists() {
        assert_eq!(
            fpt("\nTrouble with\n* Harry  \n* Sally"),
            "<p> Trouble with <ul> <li> Harry <li> Sally"
        );
        assert_eq!(
            fpt("* foo\n* bar\nAnd now for something completely different"),
            "<ul> <li> foo <li> bar </ul> <p> And now for something completely different"
        );
    }

    #[test]
    fn test_plain_text_mixed_bullets_and_indentation() {
        assert_eq!(
            fpt("- dashed,\n+ plus-signed"),
            "<ul> <li> dashed, <li> plus-signed"
        );
        assert_eq!(
            fpt("\n* main topic\n  + sub topic\n    - innermost\n"),
            "<ul> <li> main topic <li> sub topic <li> innermost"
        );
    }

    #[test]
    fn test_plain_text_escapes() {
        assert_eq!(fpt("S & P"), "<p> S &amp; P");
        assert_eq!(
            fpt("- S & P\n- clever & smart"),
            "<ul> <li> S &amp; P <li> clever &amp; smart"
        );
    }

    #[test]
    fn test_bullet_needs_following_text() {
        assert_eq!(fpt("  *"), "<p> *");
        assert_eq!(fpt("  * "), "<p> *");
        assert_eq!(fpt("  * A"), "<ul> <li> A");
    }

    #[test]
    fn test_list_item_continuation() {
        assert_eq!(
            fpt("\n- first item\n  continued after a break\n- second item\n\n  A new paragraph.\n  "),
            "<ul> <li> first item <br> continued after a break <li> second item </ul> <p> A new paragraph."
        );
    }

    #[test]
    fn test_picture_smallest_src_by_default() {
        let html = Picture::new()
            .prefix("/++images++/")
            .source_mask("babyface-{width}.jpg")
            .widths(&[300, 600])
            .render()
            .unwrap();
        assert_eq!(
            html,
            "<img srcset=\"/++images++/babyface-300.jpg 300w, /++images++/babyface-600.jpg 600w\" \
             src=\"/++images++/babyface-300.jpg\" alt=\"\">"
        );
    }

    #[test]
    fn test_picture_largest_and_explicit_src() {
        let base = Picture::new()
            .prefix("/++images++/")
            .source_mask("babyface-{width}.jpg")
            .widths(&[300, 450, 600]);
        let html = base.clone().use_largest().render().unwrap();
        assert!(html.contains("src=\"/++images++/babyface-600.jpg\""));
        let html = base.src_width(450).render().unwrap();
        assert!(html.contains("src=\"/++images++/babyface-450.jpg\""));
    }

    #[test]
    fn test_picture_descending_widths_refused() {
        let err = Picture::new()
            .source_mask("x-{width}.jpg")
            .widths(&[600, 300])
            .render()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn test_picture_wrapped_in_anchor() {
        let html = Picture::new()
            .prefix("/++images++/")
            .source_mask("babyface-{width}.jpg")
            .widths(&[300, 600])
            .href("/some/fancy/link/")
            .img_class("img-responsive")
            .render()
            .unwrap();
        assert!(html.starts_with("<a href=\"/some/fancy/link/\"> <img "));
        assert!(html.ends_with("</a>"));
        assert!(html.contains("class=\"img-responsive\""));
    }

    #[test]
    fn test_picture_with_alternate_source() {
        let html = Picture::new()
            .prefix("/++images++/")
            .img_mask("babyface-{width}.jpg")
            .source_mask("babyface-{width}.webp")
            .source_type("image/webp")
            .widths(&[300, 600])
            .title("Some fancy image")
            .render()
            .unwrap();
        assert_eq!(
            html,
            "<picture> \
             <source srcset=\"/++images++/babyface-300.webp 300w, /++images++/babyface-600.webp 600w\" type=\"image/webp\"> \
             <img src=\"/++images++/babyface-300.jpg\" alt=\"\" title=\"Some fancy image\"> \
             </picture>"
        );
    }

    #[test]
    fn test_picture_mask_without_type_refused() {
        assert!(Picture::new()
            .img_mask("a.jpg")
            .source_mask("a.webp")
            .render()
            .is_err());
    }

    #[test]
    fn test_bare_anchor() {
        let html = Picture::new()
            .href("/e-journal/")
            .title("E-Journal")
            .joiner("")
            .render()
            .unwrap();
        assert_eq!(html, "<a href=\"/e-journal/\">E-Journal</a>");
    }

    #[test]
    fn test_evil_href_is_escaped() {
        let html = Picture::new()
            .href("#\">label<% bad %>")
            .title("E-Journal")
            .render()
            .unwrap();
        assert!(html.starts_with("<a href=\"#&quot;&gt;label&lt;% bad %&gt;\">"));
    }
}
