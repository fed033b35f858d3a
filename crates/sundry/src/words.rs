//! Word-aware string truncation

use crate::sequences::sequence_slide;

/// The leading part of a string, cut near `chars` characters
///
/// Shorthand for [`Head::chars`] with the default fuzz (10% of
/// `chars`).
///
/// ```
/// use sundry::words::head;
///
/// assert_eq!(head("The quick brown fox jumps", 15), "The quick brown ...");
/// ```
pub fn head(s: &str, chars: usize) -> String {
    Head::chars(chars).apply(s)
}

/// Configurable word-aware truncation
///
/// Cuts a string down to roughly `chars` characters or exactly `words`
/// words, preferring word borders. Whitespace runs collapse to their
/// first character, so linebreaks survive. Decimal numbers like
/// `3.14` are never split at their separator. When something non-space
/// was cut off, the ellipsis is appended.
///
/// ```
/// use sundry::words::Head;
///
/// let text = " The quick brown fox  jumps over the lazy dog. ";
/// assert_eq!(
///     Head::chars(50).fuzz(10).apply(text),
///     "The quick brown fox jumps over the lazy ..."
/// );
/// assert_eq!(Head::words(4).apply(text), "The quick brown fox ...");
/// ```
#[derive(Debug, Clone)]
pub struct Head {
    chars: Option<usize>,
    words: Option<usize>,
    fuzz: Option<usize>,
    strip: bool,
    ellipsis: String,
}

impl Head {
    /// Limit by an approximate character count
    pub fn chars(chars: usize) -> Self {
        Self {
            chars: Some(chars.max(1)),
            words: None,
            fuzz: None,
            strip: true,
            ellipsis: "...".to_string(),
        }
    }

    /// Limit by an exact word count
    pub fn words(words: usize) -> Self {
        Self {
            chars: None,
            words: Some(words.max(1)),
            fuzz: None,
            strip: true,
            ellipsis: "...".to_string(),
        }
    }

    /// An additional word limit next to the character limit
    #[must_use]
    pub fn and_words(mut self, words: usize) -> Self {
        self.words = Some(words.max(1));
        self
    }

    /// The tolerance around the character limit; zero cuts hard,
    /// possibly mid-word
    #[must_use]
    pub fn fuzz(mut self, fuzz: usize) -> Self {
        self.fuzz = Some(fuzz);
        self
    }

    /// Keep leading and trailing whitespace instead of stripping it
    #[must_use]
    pub fn keep_whitespace(mut self) -> Self {
        self.strip = false;
        self
    }

    #[must_use]
    pub fn ellipsis(mut self, ellipsis: &str) -> Self {
        self.ellipsis = ellipsis.to_string();
        self
    }

    /// Apply the configured truncation
    pub fn apply(&self, s: &str) -> String {
        let s = if self.strip { s.trim() } else { s };
        if s.is_empty() {
            return String::new();
        }
        let (minchars, maxchars, hardcut) = match self.chars {
            Some(chars) => {
                let fuzz = self.fuzz.unwrap_or(chars / 10);
                (chars.saturating_sub(fuzz), chars + fuzz, fuzz == 0)
            }
            None => (0, 0, false),
        };
        let mut cut = Cutter {
            tmp: Vec::new(),
            buf: Vec::new(),
            chars_seen: 0,
            words_seen: 0,
            done: false,
            minchars,
            maxchars,
            hardcut,
            has_chars: self.chars.is_some(),
            words: self.words,
            ellipsis: &self.ellipsis,
        };
        let mut inword = false;
        let mut prev_is_space = false;
        for (prev, ch, next) in sequence_slide(s.chars()) {
            if ch.is_alphanumeric() {
                if !inword {
                    if cut.flush(inword) {
                        return cut.finish();
                    }
                    inword = true;
                }
                prev_is_space = false;
            } else if (ch == '.' || ch == ',')
                && prev.is_some_and(|c| c.is_ascii_digit())
                && next.map_or(true, |c| c.is_ascii_digit())
            {
                // decimal separator, still inside the number
            } else {
                if inword {
                    if cut.flush(inword) {
                        return cut.finish();
                    }
                    inword = false;
                }
                if ch.is_whitespace() {
                    if prev_is_space {
                        continue;
                    }
                    prev_is_space = true;
                } else {
                    prev_is_space = false;
                }
            }
            cut.buf.push(ch);
        }
        if !cut.buf.is_empty() {
            cut.flush(inword);
        }
        cut.finish()
    }
}

/// Accumulates finished chunks and decides when to stop
///
/// `buf` holds the chunk currently being read (a word or a non-word
/// run); `flush` is called at every chunk border, with `inword` naming
/// the kind of chunk in the buffer.
struct Cutter<'a> {
    tmp: Vec<char>,
    buf: Vec<char>,
    chars_seen: usize,
    words_seen: usize,
    done: bool,
    minchars: usize,
    maxchars: usize,
    hardcut: bool,
    has_chars: bool,
    words: Option<usize>,
    ellipsis: &'a str,
}

impl Cutter<'_> {
    /// Move the buffered chunk into the result; true means the limit
    /// was reached and the result is final
    fn flush(&mut self, inword: bool) -> bool {
        if !self.has_chars {
            return self.flush_words_only(inword);
        }
        let chunklen = self.buf.len();
        if self.hardcut {
            if chunklen > 0 && self.done {
                self.append_ellipsis();
                return true;
            }
        } else if self.done || (self.chars_seen >= self.minchars && inword) {
            self.append_ellipsis();
            return true;
        }
        let charsleft = self.maxchars - self.chars_seen;
        if charsleft < chunklen {
            // cutting mid-chunk; with fuzz, only to reach minchars
            if self.hardcut || (charsleft > 0 && self.chars_seen < self.minchars) {
                self.tmp.extend(self.buf[..charsleft].iter());
            }
            self.append_ellipsis();
            return true;
        }
        self.tmp.append(&mut self.buf);
        if charsleft == chunklen {
            // exactly full; whether to append the ellipsis depends on
            // whether anything follows
            self.done = true;
            return false;
        }
        self.chars_seen += chunklen;
        if inword {
            if let Some(limit) = self.words {
                if self.words_seen >= limit {
                    self.append_ellipsis();
                    return true;
                }
                self.words_seen += 1;
            }
        }
        false
    }

    fn flush_words_only(&mut self, inword: bool) -> bool {
        let limit = self.words.unwrap_or(usize::MAX);
        if inword {
            if self.words_seen >= limit {
                self.append_ellipsis();
                return true;
            }
            self.words_seen += 1;
        }
        self.tmp.append(&mut self.buf);
        false
    }

    fn append_ellipsis(&mut self) {
        self.tmp.extend(self.ellipsis.chars());
    }

    fn finish(self) -> String {
        self.tmp.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: &str = " Now that Python is installed,  we would  like to be able to \
                      easily run the interactive interpreter from the Command Prompt.";
    const S2: &str = " The quick brown fox  jumps over the lazy dog. ";
    const S3: &str = " The quick brown fox  jumps over the refrigerator. ";

    #[test]
    fn test_hard_cut_at_exact_length() {
        assert_eq!(
            Head::chars(50).fuzz(0).apply(S1),
            "Now that Python is installed, we would like to be ..."
        );
        assert_eq!(Head::chars(20).fuzz(0).apply(S1), "Now that Python is i...");
    }

    #[test]
    fn test_fuzzy_cut_prefers_word_borders() {
        assert_eq!(
            Head::chars(50).apply(S1),
            "Now that Python is installed, we would like to ..."
        );
        assert_eq!(
            Head::chars(50).fuzz(10).apply(S1),
            "Now that Python is installed, we would like ..."
        );
        assert_eq!(
            Head::chars(50).fuzz(10).apply(S2),
            "The quick brown fox jumps over the lazy ..."
        );
    }

    #[test]
    fn test_short_enough_string_stays_whole() {
        assert_eq!(
            Head::chars(50).fuzz(10).apply(S3),
            "The quick brown fox jumps over the refrigerator."
        );
    }

    #[test]
    fn test_insufficient_fuzz_cuts_mid_word() {
        assert_eq!(
            Head::chars(40).fuzz(2).apply(S3),
            "The quick brown fox jumps over the refrige..."
        );
    }

    #[test]
    fn test_words_limit() {
        assert_eq!(Head::words(5).apply(S1), "Now that Python is installed, ...");
        assert_eq!(
            Head::words(5).apply(" There  are only five words.  "),
            "There are only five words."
        );
    }

    #[test]
    fn test_whitespace_collapses_to_first_char() {
        let limerick = "There was a young lady in Riga\n  \
                        who smiled when she rode on a tiger.\n  \
                        They returned from the ride";
        let res = Head::chars(70).apply(limerick);
        assert_eq!(
            res,
            "There was a young lady in Riga\nwho smiled when she rode on a tiger.\n..."
        );
    }

    #[test]
    fn test_decimal_numbers_stay_whole() {
        assert_eq!(Head::words(2).apply("about 3.14 percent"), "about 3.14 ...");
    }

    #[test]
    fn test_custom_ellipsis() {
        assert_eq!(
            Head::words(2).ellipsis("\u{2026}").apply("one two three"),
            "one two \u{2026}"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Head::chars(10).apply("   "), "");
    }
}
