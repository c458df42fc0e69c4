/*!
 * Location of translatable text runs in slide markup.
 *
 * Text in DrawingML lives in `<a:t>` elements. The scan is textual: a
 * non-greedy pattern from the opening tag to the first closing tag. Markup
 * inside a run is treated as literal text and never recursed into.
 */

use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::{CaptureMatches, Regex};
use std::borrow::Cow;

/// Text run element: opening tag with optional attributes, content, closing tag
static TEXT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<a:t(?:\s[^>]*[^/>])?\s*>(.*?)</a:t>").expect("text run pattern is valid")
});

/// One translatable run located inside a markup document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// The whole matched element, tags included
    pub match_text: String,
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset just past the closing `>`
    pub end: usize,
    /// Content between the tags, still escaped as it appears in the markup
    pub inner_text: String,
    /// Byte offset where the content starts
    pub inner_start: usize,
    /// Byte offset where the content ends
    pub inner_end: usize,
}

impl TextSpan {
    /// Content with character references decoded, as a reader would see it.
    ///
    /// Content with malformed references is returned as written.
    pub fn text(&self) -> Cow<'_, str> {
        unescape(&self.inner_text).unwrap_or(Cow::Borrowed(self.inner_text.as_str()))
    }

    /// The opening tag, attributes included
    pub fn opening_tag(&self) -> &str {
        &self.match_text[..self.inner_start - self.start]
    }

    /// The closing tag
    pub fn closing_tag(&self) -> &str {
        &self.match_text[self.inner_end - self.start..]
    }
}

/// Lazy left-to-right iterator over the text runs of one document
#[derive(Debug)]
pub struct TextSpans<'d> {
    captures: CaptureMatches<'static, 'd>,
}

impl Iterator for TextSpans<'_> {
    type Item = TextSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.captures.next()?;
        let whole = captures.get(0)?;
        let inner = captures.get(1)?;

        Some(TextSpan {
            match_text: whole.as_str().to_string(),
            start: whole.start(),
            end: whole.end(),
            inner_text: inner.as_str().to_string(),
            inner_start: inner.start(),
            inner_end: inner.end(),
        })
    }
}

/// Scan a markup document for text runs.
///
/// Spans come out in ascending, non-overlapping order. Calling this again on
/// the same document restarts the scan.
pub fn locate_text_spans(document: &str) -> TextSpans<'_> {
    TextSpans {
        captures: TEXT_RUN_REGEX.captures_iter(document),
    }
}
