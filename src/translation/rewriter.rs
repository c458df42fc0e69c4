/*!
 * Reinsertion of translated text into markup.
 *
 * Each located run is rebuilt from its own opening tag, the escaped
 * translation and its closing tag. Every byte outside the runs is copied
 * unchanged.
 */

use quick_xml::escape::escape;

use super::locator::TextSpan;

/// Escape text for use as element content.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with entity references.
pub fn escape_text(text: &str) -> String {
    escape(text).into_owned()
}

/// Replace located runs with translated text.
///
/// `replacements` must be in ascending offset order, as produced by the
/// locator. A `None` translation leaves the run with empty content.
pub fn rewrite_document(document: &str, replacements: &[(TextSpan, Option<String>)]) -> String {
    let mut output = String::with_capacity(document.len());
    let mut cursor = 0;

    for (span, translated) in replacements {
        output.push_str(&document[cursor..span.start]);
        output.push_str(span.opening_tag());
        if let Some(text) = translated {
            output.push_str(&escape_text(text));
        }
        output.push_str(span.closing_tag());
        cursor = span.end;
    }

    output.push_str(&document[cursor..]);
    output
}
