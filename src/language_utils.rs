use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Requests name languages the way users type them ("EN", "ru", "zh-CN").
/// This module checks them against ISO 639 and produces the lower-case
/// form translation endpoints expect.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Source language value that lets the provider detect the language
pub const AUTO_DETECT: &str = "auto";

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part1);
    }

    if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if PART2B_TO_PART2T.iter().any(|(b, _)| *b == normalized_code) {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check a language parameter and return the code to put on the wire.
///
/// The primary subtag must be an ISO 639 code. It may be followed by a
/// 4-letter script subtag and then a region subtag (2 letters or 3 digits),
/// in that order: `zh-Hans-CN`, `es-419` and `pt_BR` pass, `not-a-language`
/// does not. Subtags are kept (`zh-CN` stays `zh-cn`). `auto` is only
/// accepted when `allow_auto` is set.
pub fn validate_request_language(code: &str, allow_auto: bool) -> Result<String> {
    let wire_code = code.trim().to_lowercase().replace('_', "-");

    if wire_code == AUTO_DETECT {
        if allow_auto {
            return Ok(wire_code);
        }
        return Err(anyhow!("Language detection is only available for the source language"));
    }

    let mut subtags = wire_code.split('-').peekable();
    let primary = subtags.next().unwrap_or_default();
    validate_language_code(primary)?;

    if subtags.peek().is_some_and(|tag| is_script_subtag(tag)) {
        subtags.next();
    }
    if subtags.peek().is_some_and(|tag| is_region_subtag(tag)) {
        subtags.next();
    }
    if subtags.next().is_some() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    Ok(wire_code)
}

fn is_script_subtag(tag: &str) -> bool {
    tag.len() == 4 && tag.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region_subtag(tag: &str) -> bool {
    (tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()))
        || (tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit()))
}
