//! Locale tokens: the normalised language strings embedded in generated field names.
//!
//! A language tag such as `pt-br` is stored as the token `pt_BR`: the language
//! part lowercased, a two-letter region uppercased, a longer script subtag
//! title-cased (`sr-latn` -> `sr_Latn`).

use regex::Regex;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Separator between the language and region parts of a locale token.
pub const LOCALE_SEPARATOR: char = '_';

/// Check whether `tag` looks like a language tag (`en`, `pt-br`, `pt_BR`, `sr-Latn`).
pub fn is_valid_tag(tag: &str) -> bool {
    let regex = TAG_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").expect("valid tag regex")
    });
    regex.is_match(tag)
}

/// Normalise a language tag into a locale token.
///
/// Accepts both `-` and `_` as the separator so that already normalised tokens
/// pass through unchanged. Every subtag after the language is normalised, so
/// `zh-hant-tw` becomes `zh_Hant_TW`.
pub fn to_locale(tag: &str) -> String {
    let mut subtags = tag.split(|c: char| c == '-' || c == '_');
    let mut locale = subtags.next().unwrap_or_default().to_lowercase();
    for subtag in subtags {
        locale.push(LOCALE_SEPARATOR);
        if subtag.chars().count() > 2 {
            let mut chars = subtag.chars();
            if let Some(first) = chars.next() {
                locale.extend(first.to_uppercase());
                locale.push_str(&chars.as_str().to_lowercase());
            }
        } else {
            locale.push_str(&subtag.to_uppercase());
        }
    }
    locale
}

/// The language portion of a locale token (`pt_BR` -> `pt`).
pub fn base_language(locale: &str) -> &str {
    locale.split(LOCALE_SEPARATOR).next().unwrap_or(locale)
}
