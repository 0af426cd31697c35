// src/keywords.rs

//! SCCS to RCS keyword translation
//!
//! SCCS expands `%X%` markers at checkout; RCS expands `$Keyword$`. Each
//! checked-out revision is rewritten with the table below before it is
//! checked into RCS. Rules are tried in order and every rule rewrites all of
//! its matches before the next one runs, so compound markers such as
//! `%Z%%M%\t%I%\t%G%` must come before the bare `%M%` and `%I%` rules that
//! would otherwise split them apart.
//!
//! Markers without a rule (`%A%`, `%B%`, `%C%`, `%D%`, `%F%`, `%H%`, `%L%`,
//! `%P%`, `%Q%`, `%R%`, `%S%`, `%T%`, `%Y%` and friends) pass through
//! untouched.

use regex::bytes::{NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

const RCS_ID: &str = "$Id$";
const RCS_SUN_ID: &str = "$SunId$";
const RCS_FILE: &str = "$RCSfile$";
const RCS_REVISION: &str = "$Revision$";
const RCS_DATE: &str = "$Date$";

/// Source patterns and their replacements, highest priority first
const RULES: &[(&str, &str)] = &[
    (r"%W%[ \t]*%G%", RCS_ID),
    (r"%W%[ \t]*%E%", RCS_ID),
    (r"%W%", RCS_ID),
    (r"%Z%%M%[ \t]*%I%[ \t]*%G%", RCS_SUN_ID),
    (r"%Z%%M%[ \t]*%I%[ \t]*%E%", RCS_SUN_ID),
    (r"%M%[ \t]*%I%[ \t]*%G%", RCS_ID),
    (r"%M%[ \t]*%I%[ \t]*%E%", RCS_ID),
    (r"%M%", RCS_FILE),
    (r"%I%", RCS_REVISION),
    (r"%G%", RCS_DATE),
    (r"%E%", RCS_DATE),
    (r"%U%", ""),
];

/// One compiled translation rule
#[derive(Debug)]
pub struct KeywordRule {
    pattern: Regex,
    replacement: &'static str,
}

impl KeywordRule {
    /// The SCCS-side pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The RCS-side replacement
    pub fn replacement(&self) -> &'static str {
        self.replacement
    }
}

static COMPILED: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|(pattern, replacement)| KeywordRule {
            pattern: Regex::new(pattern).expect("keyword patterns are valid regexes"),
            replacement,
        })
        .collect()
});

/// The translation table in evaluation order
pub fn rules() -> &'static [KeywordRule] {
    &COMPILED
}

/// Rewrite SCCS keyword markers in a workfile's raw contents
///
/// Works on bytes so files in legacy 8-bit encodings come through intact.
pub fn translate_bytes(content: &[u8]) -> Vec<u8> {
    let mut current = content.to_vec();
    for rule in rules() {
        // NoExpand: the replacements contain `$`, which regex would treat as
        // a capture group reference.
        let replaced = match rule
            .pattern
            .replace_all(&current, NoExpand(rule.replacement.as_bytes()))
        {
            Cow::Borrowed(_) => continue,
            Cow::Owned(replaced) => replaced,
        };
        current = replaced;
    }
    current
}

/// Rewrite SCCS keyword markers in `text` to their RCS equivalents
pub fn translate(text: &str) -> String {
    // Patterns and replacements are ASCII, so valid UTF-8 stays valid.
    match String::from_utf8(translate_bytes(text.as_bytes())) {
        Ok(translated) => translated,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
