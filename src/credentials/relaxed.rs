//! Repair for credential files written without quotes.
//!
//! Only two rewrites are applied:
//! - an object key directly followed by `:` is quoted
//! - a bare value directly followed by `,` or `}` is quoted
//!
//! Anything else is left alone and the strict parser has the final word.

use std::sync::LazyLock;

use regex::Regex;

static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z0-9_\-]+)\s*:").expect("valid bare key regex")
});

static BARE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":\s*([A-Za-z0-9_\-\.~=]+)\s*([,}])").expect("valid bare value regex")
});

/// Relaxed parsing is only attempted on content with no quotes at all.
pub fn is_unquoted(raw: &str) -> bool {
    !raw.contains('"') && !raw.contains('\'')
}

/// Quote bare keys and values so the content becomes strict JSON.
pub fn quote_bare_tokens(raw: &str) -> String {
    let keyed = BARE_KEY.replace_all(raw.trim(), r#"$1"$2":"#);
    BARE_VALUE.replace_all(&keyed, r#":"$1"$2"#).into_owned()
}
