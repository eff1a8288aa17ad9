use std::sync::LazyLock;

use regex::Regex;

/// An integer, optionally glued to a unit (`3`, `3LB`, `12ct`).
static QUANTITY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+(?:lbs|lb|oz|ct|pkg|pk|ea)?$").expect("quantity pattern is valid")
});

/// A unit standing alone after a detached integer (`3 LB`).
static UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:lbs|lb|oz|ct|pkg|pk|ea)$").expect("unit pattern is valid")
});

/// Trailing price: an optional `$`, digits and at most one decimal separator.
///
/// A price glued to a word (`MILK2.99`, `BUTTR$2.48`) needs a `$` or a separator;
/// bare glued digits (`V8`) are part of the name.
static PRICE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?:^|\s)\$?\d+(?:[.,]\d*)?|\$\d+(?:[.,]\d*)?|\d+[.,]\d*)$")
        .expect("price pattern is valid")
});

/// Strips quantity/unit tokens and a trailing price from a raw receipt fragment.
///
/// Whitespace is trimmed and collapsed. The cleanup passes are repeated until the
/// text stops changing, so `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if QUANTITY_TOKEN.is_match(token) {
            let bare_integer = token.bytes().all(|b| b.is_ascii_digit());
            if bare_integer && tokens.get(i + 1).is_some_and(|t| UNIT_TOKEN.is_match(t)) {
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        kept.push(token);
        i += 1;
    }

    let joined = kept.join(" ");
    PRICE_SUFFIX.replace(&joined, "").trim().to_string()
}
