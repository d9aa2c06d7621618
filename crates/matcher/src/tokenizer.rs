/// Tokens shorter than this carry too little signal to keep
const MIN_TOKEN_LEN: usize = 3;

/// A stripped trailing extension may be at most this long
const MAX_EXTENSION_LEN: usize = 4;

/// Connective tokens that survive the length gate but still match nothing
/// useful (identifier phrases are full of "THE_...")
const STOP_TOKENS: &[&str] = &["THE", "AND", "FOR", "WITH", "FROM"];

/// Derive the normalized token list from an asset identifier.
///
/// "42_THE_WORRY_LOOP.png" becomes `["WORRY", "LOOP"]`: the trailing
/// extension and leading ordinal prefix are stripped, the rest is split on
/// non-alphanumeric separators, uppercased, gated on length, cleared of
/// stop tokens, and de-duplicated preserving first-seen order. Pure and
/// deterministic.
#[must_use]
pub fn tokenize(identifier: &str) -> Vec<String> {
    let stem = strip_extension(identifier);
    let stem = strip_ordinal_prefix(stem);

    let mut seen = std::collections::HashSet::new();
    let mut tokens = Vec::new();
    for part in stem.split(|c: char| !c.is_ascii_alphanumeric()) {
        if part.len() < MIN_TOKEN_LEN {
            continue;
        }
        let token = part.to_ascii_uppercase();
        if STOP_TOKENS.contains(&token.as_str()) {
            continue;
        }
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }
    tokens
}

/// Drop a final ".ext" segment when it looks like a file extension
fn strip_extension(identifier: &str) -> &str {
    match identifier.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => identifier,
    }
}

/// Drop a leading run of digits plus its separator, e.g. "42_"
fn strip_ordinal_prefix(stem: &str) -> &str {
    let digits = stem.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return stem;
    }
    let rest = &stem[digits..];
    match rest.chars().next() {
        Some('_' | '-' | ' ') => &rest[1..],
        _ => stem,
    }
}
