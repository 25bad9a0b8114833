//! Layer-name tokenization and fuzzy keyword matching
//!
//! Design layers are named by hand, so names arrive as `AlertDialog`,
//! `alert-dialog`, `Alert Dialog / Default` or with typos. Everything here
//! reduces a name to lower-case tokens and compares tokens, never raw strings.

/// Minimum per-token sequence ratio for a fuzzy keyword hit
pub const FUZZY_THRESHOLD: f64 = 0.85;
/// Tokens shorter than this never match fuzzily (`tab` vs `tag`)
const FUZZY_MIN_LEN: usize = 4;

/// Outcome of matching a token list against a keyword list
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordMatch<'k> {
    Exact(&'k str),
    Fuzzy { keyword: &'k str, ratio: f64 },
}

impl<'k> KeywordMatch<'k> {
    pub fn keyword(&self) -> &'k str {
        match self {
            Self::Exact(k) => k,
            Self::Fuzzy { keyword, .. } => keyword,
        }
    }
}

/// Lower-case, whitespace-collapsed form of a layer name
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Split a layer name into lower-case word tokens.
///
/// Separators are anything non-alphanumeric; camel-case humps and acronym
/// boundaries (`OTPInput` -> `otp`, `input`) also split.
pub fn tokenize(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut current, &mut tokens);
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let hump = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if hump || acronym_end {
                flush(&mut current, &mut tokens);
            }
        }
        current.extend(c.to_lowercase());
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Match tokens against keywords, which may be multi-word (`"alert dialog"`).
///
/// Exact hits are searched first, preferring more words; a multi-word keyword hits
/// when its words appear consecutively or glued together as one token. Only
/// when nothing hits exactly is the best fuzzy single-token hit returned.
pub fn match_keywords<'k>(tokens: &[String], keywords: &[&'k str]) -> Option<KeywordMatch<'k>> {
    if tokens.is_empty() {
        return None;
    }

    // longest exact phrase wins, so `tab list` beats `tabs`
    let exact = keywords
        .iter()
        .filter(|k| contains_phrase(tokens, k))
        .fold(None::<&'k str>, |best, k| match best {
            Some(b) if b.split_whitespace().count() >= k.split_whitespace().count() => Some(b),
            _ => Some(*k),
        });
    if let Some(keyword) = exact {
        return Some(KeywordMatch::Exact(keyword));
    }

    let mut best: Option<KeywordMatch<'k>> = None;
    for keyword in keywords {
        if keyword.contains(' ') || keyword.len() < FUZZY_MIN_LEN {
            continue;
        }
        for token in tokens.iter().filter(|t| t.len() >= FUZZY_MIN_LEN) {
            let ratio = sequence_ratio(token, keyword);
            let better = match &best {
                Some(KeywordMatch::Fuzzy { ratio: r, .. }) => ratio > *r,
                _ => true,
            };
            if ratio >= FUZZY_THRESHOLD && better {
                best = Some(KeywordMatch::Fuzzy { keyword, ratio });
            }
        }
    }
    best
}

/// Whether `phrase` occurs in `tokens`, either as consecutive words or as a
/// single glued token. Singular and plural forms are treated alike.
pub fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    match words.len() {
        0 => false,
        1 => tokens.iter().any(|t| token_eq(t, words[0])),
        n => {
            let glued: String = words.concat();
            tokens.iter().any(|t| token_eq(t, &glued))
                || tokens
                    .windows(n)
                    .any(|w| w.iter().zip(&words).all(|(t, k)| token_eq(t, k)))
        }
    }
}

fn token_eq(token: &str, keyword: &str) -> bool {
    if token == keyword {
        return true;
    }
    // plural tolerance, both directions
    token.strip_suffix('s') == Some(keyword) || keyword.strip_suffix('s') == Some(token)
}

/// Sequence similarity ratio in [0, 1], `2 * lcs / (len_a + len_b)`
pub fn sequence_ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() && s2.is_empty() {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let lcs_len = longest_common_subsequence(s1, s2);
    let total_len = s1.chars().count() + s2.chars().count();

    (2.0 * lcs_len as f64) / total_len as f64
}

/// Length of the longest common subsequence, two-row dynamic programming
fn longest_common_subsequence(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let n = s2_chars.len();

    let mut prev = vec![0; n + 1];
    let mut curr = vec![0; n + 1];

    for a in &s1_chars {
        for j in 1..=n {
            curr[j] = if *a == s2_chars[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
