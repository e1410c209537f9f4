//! Best-effort byte-to-text decoding for the non-PDF fallback path, where the
//! input's encoding is unknown and must be guessed.
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::RwLock;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B-\x0C\x0E-\x1F\x7F-\x9F]").expect("valid regex"));
static REPLACEMENT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\u{FFFD}+").expect("valid regex"));
static ISOLATED_COMBINING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0300}-\u{036F}]+").expect("valid regex"));

/// Detected encodings are cached by a cheap content hash so repeated chunks
/// of the same document don't re-run detection per call.
static ENCODING_CACHE: Lazy<RwLock<HashMap<u64, &'static Encoding>>> = Lazy::new(|| RwLock::new(HashMap::new()));
const CACHE_SIZE_LIMIT: usize = 1000;

/// Fallback encodings tried, in order, when the detector's top guess still
/// produces decode errors.
const FALLBACK_ENCODINGS: &[&str] = &["windows-1252", "iso-8859-1", "cp1251"];

fn cache_key(data: &[u8]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    let sample = &data[..data.len().min(1024)];
    sample.hash(&mut hasher);
    data.len().hash(&mut hasher);
    hasher.finish()
}

/// Decodes raw bytes to a `String`, guessing the encoding when none is given
/// and stripping the control characters and stray replacement characters
/// that guesswork inevitably introduces.
pub fn decode_best_effort(bytes: &[u8], declared_encoding: Option<&str>) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    if let Some(name) = declared_encoding
        && let Some(enc) = Encoding::for_label(name.as_bytes())
    {
        let (decoded, _, _) = enc.decode(bytes);
        return strip_noise(&decoded);
    }

    let key = cache_key(bytes);
    if let Ok(cache) = ENCODING_CACHE.read()
        && let Some(&cached) = cache.get(&key)
    {
        let (decoded, _, _) = cached.decode(bytes);
        return strip_noise(&decoded);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);

    if let Ok(mut cache) = ENCODING_CACHE.write()
        && cache.len() < CACHE_SIZE_LIMIT
    {
        cache.insert(key, guessed);
    }

    let (decoded, _, had_errors) = guessed.decode(bytes);
    if had_errors {
        for name in FALLBACK_ENCODINGS {
            if let Some(enc) = Encoding::for_label(name.as_bytes()) {
                let (candidate, _, errors) = enc.decode(bytes);
                if !errors && text_confidence(&candidate) > 0.5 {
                    return strip_noise(&candidate);
                }
            }
        }
    }

    strip_noise(&decoded)
}

/// Rough readability score in `[0, 1]`, used to pick between fallback
/// encoding candidates when the primary guess produces decode errors.
fn text_confidence(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let total = text.len() as f64;
    let replacement_count = REPLACEMENT_CHARS.find_iter(text).count() as f64;
    let control_count = CONTROL_CHARS.find_iter(text).count() as f64;
    let penalty = (replacement_count + control_count * 2.0) / total;

    let readable = text.chars().filter(|c| c.is_ascii_graphic() || c.is_whitespace()).count() as f64;

    (readable / total - penalty).clamp(0.0, 1.0)
}

fn strip_noise(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = Cow::Borrowed(text);
    for pattern in [&*CONTROL_CHARS, &*REPLACEMENT_CHARS, &*ISOLATED_COMBINING] {
        if pattern.is_match(&cleaned) {
            cleaned = Cow::Owned(pattern.replace_all(&cleaned, "").into_owned());
        }
    }
    cleaned.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_best_effort_empty() {
        assert_eq!(decode_best_effort(b"", None), "");
    }

    #[test]
    fn decode_best_effort_ascii() {
        assert_eq!(decode_best_effort(b"Hello, World!", None), "Hello, World!");
    }

    #[test]
    fn decode_best_effort_utf8() {
        let text = "Hello, 世界!".as_bytes();
        assert_eq!(decode_best_effort(text, None), "Hello, 世界!");
    }

    #[test]
    fn decode_best_effort_strips_control_chars() {
        let text = "Text\x00with\x01control\x1Fchars".as_bytes();
        assert_eq!(decode_best_effort(text, None), "Textwithcontrolchars");
    }

    #[test]
    fn text_confidence_empty_is_zero() {
        assert_eq!(text_confidence(""), 0.0);
    }

    #[test]
    fn text_confidence_clean_text_is_high() {
        assert!(text_confidence("This is clean, readable text.") > 0.9);
    }
}
