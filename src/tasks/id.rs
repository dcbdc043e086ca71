//! Short task identifiers
//!
//! Human-facing ids of the form `<prefix>-<base36>`. They are derived from the
//! task text and creation instant, and only need to be unique within the file
//! they are appended to: the shortest candidate not already present wins.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MIN_ID_LEN: usize = 3;
const MAX_ID_LEN: usize = 8;
const NONCES_PER_LEN: u32 = 10;
const FALLBACK_NONCE: u32 = 999;
const DEFAULT_PREFIX: &str = "tg";
const MAX_PREFIX_CHARS: usize = 4;

static EXISTING_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([a-z0-9]+-[0-9a-z]{3,8})\]").expect("valid task id regex"));

/// Lower-case, keep letters and digits, cap at four characters; `tg` if nothing is left.
pub fn normalize_prefix(raw: &str) -> String {
    let out: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_PREFIX_CHARS)
        .collect();
    if out.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        out
    }
}

/// Every bracketed task id present in `content`.
pub fn collect_existing_ids(content: &str) -> HashSet<String> {
    EXISTING_ID_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Pick the shortest free id for a new task.
///
/// Tries lengths 3 through 8 with nonces 0..10 each. On exhaustion falls back
/// to a length-8 id seeded with the creation instant plus one nanosecond.
pub fn generate_issue_id(
    prefix: &str,
    text: &str,
    created: DateTime<Utc>,
    existing: &HashSet<String>,
) -> String {
    for length in MIN_ID_LEN..=MAX_ID_LEN {
        for nonce in 0..NONCES_PER_LEN {
            let candidate = hash_id(prefix, text, created, length, nonce);
            if !existing.contains(&candidate) {
                return candidate;
            }
        }
    }
    tracing::warn!(prefix, "task id space exhausted, using fallback id");
    hash_id(
        prefix,
        text,
        created + Duration::nanoseconds(1),
        MAX_ID_LEN,
        FALLBACK_NONCE,
    )
}

fn hash_id(prefix: &str, text: &str, created: DateTime<Utc>, length: usize, nonce: u32) -> String {
    let nanos = created.timestamp_nanos_opt().unwrap_or_else(|| created.timestamp());
    let content = format!("{text}|{nanos}|{nonce}");
    let digest = blake3::hash(content.as_bytes());
    format!("{}-{}", prefix, encode_base36_tail(digest.as_bytes(), length))
}

/// Last `length` base-36 digits of the big-endian number in `data`, zero-padded.
///
/// Only the value modulo 36^length matters, so the digest is folded into a
/// running remainder instead of being converted in full.
fn encode_base36_tail(data: &[u8], length: usize) -> String {
    let modulus = 36u128.pow(length as u32);
    let mut rem: u128 = 0;
    for byte in data {
        rem = (rem * 256 + u128::from(*byte)) % modulus;
    }

    let mut digits = vec![b'0'; length];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_ALPHABET[(rem % 36) as usize];
        rem /= 36;
    }
    String::from_utf8_lossy(&digits).into_owned()
}
