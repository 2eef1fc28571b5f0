//! Permlink generation
//!
//! A permlink is the post's path segment under its author
//! (`/@alice/<permlink>`). Chain rules allow lowercase ASCII letters, digits
//! and hyphens. Generated permlinks combine a slug of the title with the
//! current time in milliseconds and a random base-36 suffix; uniqueness is
//! probabilistic.

use rand::Rng;

const MAX_SLUG_LEN: usize = 20;
const FALLBACK_SLUG: &str = "post";
const SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh permlink for `title`
pub fn generate_permlink(title: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    generate_permlink_with(title, millis, &mut rand::thread_rng())
}

/// Deterministic core of [`generate_permlink`]
pub fn generate_permlink_with<R: Rng>(title: &str, millis: i64, rng: &mut R) -> String {
    let mut slug: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(MAX_SLUG_LEN)
        .collect();
    if slug.is_empty() {
        slug.push_str(FALLBACK_SLUG);
    }

    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect();

    sanitize(&format!("{}-{}-{}", slug, millis, suffix))
}

/// Replace invalid characters with hyphens, collapse runs, trim the ends
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// Whether `permlink` is a non-empty run of `[a-z0-9]` groups joined by single hyphens
pub fn is_valid_permlink(permlink: &str) -> bool {
    !permlink.is_empty()
        && permlink.split('-').all(|part| {
            !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}
