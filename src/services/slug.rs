use crate::error::{is_unique_violation, Error, Result};
use slug::slugify;

/// Upper bound on suffixed candidates tried before giving up with
/// `Error::SlugExhausted`. A scope holding `name`, `name-1`, ... `name-1000`
/// is pathological, not a legitimate workload.
pub const MAX_SUFFIX_ATTEMPTS: u32 = 1000;

/// Substitute for source text that normalizes to nothing (all punctuation,
/// whitespace only).
pub const FALLBACK_SLUG: &str = "untitled";

/// Normalize source text into an unsuffixed base slug: lowercase,
/// transliterated, hyphen-separated. Never returns an empty string.
pub fn base_slug(source_text: &str) -> String {
    let base = slugify(source_text);
    if base.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        base
    }
}

/// Derive a slug from `source_text` that is unique within the caller's scope
/// at the time of the check.
///
/// `exists_in_scope` is the scoped existence lookup (usually a query against
/// one uniqueness scope: all users, one project's features, ...). On
/// collision the candidate is retried as `{base}-1`, `{base}-2`, ... up to
/// `MAX_SUFFIX_ATTEMPTS`. Storage errors from the predicate propagate
/// unchanged; only collisions are retried.
///
/// The check-then-insert window is not atomic across concurrent requests, so
/// callers must pair this with a UNIQUE constraint on (scope key, slug) and
/// retry the whole assign-and-insert on constraint violation.
pub fn assign_slug<F>(source_text: &str, mut exists_in_scope: F) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    let base = base_slug(source_text);
    let mut candidate = base.clone();
    let mut counter: u32 = 1;

    while exists_in_scope(&candidate)? {
        if counter > MAX_SUFFIX_ATTEMPTS {
            return Err(Error::SlugExhausted { base });
        }
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }

    Ok(candidate)
}

/// How many times a creation path re-runs the whole assign-and-insert after
/// losing a slug race to a concurrent request.
pub const INSERT_RETRIES: usize = 3;

/// Re-run `op` when it fails on a UNIQUE constraint violation, up to
/// `INSERT_RETRIES` attempts. Every other outcome passes through unchanged.
///
/// This is the safety net for the non-atomic check-then-insert window: the
/// storage constraint rejects the losing writer, and the retry re-assigns
/// against the now-current scope.
pub fn retry_on_conflict<T, F>(mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 0;
    loop {
        match op() {
            Err(Error::Database(e)) if is_unique_violation(&e) && attempt + 1 < INSERT_RETRIES => {
                attempt += 1;
                tracing::debug!("slug insert lost a race, retrying (attempt {})", attempt + 1);
            }
            other => return other,
        }
    }
}

pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 200 {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
