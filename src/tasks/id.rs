//! Task ID generation.
//!
//! Ids are opaque strings built from a slug of the title plus a random
//! hex suffix, e.g. `fix-login-bug-3f9a2c`. The repository regenerates
//! on the (unlikely) collision with an existing id, so uniqueness is
//! guaranteed at the creation site rather than here.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Maximum slug length before the suffix is appended.
const MAX_SLUG_LEN: usize = 40;

/// Counter used in place of randomness when deterministic ids are on.
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Whether to use deterministic ids (for testing).
static USE_DETERMINISTIC_IDS: AtomicBool = AtomicBool::new(false);

/// Enable deterministic ID generation for testing.
///
/// When enabled, suffixes come from a counter instead of random hex.
pub fn enable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(true, Ordering::SeqCst);
    TEST_COUNTER.store(0, Ordering::SeqCst);
}

/// Disable deterministic ID generation.
pub fn disable_deterministic_ids() {
    USE_DETERMINISTIC_IDS.store(false, Ordering::SeqCst);
}

/// Convert a title to a slug: lowercase ASCII alphanumerics with runs of
/// everything else collapsed to single hyphens, truncated to a bounded
/// length without a trailing hyphen.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN));

    for c in title.chars() {
        if slug.len() == MAX_SLUG_LEN {
            break;
        }
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Generate a 6-character hex suffix.
#[allow(clippy::cast_possible_truncation)]
fn random_suffix() -> String {
    if USE_DETERMINISTIC_IDS.load(Ordering::SeqCst) {
        let count = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        format!("{count:06x}")
    } else {
        use std::collections::hash_map::RandomState;
        use std::hash::{BuildHasher, Hasher};

        let state = RandomState::new();
        let mut hasher = state.build_hasher();
        // Truncation is intentional - we only need entropy, not precision
        hasher.write_u64(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos() as u64),
        );
        let hash = hasher.finish();
        format!("{:06x}", hash & 0xFF_FFFF)
    }
}

/// Generate a task ID from a title.
///
/// The ID is the slugified title plus a 6-character hex suffix. A title
/// with no usable characters falls back to the `task-` prefix.
#[must_use]
pub fn generate_task_id(title: &str) -> String {
    let slug = slugify(title);
    let suffix = random_suffix();

    if slug.is_empty() {
        format!("task-{suffix}")
    } else {
        format!("{slug}-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Ship the board"), "ship-the-board");
        assert_eq!(slugify("simple"), "simple");
    }

    #[test]
    fn test_slugify_special_characters() {
        assert_eq!(slugify("Fix: login (again!)"), "fix-login-again");
        assert_eq!(slugify("a/b\\c"), "a-b-c");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a   b --- c"), "a-b-c");
    }

    #[test]
    fn test_slugify_no_leading_or_trailing_hyphen() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("!!wrapped!!"), "wrapped");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_slugify_non_ascii_dropped() {
        assert_eq!(slugify("café"), "caf");
    }

    #[test]
    fn test_slugify_truncates_without_trailing_hyphen() {
        let slug = slugify(&"word ".repeat(20));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    #[serial]
    fn test_generate_task_id_format() {
        enable_deterministic_ids();

        let id = generate_task_id("Ship the board");
        assert!(id.starts_with("ship-the-board-"));
        assert_eq!(id.len(), "ship-the-board-".len() + 6);

        disable_deterministic_ids();
    }

    #[test]
    #[serial]
    fn test_generate_task_id_empty_title() {
        enable_deterministic_ids();

        let id = generate_task_id("");
        assert!(id.starts_with("task-"));

        disable_deterministic_ids();
    }

    #[test]
    #[serial]
    fn test_deterministic_ids_increment() {
        enable_deterministic_ids();

        let id1 = generate_task_id("test");
        let id2 = generate_task_id("test");
        assert!(id1.ends_with("-000000"));
        assert!(id2.ends_with("-000001"));

        disable_deterministic_ids();
    }

    #[test]
    fn test_random_ids_keep_slug_prefix() {
        disable_deterministic_ids();

        let id1 = generate_task_id("test");
        let id2 = generate_task_id("test");
        assert!(id1.starts_with("test-"));
        assert!(id2.starts_with("test-"));
    }
}
