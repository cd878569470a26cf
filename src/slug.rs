//! Unique URL slugs for catalog records.
//!
//! A slug is derived from the title once, the first time a record is saved,
//! and is never regenerated afterwards: renaming a song keeps its old slug so
//! existing links stay valid.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::constants::slug::{FIRST_SUFFIX, MAX_BASE_LEN, MAX_SLUG_LEN};

/// Punctuation removed outright instead of becoming a separator.
#[allow(clippy::expect_used)]
static RE_UNSLUGGABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex: RE_UNSLUGGABLE"));

/// A record that carries a title-derived slug.
pub trait Sluggable {
    /// Identifier type of the record.
    type Id: Copy + Eq;

    /// Title the slug is derived from.
    fn title(&self) -> &str;

    /// Current slug; empty until first save.
    fn slug(&self) -> &str;

    /// Replace the stored slug.
    fn set_slug(&mut self, slug: String);

    /// Identifier of the stored record, `None` when not yet saved.
    fn record_id(&self) -> Option<Self::Id>;
}

/// Existence check over the slugs already stored for one entity type.
pub trait SlugIndex<Id> {
    /// Whether `slug` belongs to any record other than `exclude`.
    fn slug_taken(&self, slug: &str, exclude: Option<Id>) -> bool;
}

/// Lowercase, hyphenated ASCII form of `title`, capped at the base length.
///
/// Accents are folded to their base letters and any other non-ASCII text is
/// dropped, as is punctuation such as apostrophes. Falls back to `default`
/// when nothing slugifiable remains.
pub fn base_slug(title: &str, default: &str) -> String {
    let ascii: String = title.nfkd().filter(char::is_ascii).collect();
    let slug = ::slug::slugify(RE_UNSLUGGABLE.replace_all(&ascii, ""));
    let base = truncate_chars(&slug, MAX_BASE_LEN);
    if base.is_empty() {
        default.to_string()
    } else {
        base.to_string()
    }
}

/// Slug for `title` that no other record in `index` uses.
///
/// Tries the bare base first, then `base-2`, `base-3`, ... shortening the base
/// so that the result never exceeds the maximum slug length. `own_id` is
/// excluded from the check so re-saving a record can keep its slug.
pub fn unique_slug<Id, I>(title: &str, default: &str, own_id: Option<Id>, index: &I) -> String
where
    Id: Copy,
    I: SlugIndex<Id> + ?Sized,
{
    let base = base_slug(title, default);
    let mut candidate = base.clone();
    let mut n = FIRST_SUFFIX;

    while index.slug_taken(&candidate, own_id) {
        let suffix = format!("-{n}");
        let room = MAX_SLUG_LEN.saturating_sub(suffix.len());
        candidate = format!("{}{suffix}", truncate_chars(&base, room));
        n += 1;
    }

    candidate
}

/// Fill in the slug of `record` if it does not have one yet.
///
/// Returns `true` when a slug was assigned. Records that already carry a slug
/// are left untouched even if their title has changed.
pub fn assign_slug_on_save<R, I>(record: &mut R, default: &str, index: &I) -> bool
where
    R: Sluggable,
    I: SlugIndex<R::Id> + ?Sized,
{
    if !record.slug().is_empty() {
        return false;
    }
    let slug = unique_slug(record.title(), default, record.record_id(), index);
    tracing::debug!("Assigned slug '{slug}' to '{}'", record.title());
    record.set_slug(slug);
    true
}

fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(i, _)| &s[..i])
}
