//! Page slicing for list views.

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// One-based page number actually served.
    pub number: usize,
    /// Total number of pages; at least 1 even for an empty list.
    pub num_pages: usize,
    /// Number of records across all pages.
    pub count: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// One-based index of the first record on this page, 0 when empty.
    pub const fn start_index(&self, per_page: usize) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * per_page + 1
        }
    }
}

/// Slice `items` into the page named by `requested`.
///
/// A missing or unparsable page number serves page 1; a number below 1 or
/// beyond the last page serves the last page.
pub fn paginate<T>(items: Vec<T>, requested: Option<&str>, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let count = items.len();
    let num_pages = count.div_ceil(per_page).max(1);

    let number = match requested.map(str::trim).map(str::parse::<i64>) {
        None | Some(Err(_)) => 1,
        Some(Ok(n)) if n >= 1 && (n as usize) <= num_pages => n as usize,
        Some(Ok(_)) => num_pages,
    };

    let items = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        number,
        num_pages,
        count,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn serves_requested_page() {
        let page = paginate((1..=60).collect(), Some("2"), 25);
        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.items.first(), Some(&26));
        assert_eq!(page.items.len(), 25);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.start_index(25), 26);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let items: Vec<u32> = (1..=60).collect();
        assert_eq!(paginate(items.clone(), Some("abc"), 25).number, 1);
        assert_eq!(paginate(items.clone(), None, 25).number, 1);
        assert_eq!(paginate(items.clone(), Some("99"), 25).number, 3);
        assert_eq!(paginate(items, Some("0"), 25).number, 3);
    }

    #[test]
    fn numbers_below_one_serve_last_page() {
        let items: Vec<u32> = (1..=60).collect();
        let page = paginate(items.clone(), Some("-3"), 25);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, (51..=60).collect::<Vec<_>>());
        assert_eq!(paginate(items, Some(" 0 "), 25).number, 3);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate(Vec::<u32>::new(), Some("4"), 25);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.start_index(25), 0);
    }
}
