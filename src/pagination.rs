//! Page envelope returned by every list endpoint.

use serde::Serialize;

/// Number of records on a list page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page numbers to render around `current`; `None` marks a gap.
///
/// Always includes `edge` pages at both ends and `around` pages on each side
/// of the current page.
fn page_window(total_pages: usize, current: usize, edge: usize, around: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut pages = Vec::new();
    let mut last_pushed = 0;

    for page in 1..=total_pages {
        let near_edge = page <= edge || page > total_pages.saturating_sub(edge);
        let near_current = page + around >= current && page <= current.saturating_add(around);
        if !(near_edge || near_current) {
            continue;
        }
        if last_pushed != 0 && page > last_pushed + 1 {
            pages.push(None);
        }
        pages.push(Some(page));
        last_pushed = page;
    }

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: usize, per_page: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            items,
            total,
            page: current_page,
            pages: page_window(total_pages, current_page, 2, 2),
        }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_pages() {
        let page: Paginated<i32> = Paginated::new(vec![], 0, 1, DEFAULT_ITEMS_PER_PAGE);
        assert!(page.pages.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn short_lists_show_every_page() {
        let page = Paginated::new(vec![1], 45, 2, 20);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn long_lists_collapse_into_gaps() {
        let page = Paginated::new(vec![1], 20 * 20, 10, 20);
        assert_eq!(
            page.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_past_the_end_keeps_edges() {
        let page = Paginated::new(Vec::<i32>::new(), 100, usize::MAX, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.pages, vec![Some(1), Some(2), None, Some(4), Some(5)]);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let page = Paginated::new(vec!["a"], 1, 0, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, vec![Some(1)]);
    }
}
