use serde::Serialize;

/// A page of items plus the page links the pagination bar renders.
///
/// `pages` holds page numbers and `None` where the bar shows an ellipsis.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
            pages: page_window(page, total_pages),
        }
    }

    /// The bar is hidden when everything fits on one page.
    pub fn has_pages(&self) -> bool {
        self.total_pages > 1
    }
}

/// First page, last page and the current page with one neighbour either side.
fn page_window(page: usize, total_pages: usize) -> Vec<Option<usize>> {
    let mut pages = Vec::new();
    let mut last = 0;
    for candidate in 1..=total_pages {
        let near_current = candidate + 1 >= page && candidate <= page.saturating_add(1);
        if candidate == 1 || candidate == total_pages || near_current {
            if candidate > last + 1 {
                pages.push(None);
            }
            pages.push(Some(candidate));
            last = candidate;
        }
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ranges_list_every_page() {
        let paginated = Paginated::new(vec![1, 2], 2, 3);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn long_ranges_collapse_with_ellipses() {
        let paginated = Paginated::<u8>::new(vec![], 5, 10);
        assert_eq!(
            paginated.pages,
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
    }

    #[test]
    fn huge_page_numbers_keep_the_ends() {
        let paginated = Paginated::<u8>::new(vec![], usize::MAX, 3);
        assert_eq!(paginated.pages, vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn single_page_hides_the_bar() {
        assert!(!Paginated::new(vec![1], 1, 1).has_pages());
        assert!(Paginated::<u8>::new(vec![], 1, 0).pages.is_empty());
    }
}
