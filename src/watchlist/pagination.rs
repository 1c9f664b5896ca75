use serde::Serialize;

/// One page of a list. Pages are 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    /// Zero-based index of the first item on this page
    pub first_index: usize,
    /// Exclusive end index, clamped to `total`
    pub last_index: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// `"11-20 of 23"` style label.
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "0 of 0".to_string();
        }
        format!("{}-{} of {}", self.first_index + 1, self.last_index, self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Cut `items` into the requested page. Out-of-range pages are clamped.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let first_index = (page - 1) * per_page;
    let last_index = (first_index + per_page).min(total);

    let items = items
        .into_iter()
        .skip(first_index)
        .take(last_index - first_index)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_pages,
        first_index,
        last_index,
        total,
    }
}
