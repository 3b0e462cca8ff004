use serde::Serialize;

/// One page of an ordered result set plus the derived page count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub page_items: Vec<T>,
    pub total_pages: usize,
}

/// Deterministic, stateless slicing. Pages are 1-based; `total_pages` is at
/// least 1 even for an empty collection, and a page past the end yields an
/// empty slice instead of panicking. Input order is preserved.
///
/// `page` and `page_size` are contractually positive; zeroes are clamped to 1
/// rather than trusted.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_pages = (items.len().div_ceil(page_size)).max(1);

    let start = (page - 1).saturating_mul(page_size);
    let page_items = if start >= items.len() {
        Vec::new()
    } else {
        items[start..(start + page_size).min(items.len())].to_vec()
    };

    Page {
        page_items,
        total_pages,
    }
}
