use serde::Serialize;

/// Page sizes offered by the listing views.
pub const PER_PAGE_OPTIONS: [usize; 4] = [10, 15, 25, 50];

/// Clamps a requested page size to the supported options; anything else
/// falls back to the smallest.
pub fn clamp_per_page(requested: Option<usize>) -> usize {
    match requested {
        Some(size) if PER_PAGE_OPTIONS.contains(&size) => size,
        _ => PER_PAGE_OPTIONS[0],
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One rendered page plus the window of page links shown under it. `None`
/// entries mark gaps in the link row.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Slices one page out of the already filtered and sorted set.
    pub fn slice(items: Vec<T>, current_page: usize, per_page: usize) -> Self {
        let per_page = if per_page == 0 { PER_PAGE_OPTIONS[0] } else { per_page };
        let current_page = if current_page == 0 { 1 } else { current_page };

        let total = items.len();
        let total_pages = total.div_ceil(per_page);

        let start = (current_page - 1).saturating_mul(per_page);
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(per_page)
            .collect();

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            per_page,
            total,
        }
    }
}
