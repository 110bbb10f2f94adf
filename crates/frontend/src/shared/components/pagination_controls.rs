use crate::shared::icons::icon;
use leptos::prelude::*;

/// Items per page assumed by the result summary. The server decides the real
/// page size, this is only used to print the "showing X to Y" range.
pub const PAGE_SIZE: u64 = 20;

/// Whether `page` (1-indexed) is a page the server reported
pub fn is_page_in_range(page: u32, total_pages: u32) -> bool {
    page >= 1 && page <= total_pages
}

/// First and last result number shown on `current_page`, both 1-based.
/// `(0, 0)` when there are no results.
pub fn result_range(current_page: u32, total_items: u64, page_size: u64) -> (u64, u64) {
    if total_items == 0 || current_page == 0 {
        return (0, 0);
    }
    let page = u64::from(current_page);
    let start = (page - 1) * page_size + 1;
    let end = (page * page_size).min(total_items);
    (start, end)
}

/// PaginationControls component - previous/next, one button per page and a
/// result summary. Pages are 1-indexed.
///
/// Out-of-range pages are never emitted: the buttons are disabled at the
/// bounds and clicks are checked against `total_pages` again.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages, 0 when there are no results
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total number of results across all pages
    #[prop(into)]
    total_items: Signal<u64>,

    /// Callback when page changes
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let go_to = move |page: u32| {
        if is_page_in_range(page, total_pages.get_untracked()) {
            on_page_change.run(page);
        }
    };

    view! {
        <div class="pagination-controls">
            <div class="pagination-controls__buttons">
                <button
                    class="pagination-btn"
                    on:click=move |_| go_to(current_page.get_untracked().saturating_sub(1))
                    disabled=move || current_page.get() <= 1
                    title="Página anterior"
                >
                    {icon("chevron-left")}
                    "Anterior"
                </button>
                {move || {
                    let current = current_page.get();
                    (1..=total_pages.get())
                        .map(|page| {
                            let class = if page == current {
                                "pagination-btn pagination-btn--active"
                            } else {
                                "pagination-btn"
                            };
                            view! {
                                <button class=class on:click=move |_| go_to(page)>
                                    {page}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pagination-btn"
                    on:click=move |_| go_to(current_page.get_untracked() + 1)
                    disabled=move || current_page.get() >= total_pages.get()
                    title="Próxima página"
                >
                    "Próxima"
                    {icon("chevron-right")}
                </button>
            </div>
            <div class="pagination-info">
                {move || {
                    let total = total_items.get();
                    let (start, end) = result_range(current_page.get(), total, PAGE_SIZE);
                    format!("Mostrando {} a {} de {} resultados", start, end, total)
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range_bounds() {
        assert!(!is_page_in_range(0, 5));
        assert!(is_page_in_range(1, 5));
        assert!(is_page_in_range(5, 5));
        assert!(!is_page_in_range(6, 5));
        assert!(!is_page_in_range(1, 0));
    }

    #[test]
    fn test_result_range() {
        assert_eq!(result_range(1, 93, 20), (1, 20));
        assert_eq!(result_range(3, 93, 20), (41, 60));
        assert_eq!(result_range(5, 93, 20), (81, 93));
        assert_eq!(result_range(1, 0, 20), (0, 0));
    }
}
