//! Product list state
//!
//! Owns filters, pagination and the loaded page. It does no I/O itself:
//! every trigger returns the [`ListRequest`] to send, and the widget hands
//! the outcome back through [`ProductListState::complete`].
//!
//! ```text
//! Idle --mount--> Loading --2xx--> Loaded
//!                    |  ^              |
//!            failure |  +--page/filter-+
//!                    v  |
//!                  Errored
//! ```

use contracts::domain::a001_product::{
    ActiveStatusFilter, Product, ProductListFilter, ProductListQuery, ProductListResponse,
    SalesLocationFilter,
};
use leptos::prelude::*;

use crate::shared::api_error::ApiError;
use crate::shared::components::pagination_controls::is_page_in_range;

pub const FETCH_FAILED_MESSAGE: &str = "Erro ao buscar os produtos. Tente novamente mais tarde.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(ApiError),
}

/// Pagination as last reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            total_items: 0,
        }
    }
}

/// A fetch the state wants issued. `seq` identifies it on completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub seq: u64,
    pub filter: ProductListFilter,
    pub query: ProductListQuery,
}

/// What applying a fetch outcome did
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Items and pagination replaced
    Loaded,
    /// Nothing changed; the caller must notify the user
    Failed(ApiError),
    /// Not the request in flight (superseded or already completed); dropped
    Stale,
}

#[derive(Clone, Debug)]
pub struct ProductListState {
    /// Values in the filter form, not yet applied
    draft: ProductListFilter,
    /// Filters the displayed page was fetched with
    applied: ProductListFilter,

    /// Page shown by the controls. Moves ahead of `pagination` while a page
    /// change is in flight and falls back to it on failure.
    page: u32,
    pagination: Pagination,
    items: Vec<Product>,

    status: LoadState,
    mounted: bool,
    last_seq: u64,
    in_flight: Option<u64>,
    /// Filters of a submit still in flight. Page changes wait for it, since
    /// the current page numbers belong to the old result set.
    pending_filter: Option<ProductListFilter>,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            draft: ProductListFilter::default(),
            applied: ProductListFilter::default(),
            page: 1,
            pagination: Pagination::default(),
            items: Vec::new(),
            status: LoadState::Idle,
            mounted: false,
            last_seq: 0,
            in_flight: None,
            pending_filter: None,
        }
    }
}

impl ProductListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ProductListFilter {
        &self.draft
    }

    pub fn applied(&self) -> &ProductListFilter {
        &self.applied
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn status(&self) -> &LoadState {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadState::Loading)
    }

    pub fn set_name(&mut self, name: String) {
        self.draft.name = name;
    }

    pub fn set_status_filter(&mut self, status: ActiveStatusFilter) {
        self.draft.status = status;
    }

    pub fn set_location_filter(&mut self, location: SalesLocationFilter) {
        self.draft.location = location;
    }

    /// First load. `None` once the list has been mounted.
    pub fn mount(&mut self) -> Option<ListRequest> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        let filter = self.applied.clone();
        Some(self.issue(filter, self.page))
    }

    /// Apply the draft filters, always starting over from page 1
    pub fn submit_filters(&mut self) -> ListRequest {
        self.page = 1;
        let filter = self.draft.clone();
        let request = self.issue(filter.clone(), 1);
        self.pending_filter = Some(filter);
        request
    }

    /// Move to another page of the current result set. Pages outside
    /// `[1, total_pages]`, the page already shown and any page asked for
    /// while a filter submit is in flight are ignored.
    pub fn request_page(&mut self, page: u32) -> Option<ListRequest> {
        if let Some(pending) = &self.pending_filter {
            log::debug!("page {} ignored, waiting for filters {:?}", page, pending);
            return None;
        }
        if !is_page_in_range(page, self.pagination.total_pages) || page == self.page {
            return None;
        }
        self.page = page;
        let filter = self.applied.clone();
        Some(self.issue(filter, page))
    }

    /// Apply the outcome of request `seq`
    pub fn complete(
        &mut self,
        seq: u64,
        filter: ProductListFilter,
        result: Result<ProductListResponse, ApiError>,
    ) -> Completion {
        if self.in_flight != Some(seq) {
            log::debug!(
                "dropping product list response #{} (latest is #{})",
                seq,
                self.last_seq
            );
            return Completion::Stale;
        }
        self.in_flight = None;
        self.pending_filter = None;

        match result {
            Ok(response) => {
                self.pagination = Pagination {
                    current_page: response.current_page,
                    total_pages: response.total_pages,
                    total_items: response.total_items,
                };
                self.page = response.current_page;
                self.items = response.items;
                self.applied = filter;
                self.status = LoadState::Loaded;
                Completion::Loaded
            }
            Err(e) => {
                self.page = self.pagination.current_page;
                self.status = LoadState::Errored(e.clone());
                Completion::Failed(e)
            }
        }
    }

    fn issue(&mut self, filter: ProductListFilter, page: u32) -> ListRequest {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        self.pending_filter = None;
        self.status = LoadState::Loading;
        ListRequest {
            seq: self.last_seq,
            query: ProductListQuery::new(&filter, page),
            filter,
        }
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::{ProductId, SalesLocation};

    fn product(id: i64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Produto {}", id),
            description: String::new(),
            price: 10.0,
            active: true,
            path_image: format!("images/{}.png", id),
            ean: format!("{:013}", id),
            created_at: "2024-03-15T14:02:26Z".to_string(),
            sales_location: None,
        }
    }

    fn response(current_page: u32, total_pages: u32, ids: &[i64]) -> ProductListResponse {
        ProductListResponse {
            items: ids.iter().copied().map(product).collect(),
            current_page,
            total_pages,
            total_items: u64::from(total_pages) * 20,
        }
    }

    /// Loaded on page 3 of 5
    fn loaded_on_page_3() -> ProductListState {
        let mut state = ProductListState::new();
        let req = state.mount().unwrap();
        state.complete(req.seq, req.filter, Ok(response(1, 5, &[1, 2])));
        let req = state.request_page(3).unwrap();
        state.complete(req.seq, req.filter, Ok(response(3, 5, &[41, 42])));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ProductListState::new();
        assert_eq!(state.page(), 1);
        assert_eq!(state.status(), &LoadState::Idle);
        assert_eq!(state.draft(), &ProductListFilter::default());
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_mount_requests_first_page_once() {
        let mut state = ProductListState::new();
        let req = state.mount().unwrap();
        assert_eq!(req.query.page, 1);
        assert!(state.is_loading());
        assert!(state.mount().is_none());
    }

    #[test]
    fn test_success_replaces_items_and_pagination() {
        let mut state = ProductListState::new();
        let req = state.mount().unwrap();
        let completion = state.complete(req.seq, req.filter, Ok(response(1, 5, &[1, 2, 3])));

        assert_eq!(completion, Completion::Loaded);
        assert_eq!(state.status(), &LoadState::Loaded);
        assert_eq!(state.items().len(), 3);
        assert_eq!(
            state.pagination(),
            Pagination { current_page: 1, total_pages: 5, total_items: 100 }
        );
    }

    #[test]
    fn test_pagination_is_taken_from_server() {
        let mut state = ProductListState::new();
        let req = state.mount().unwrap();
        // server reports more items than it returned on this page
        let reply = ProductListResponse {
            items: vec![product(1)],
            current_page: 1,
            total_pages: 7,
            total_items: 131,
        };
        state.complete(req.seq, req.filter, Ok(reply));
        assert_eq!(state.pagination().total_items, 131);
        assert_eq!(state.pagination().total_pages, 7);
    }

    #[test]
    fn test_out_of_range_pages_are_ignored() {
        let mut state = loaded_on_page_3();
        let before = state.clone();

        assert!(state.request_page(0).is_none());
        assert!(state.request_page(6).is_none());
        assert_eq!(state.page(), 3);
        assert_eq!(state.status(), before.status());
        assert_eq!(state.pagination(), before.pagination());
    }

    #[test]
    fn test_next_page_triggers_one_fetch() {
        let mut state = loaded_on_page_3();
        let req = state.request_page(4).unwrap();
        assert_eq!(state.page(), 4);
        assert_eq!(req.query.page, 4);
        assert!(state.is_loading());
        // same page again is not a new fetch
        assert!(state.request_page(4).is_none());
    }

    #[test]
    fn test_failed_page_change_keeps_previous_page() {
        let mut state = loaded_on_page_3();
        let items_before = state.items().to_vec();
        let pagination_before = state.pagination();

        let req = state.request_page(4).unwrap();
        let completion = state.complete(req.seq, req.filter.clone(), Err(ApiError::Status(500)));

        assert_eq!(completion, Completion::Failed(ApiError::Status(500)));
        assert_eq!(state.items(), items_before.as_slice());
        assert_eq!(state.pagination(), pagination_before);
        assert_eq!(state.page(), 3);
        assert_eq!(state.status(), &LoadState::Errored(ApiError::Status(500)));

        // completing the same request again does not notify twice
        let again = state.complete(req.seq, req.filter, Err(ApiError::Status(500)));
        assert_eq!(again, Completion::Stale);
    }

    #[test]
    fn test_errored_state_retries_on_next_trigger() {
        let mut state = loaded_on_page_3();
        let req = state.request_page(4).unwrap();
        state.complete(req.seq, req.filter, Err(ApiError::Network("offline".to_string())));

        let retry = state.request_page(4).unwrap();
        assert!(state.is_loading());
        state.complete(retry.seq, retry.filter, Ok(response(4, 5, &[61])));
        assert_eq!(state.page(), 4);
        assert_eq!(state.status(), &LoadState::Loaded);
    }

    #[test]
    fn test_submit_resets_to_first_page() {
        let mut state = loaded_on_page_3();
        state.set_name("shirt".to_string());
        state.set_status_filter(ActiveStatusFilter::Active);
        state.set_location_filter(SalesLocationFilter::Only(SalesLocation::Store));

        let req = state.submit_filters();
        assert_eq!(state.page(), 1);
        assert_eq!(req.query.page, 1);
        assert_eq!(req.query.search.as_deref(), Some("shirt"));
        assert_eq!(req.query.is_active, Some(1));
        assert_eq!(req.query.sales_location, Some(SalesLocation::Store));
    }

    #[test]
    fn test_filters_apply_only_on_success() {
        let mut state = loaded_on_page_3();
        state.set_name("shirt".to_string());

        // typing alone changes nothing that page changes use
        let req = state.request_page(2).unwrap();
        assert_eq!(req.query.search, None);
        state.complete(req.seq, req.filter, Ok(response(2, 5, &[21])));

        let req = state.submit_filters();
        state.complete(req.seq, req.filter, Err(ApiError::Status(503)));
        assert_eq!(state.applied().name, "");
        assert_eq!(state.draft().name, "shirt");
        assert_eq!(state.page(), 2);

        let req = state.submit_filters();
        state.complete(req.seq, req.filter, Ok(response(1, 1, &[7])));
        assert_eq!(state.applied().name, "shirt");
        assert_eq!(state.pagination().total_pages, 1);
    }

    #[test]
    fn test_page_change_waits_for_filter_submit() {
        let mut state = ProductListState::new();
        let req = state.mount().unwrap();
        state.complete(req.seq, req.filter, Ok(response(1, 5, &[1, 2])));

        state.set_name("shirt".to_string());
        let submit = state.submit_filters();
        assert!(state.request_page(2).is_none());
        assert_eq!(state.page(), 1);

        assert_eq!(
            state.complete(submit.seq, submit.filter, Ok(response(1, 2, &[9]))),
            Completion::Loaded
        );
        assert_eq!(state.applied().name, "shirt");
        assert_eq!(state.draft().name, "shirt");

        let next = state.request_page(2).unwrap();
        assert_eq!(next.query.search.as_deref(), Some("shirt"));
        assert_eq!(
            state.complete(next.seq, next.filter, Ok(response(2, 2, &[10]))),
            Completion::Loaded
        );
        assert_eq!(state.applied().name, "shirt");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_page_change_allowed_after_failed_submit() {
        let mut state = loaded_on_page_3();
        state.set_name("shirt".to_string());
        let submit = state.submit_filters();
        state.complete(submit.seq, submit.filter, Err(ApiError::Status(500)));

        let req = state.request_page(4).unwrap();
        assert_eq!(req.query.search, None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = loaded_on_page_3();
        let first = state.request_page(4).unwrap();
        let second = state.request_page(5).unwrap();

        // the later request resolves first
        assert_eq!(
            state.complete(second.seq, second.filter, Ok(response(5, 5, &[81]))),
            Completion::Loaded
        );
        assert_eq!(
            state.complete(first.seq, first.filter, Ok(response(4, 5, &[61]))),
            Completion::Stale
        );
        assert_eq!(state.page(), 5);
        assert_eq!(state.items()[0].id, ProductId(81));
    }

    #[test]
    fn test_stale_failure_is_silent() {
        let mut state = loaded_on_page_3();
        let first = state.request_page(4).unwrap();
        let second = state.request_page(5).unwrap();
        assert_eq!(
            state.complete(first.seq, first.filter, Err(ApiError::Status(500))),
            Completion::Stale
        );
        assert!(state.is_loading());
        state.complete(second.seq, second.filter, Ok(response(5, 5, &[81])));
        assert_eq!(state.status(), &LoadState::Loaded);
    }
}
