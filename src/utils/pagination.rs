use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const MAX_PER_PAGE: u32 = 100;
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u32,
    pub meta: Option<PaginatedMeta>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaginatedMeta {
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u32, page: Option<&Page>) -> Paginated<T> {
        Self {
            items,
            total,
            meta: page.map(|page| PaginatedMeta {
                total,
                page: page.page,
                per_page: page.per_page,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.per_page as i64
    }

    fn is_valid(&self) -> bool {
        self.page >= 1 && (1..=MAX_PER_PAGE).contains(&self.per_page)
    }
}

#[derive(Deserialize, Default, Debug)]
struct PaginationQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Page window taken from `page`/`per_page`. Holds `None` when the client
/// sent neither, in which case the whole collection is returned.
#[derive(Clone, Debug, Default)]
pub struct Pagination(pub Option<Page>);

impl Pagination {
    fn from_query(query: PaginationQuery) -> Option<Self> {
        let page = match (query.page, query.per_page) {
            (None, None) => return Some(Self(None)),
            (page, per_page) => Page {
                page: page.unwrap_or(DEFAULT_PAGE),
                per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
            },
        };

        page.is_valid().then_some(Self(Some(page)))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extract::<Query<PaginationQuery>>()
            .await
            .ok()
            .and_then(|Query(query)| Pagination::from_query(query))
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid pagination options"})),
                )
                    .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<u32>, per_page: Option<u32>) -> PaginationQuery {
        PaginationQuery { page, per_page }
    }

    #[test]
    fn offset_starts_at_zero_for_first_page() {
        let page = Page {
            page: 1,
            per_page: 20,
        };
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);

        let page = Page {
            page: 3,
            per_page: 20,
        };
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn no_window_when_neither_option_is_given() {
        assert_eq!(Pagination::from_query(query(None, None)).unwrap().0, None);
    }

    #[test]
    fn missing_option_falls_back_to_default() {
        assert_eq!(
            Pagination::from_query(query(Some(2), None)).unwrap().0,
            Some(Page {
                page: 2,
                per_page: DEFAULT_PER_PAGE
            })
        );
    }

    #[test]
    fn rejects_zero_page_and_oversized_pages() {
        assert!(Pagination::from_query(query(Some(0), None)).is_none());
        assert!(Pagination::from_query(query(None, Some(500))).is_none());
    }

    #[test]
    fn meta_is_only_set_for_a_window() {
        let all = Paginated::new(vec![1, 2, 3], 3, None);
        assert!(all.meta.is_none());

        let page = Page {
            page: 1,
            per_page: 2,
        };
        let windowed = Paginated::new(vec![1, 2], 3, Some(&page));
        assert_eq!(
            windowed.meta,
            Some(PaginatedMeta {
                total: 3,
                page: 1,
                per_page: 2
            })
        );
    }
}
