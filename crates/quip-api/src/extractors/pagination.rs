//! Listing parameter extractors
//!
//! Page and sort parameters never fail a request: anything unparseable or
//! out of range falls back to the default. Both snake_case and camelCase
//! names are accepted.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use quip_core::{PageRequest, PostQuery};

/// Raw query pairs in request order; a malformed query string reads as empty
async fn query_pairs<S: Send + Sync>(parts: &mut Parts, state: &S) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// First value given for `name` or its camelCase `alias`, whichever comes first
fn first_value(pairs: &[(String, String)], name: &str, alias: Option<&str>) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name || Some(key.as_str()) == alias)
        .map(|(_, value)| value.clone())
}

/// Raw post listing query parameters
#[derive(Debug, Default)]
pub struct ListPostsParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ListPostsParams {
    /// Repeated keys and alias pairs never fail; the first occurrence wins
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page", None),
            page_size: first_value(pairs, "page_size", Some("pageSize")),
            sort_field: first_value(pairs, "sort_field", Some("sortField")),
            sort_order: first_value(pairs, "sort_order", Some("sortOrder")),
        }
    }
}

impl From<ListPostsParams> for PostQuery {
    fn from(params: ListPostsParams) -> Self {
        PostQuery::parse_lenient(
            params.page.as_deref(),
            params.page_size.as_deref(),
            params.sort_field.as_deref(),
            params.sort_order.as_deref(),
        )
    }
}

/// Raw page-only query parameters
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page", None),
            page_size: first_value(pairs, "page_size", Some("pageSize")),
        }
    }

    pub fn to_page(&self, default_page_size: i64) -> PageRequest {
        PageRequest::parse_lenient(
            self.page.as_deref(),
            self.page_size.as_deref(),
            default_page_size,
        )
    }
}

/// Normalized post listing parameters
#[derive(Debug, Clone, Copy)]
pub struct PostListing(pub PostQuery);

#[async_trait]
impl<S> FromRequestParts<S> for PostListing
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts, state).await;
        Ok(PostListing(ListPostsParams::from_pairs(&pairs).into()))
    }
}

/// Page window for moderation lists (default page size 50)
#[derive(Debug, Clone, Copy)]
pub struct ModerationPage(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for ModerationPage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts, state).await;
        Ok(ModerationPage(
            PageParams::from_pairs(&pairs).to_page(PageRequest::DEFAULT_MODERATION_PAGE_SIZE),
        ))
    }
}
