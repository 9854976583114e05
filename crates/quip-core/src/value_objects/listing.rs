//! Paging and sorting parameters for content listings
//!
//! Every parser here is lenient: unparseable or out-of-range input falls
//! back to the default instead of failing the request.

/// Column a post listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    ModifiedAt,
    Id,
    Score,
    ReactionCount,
    CommentCount,
}

impl SortField {
    /// Unknown values fall back to `created_at`
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("modified_at") => Self::ModifiedAt,
            Some("id") => Self::Id,
            Some("score") => Self::Score,
            Some("reaction_count" | "reactions_count") => Self::ReactionCount,
            Some("comment_count") => Self::CommentCount,
            _ => Self::CreatedAt,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::ModifiedAt => "modified_at",
            Self::Id => "id",
            Self::Score => "score",
            Self::ReactionCount => "reaction_count",
            Self::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` means descending
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Offset-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub const MAX_PAGE_SIZE: i64 = 100;
    pub const DEFAULT_POSTS_PAGE_SIZE: i64 = 10;
    pub const DEFAULT_MODERATION_PAGE_SIZE: i64 = 50;

    /// Build a window, replacing out-of-range values with defaults.
    ///
    /// `page < 1` becomes 1; a page size outside `[1, 100]` becomes
    /// `default_page_size`.
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_page_size: i64) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            page_size: page_size
                .filter(|s| (1..=Self::MAX_PAGE_SIZE).contains(s))
                .unwrap_or(default_page_size),
        }
    }

    pub fn parse_lenient(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: i64,
    ) -> Self {
        Self::new(
            page.and_then(|s| s.trim().parse().ok()),
            page_size.and_then(|s| s.trim().parse().ok()),
            default_page_size,
        )
    }

    pub fn posts_default() -> Self {
        Self::new(None, None, Self::DEFAULT_POSTS_PAGE_SIZE)
    }

    pub fn moderation_default() -> Self {
        Self::new(None, None, Self::DEFAULT_MODERATION_PAGE_SIZE)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Full parameter set for `ListPosts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub page: PageRequest,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: PageRequest::posts_default(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl PostQuery {
    pub fn parse_lenient(
        page: Option<&str>,
        page_size: Option<&str>,
        sort_field: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        Self {
            page: PageRequest::parse_lenient(
                page,
                page_size,
                PageRequest::DEFAULT_POSTS_PAGE_SIZE,
            ),
            sort_field: SortField::parse_lenient(sort_field),
            sort_order: SortOrder::parse_lenient(sort_order),
        }
    }
}
