use serde::Deserialize;

/// Offset/limit window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// A window covering every row.
    pub const ALL: Page = Page { skip: 0, limit: i64::MAX };
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

/// The `skip`/`limit` query parameters accepted by list endpoints.
///
/// Unsigned so that negative values are rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        let defaults = Page::default();
        Self {
            skip: query.skip.map(i64::from).unwrap_or(defaults.skip),
            limit: query.limit.map(i64::from).unwrap_or(defaults.limit),
        }
    }
}
