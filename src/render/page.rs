//! Pagination envelope for list and search output
//!
//! Lists always print as `{ "items": [...] }`. A `pagination` key is added
//! only when the tracker reports another page; its presence is the signal,
//! so there is never a `hasMore: false`.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::prune::prune;
use super::truncate::Truncation;
use crate::domain::{PageInfo, MAX_PAGE_SIZE};
use crate::storage::SettingsStore;

/// Page size used when neither `--limit` nor settings provide one
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageDescriptor>,
}

impl Envelope {
    /// Prunes and truncates each item and attaches the continuation, if any
    pub fn build(items: Vec<Value>, page_info: &PageInfo, truncation: &Truncation) -> Self {
        let items = items
            .into_iter()
            .map(|item| truncation.apply(prune(item)))
            .collect();

        let pagination = page_info.has_next_page.then(|| PageDescriptor {
            has_more: true,
            next_cursor: page_info.end_cursor.clone(),
        });

        Self { items, pagination }
    }
}

/// Picks the page size: explicit limit, then persisted default, then 50
///
/// Settings are read from disk on every call.
pub fn resolve_page_size(limit: Option<usize>, settings: &SettingsStore) -> Result<usize> {
    if let Some(limit) = limit {
        return Ok(limit);
    }

    // A hand-edited file can hold values `config set` would reject.
    let settings = settings.load()?;
    Ok(settings
        .pagination
        .default_page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE))
}
