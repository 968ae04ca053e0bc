//! # Search Value Objects
//!
//! [`SearchParams`] normalizes loosely typed paging, sorting and filtering
//! input (as it would arrive from a query string or a JSON body) into a
//! well-formed request. [`SearchResult`] carries one page of items plus the
//! metadata computed from it.
//!
//! ## Normalization rules
//!
//! | Input | Rule |
//! |-------|------|
//! | `page` | positive integer, otherwise `1`; booleans are ignored |
//! | `perPage` | positive integer, otherwise the current value (`15`) |
//! | `sort` | `null` / absent / `""` become `None`, anything else is stringified |
//! | `sortDir` | `None` without `sort`; `asc`/`desc` (any case), otherwise `asc` |
//! | `filter` | same as `sort` |
//!
//! ```rust
//! use repository_framework::{SearchParams, SearchProps, SortDirection};
//!
//! let params = SearchParams::new(SearchProps::new().page("2").per_page(0).sort("name"));
//! assert_eq!(params.page(), 2);
//! assert_eq!(params.per_page(), 15);
//! assert_eq!(params.sort_dir(), Some(SortDirection::Asc));
//! ```

use crate::entity::ResourceEntity;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{self, Display};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 15;

/// Sort direction for ordered searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Case-insensitive parse; anything but `asc`/`desc` is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw search input `{ page?, perPage?, sort?, sortDir?, filter? }`.
///
/// Fields are kept as JSON values so that strings, numbers, booleans and
/// nulls all reach the normalization rules untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchProps {
    pub page: Option<Value>,
    pub per_page: Option<Value>,
    pub sort: Option<Value>,
    pub sort_dir: Option<Value>,
    pub filter: Option<Value>,
}

impl SearchProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn sort_dir(mut self, sort_dir: impl Into<Value>) -> Self {
        self.sort_dir = Some(sort_dir.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Normalized paging, sorting and filtering request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    page: usize,
    per_page: usize,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(SearchProps::default())
    }
}

impl From<SearchProps> for SearchParams {
    fn from(props: SearchProps) -> Self {
        Self::new(props)
    }
}

impl SearchParams {
    /// Seeds every field with its default, then applies the validated
    /// overrides from `props`. `sort` is applied before `sort_dir`.
    pub fn new(props: SearchProps) -> Self {
        let mut params = Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        };
        params.set_page(props.page.as_ref());
        params.set_per_page(props.per_page.as_ref());
        params.set_sort(props.sort.as_ref());
        params.set_sort_dir(props.sort_dir.as_ref());
        params.set_filter(props.filter.as_ref());
        params
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn set_page(&mut self, value: Option<&Value>) {
        if let Some(Value::Bool(_)) = value {
            return;
        }
        self.page = value.and_then(positive_integer).unwrap_or(DEFAULT_PAGE);
    }

    fn set_per_page(&mut self, value: Option<&Value>) {
        if let Some(Value::Bool(_)) = value {
            return;
        }
        self.per_page = value.and_then(positive_integer).unwrap_or(self.per_page);
    }

    fn set_sort(&mut self, value: Option<&Value>) {
        self.sort = non_empty_text(value);
    }

    fn set_sort_dir(&mut self, value: Option<&Value>) {
        if self.sort.is_none() {
            self.sort_dir = None;
            return;
        }
        let dir = value.and_then(Value::as_str).and_then(SortDirection::parse);
        self.sort_dir = Some(dir.unwrap_or(SortDirection::Asc));
    }

    fn set_filter(&mut self, value: Option<&Value>) {
        self.filter = non_empty_text(value);
    }
}

/// Numeric coercion: numbers and numeric strings are accepted when they are
/// finite, strictly positive integers. A blank string counts as zero.
fn positive_integer(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    if number.is_finite() && number > 0.0 && number.fract() == 0.0 {
        Some(number as usize)
    } else {
        None
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Inputs for [`SearchResult::new`]. `last_page` is never supplied; it is
/// always derived from `total` and `per_page`.
#[derive(Debug, Clone)]
pub struct SearchResultProps<E> {
    pub items: Vec<E>,
    pub total: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<String>,
}

/// One page of a search plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: usize,
    current_page: usize,
    per_page: usize,
    last_page: usize,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<E> SearchResult<E> {
    pub fn new(props: SearchResultProps<E>) -> Self {
        let last_page = if props.per_page == 0 {
            0
        } else {
            props.total.div_ceil(props.per_page)
        };
        Self {
            items: props.items,
            total: props.total,
            current_page: props.current_page,
            per_page: props.per_page,
            last_page,
            sort: props.sort,
            sort_dir: props.sort_dir,
            filter: props.filter,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn last_page(&self) -> usize {
        self.last_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl<E: ResourceEntity> SearchResult<E> {
    /// Serializes the result. With `force_entity` the items are emitted as
    /// their [`ResourceEntity::to_json`] projections, otherwise as their
    /// raw serialization.
    pub fn to_json(&self, force_entity: bool) -> serde_json::Result<Value> {
        let items = if force_entity {
            Value::Array(self.items.iter().map(ResourceEntity::to_json).collect())
        } else {
            serde_json::to_value(&self.items)?
        };
        Ok(json!({
            "items": items,
            "total": self.total,
            "currentPage": self.current_page,
            "perPage": self.per_page,
            "lastPage": self.last_page,
            "sort": self.sort,
            "sortDir": self.sort_dir,
            "filter": self.filter,
        }))
    }
}
