//! Listing query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::{PostFilter, SortOrder};

/// Query parameters for the public published listing.
///
/// Uses `serde_with` to parse the page number from query strings as an
/// integer. Missing filters default to the canonical empty values so the
/// default request maps to the canonical cache key.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    /// Search term matched against title and body.
    #[serde(default, rename = "q")]
    pub search: Option<String>,

    /// Author display-name filter.
    #[serde(default)]
    pub author: Option<String>,

    /// `latest` (default), `oldest`, or `title`.
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListQuery {
    /// Validates the query and converts it into a page number and filter.
    pub fn validate(&self) -> Result<(i64, PostFilter), String> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        let sort = match self.sort.as_deref() {
            None | Some("") => SortOrder::default(),
            Some(raw) => raw.parse::<SortOrder>()?,
        };

        let filter = PostFilter::new(
            self.search.clone().unwrap_or_default(),
            self.author.clone().unwrap_or_default(),
            sort,
        );

        Ok((page as i64, filter))
    }
}

/// Pagination for the admin listing (no filters).
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn validate(&self) -> Result<i64, String> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }
        Ok(page as i64)
    }
}
