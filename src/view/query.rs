use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    #[default]
    All,
    Running,
    Delayed,
    Stopped,
    /// Trains whose recommendation is anything but "proceed normally".
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    TrainNumber,
    TrainName,
    Status,
    #[default]
    DelayMinutes,
    CurrentKm,
    SpeedKmh,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Table controls owned by the view layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewQuery {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-indexed.
    pub page: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            sort_key: SortKey::DelayMinutes,
            sort_direction: SortDirection::Descending,
            page: 1,
        }
    }
}

impl ViewQuery {
    /// Clicking a column header: ascending first, a second click on the same
    /// ascending column flips it.
    pub fn request_sort(&mut self, key: SortKey) {
        let direction = if self.sort_key == key && self.sort_direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.page = 1;
    }

    /// Returns false and leaves the page untouched when `page` is out of range.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page == 0 || page > total_pages {
            return false;
        }
        self.page = page;
        true
    }
}

pub fn total_pages(match_count: usize) -> usize {
    match_count.div_ceil(PAGE_SIZE)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
