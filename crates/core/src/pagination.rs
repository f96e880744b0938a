//! Pagination

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Most numbered pages shown around the current page.
pub const MAX_WINDOW: u32 = 5;

/// Page bookkeeping returned alongside a paginated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Page this response holds.
    pub current_page: u32,

    /// Last available page.
    pub last_page: u32,

    /// Page size.
    pub per_page: u32,

    /// 1-based index of the first record on this page.
    #[serde(default)]
    pub from: Option<u64>,

    /// 1-based index of the last record on this page.
    #[serde(default)]
    pub to: Option<u64>,

    /// Total number of records.
    #[serde(default)]
    pub total: u64,
}

/// Relation links of a paginated list. Absent relations mean there is no such page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    /// First page.
    #[serde(default)]
    pub first: Option<String>,

    /// Last page.
    #[serde(default)]
    pub last: Option<String>,

    /// Previous page.
    #[serde(default)]
    pub prev: Option<String>,

    /// Next page.
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of a list resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Records on this page.
    pub data: Vec<T>,

    /// Page bookkeeping.
    #[serde(default)]
    pub meta: Option<PaginationMeta>,

    /// Relation links.
    #[serde(default)]
    pub links: Option<PaginationLinks>,
}

/// A pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    /// Button jumping to a page.
    Page {
        /// Target page.
        number: u32,

        /// Whether this is the page being shown.
        current: bool,
    },

    /// Marker for skipped pages.
    Ellipsis,
}

/// Numbered pages shown around `current`: at most [`MAX_WINDOW`] pages, centred where
/// possible and shifted to stay inside `1..=last`.
pub fn window(current: u32, last: u32) -> RangeInclusive<u32> {
    let last = last.max(1);
    let current = current.clamp(1, last);
    let half = MAX_WINDOW / 2;

    let mut start = current.saturating_sub(half).max(1);
    let mut end = current.saturating_add(half).min(last);

    if current <= half {
        end = last.min(MAX_WINDOW);
    }

    if current.saturating_add(half) >= last {
        start = last.saturating_sub(MAX_WINDOW - 1).max(1);
    }

    start..=end
}

/// Controls for a page selector: the window, plus the first and last pages with an
/// ellipsis wherever pages are skipped.
pub fn page_window(current: u32, last: u32) -> SmallVec<[PageControl; 9]> {
    let last = last.max(1);
    let current = current.clamp(1, last);
    let pages = window(current, last);
    let (start, end) = (*pages.start(), *pages.end());

    let mut controls = SmallVec::new();

    if start > 1 {
        controls.push(PageControl::Page {
            number: 1,
            current: false,
        });

        if start > 2 {
            controls.push(PageControl::Ellipsis);
        }
    }

    controls.extend(pages.map(|number| PageControl::Page {
        number,
        current: number == current,
    }));

    if end < last {
        if end < last - 1 {
            controls.push(PageControl::Ellipsis);
        }

        controls.push(PageControl::Page {
            number: last,
            current: false,
        });
    }

    controls
}

/// Whether a page change to `target` should happen.
pub fn is_navigable(target: u32, current: u32, last: u32) -> bool {
    (1..=last.max(1)).contains(&target) && target != current
}

/// Render model for the pagination bar under a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    /// Page being shown.
    pub current_page: u32,

    /// Last available page.
    pub last_page: u32,

    /// Numbered buttons and ellipses.
    pub controls: SmallVec<[PageControl; 9]>,

    /// Whether "previous" is clickable.
    pub previous_enabled: bool,

    /// Whether "next" is clickable.
    pub next_enabled: bool,

    /// "Showing x - y of z results".
    pub summary: String,
}

impl PaginationControls {
    /// Build the bar, or `None` when everything fits on one page.
    pub fn new(meta: &PaginationMeta, links: Option<&PaginationLinks>) -> Option<Self> {
        if meta.last_page <= 1 {
            return None;
        }

        Some(Self {
            current_page: meta.current_page,
            last_page: meta.last_page,
            controls: page_window(meta.current_page, meta.last_page),
            previous_enabled: links.is_some_and(|links| links.prev.is_some()),
            next_enabled: links.is_some_and(|links| links.next.is_some()),
            summary: format!(
                "Showing {} - {} of {} results",
                meta.from.unwrap_or_default(),
                meta.to.unwrap_or_default(),
                meta.total
            ),
        })
    }

    /// Target of the "previous" control, when enabled.
    pub fn previous_page(&self) -> Option<u32> {
        self.previous_enabled
            .then(|| self.current_page.saturating_sub(1))
            .filter(|page| is_navigable(*page, self.current_page, self.last_page))
    }

    /// Target of the "next" control, when enabled.
    pub fn next_page(&self) -> Option<u32> {
        self.next_enabled
            .then(|| self.current_page.saturating_add(1))
            .filter(|page| is_navigable(*page, self.current_page, self.last_page))
    }
}
