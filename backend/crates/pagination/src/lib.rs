//! Snapshot-backed pagination primitives for mission board listings.
//!
//! A [`PagedView`] owns an immutable snapshot of rows captured from a query
//! together with a zero-based page cursor and a fixed page size. Navigation is
//! total: moving past either end is a no-op that reports `false` rather than
//! an error, and the cursor never wraps. The view never re-queries its
//! source, so rows mutated after the snapshot was taken stay invisible until
//! a new view is built.
//!
//! ```
//! use pagination::PagedView;
//!
//! let mut view = PagedView::new((1..=45).collect::<Vec<u32>>(), 20)?;
//! assert_eq!(view.page_count(), 3);
//! assert!(view.next_page());
//! assert!(view.next_page());
//! assert!(!view.next_page());
//! assert_eq!(view.current_rows(), &[41, 42, 43, 44, 45]);
//! # Ok::<(), pagination::PageSizeError>(())
//! ```

use std::num::NonZeroUsize;

use serde::Serialize;

/// Page size used by listings that do not request one explicitly.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Upper bound accepted for caller-supplied page sizes.
pub const MAX_PAGE_SIZE: usize = 100;

/// Raised when a view is built with an unusable page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageSizeError {
    /// Page size must be at least one row.
    #[error("page size must be greater than zero")]
    Zero,
    /// Page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}, got {requested}")]
    TooLarge {
        /// Largest accepted page size.
        max: usize,
        /// Page size that was requested.
        requested: usize,
    },
}

/// Immutable snapshot plus a page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedView<T> {
    rows: Vec<T>,
    page: usize,
    page_size: NonZeroUsize,
}

impl<T> PagedView<T> {
    /// Build a view positioned on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError`] when `page_size` is zero or larger than
    /// [`MAX_PAGE_SIZE`].
    pub fn new(rows: Vec<T>, page_size: usize) -> Result<Self, PageSizeError> {
        if page_size > MAX_PAGE_SIZE {
            return Err(PageSizeError::TooLarge {
                max: MAX_PAGE_SIZE,
                requested: page_size,
            });
        }
        let size = NonZeroUsize::new(page_size).ok_or(PageSizeError::Zero)?;
        Ok(Self::with_page_size(rows, size))
    }

    /// Build a view from an already validated page size.
    #[must_use]
    pub const fn with_page_size(rows: Vec<T>, page_size: NonZeroUsize) -> Self {
        Self {
            rows,
            page: 0,
            page_size,
        }
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of rows rendered per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of rows in the snapshot.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Number of pages; an empty snapshot still renders one (empty) page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total().div_ceil(self.page_size.get()).max(1)
    }

    /// Whether [`Self::next_page`] would move the cursor.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page
            .saturating_add(1)
            .saturating_mul(self.page_size.get())
            < self.total()
    }

    /// Whether [`Self::prev_page`] would move the cursor.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Advance one page when more rows remain; returns whether the cursor moved.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Retreat one page unless already on the first; returns whether the cursor moved.
    pub const fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move towards `page`, stopping at the last page. Returns the page reached.
    pub fn seek(&mut self, page: usize) -> usize {
        self.page = page.min(self.page_count().saturating_sub(1));
        self.page
    }

    /// Rows visible at the current cursor.
    #[must_use]
    pub fn current_rows(&self) -> &[T] {
        let start = self.page.saturating_mul(self.page_size.get());
        let end = start.saturating_add(self.page_size.get()).min(self.total());
        self.rows.get(start..end).unwrap_or_default()
    }

    /// Borrowed description of the current page.
    #[must_use]
    pub fn current_page(&self) -> Page<'_, T> {
        Page {
            index: self.page,
            count: self.page_count(),
            total: self.total(),
            rows: self.current_rows(),
        }
    }

    /// Render the current page as text, one line per row plus a footer.
    #[must_use]
    pub fn render_with<F>(&self, render_row: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.current_page().render_with(render_row)
    }

    /// Build a serialisable envelope for the current page.
    #[must_use]
    pub fn envelope<U, F>(&self, map_row: F) -> PageEnvelope<U>
    where
        F: FnMut(&T) -> U,
    {
        PageEnvelope {
            items: self.current_rows().iter().map(map_row).collect(),
            page: self.page,
            page_size: self.page_size.get(),
            page_count: self.page_count(),
            total: self.total(),
            has_next: self.has_next(),
            has_prev: self.has_prev(),
        }
    }

    /// Consume the view and return the snapshot.
    #[must_use]
    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

/// Rows visible at one cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Zero-based page index.
    pub index: usize,
    /// Total number of pages in the snapshot.
    pub count: usize,
    /// Total number of rows in the snapshot.
    pub total: usize,
    /// Rows on this page.
    pub rows: &'a [T],
}

impl<T> Page<'_, T> {
    /// Render rows line by line followed by a `Page x/y` footer.
    #[must_use]
    pub fn render_with<F>(&self, render_row: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let mut lines: Vec<String> = self.rows.iter().map(render_row).collect();
        lines.push(format!(
            "Page {}/{} ({} total)",
            self.index.saturating_add(1),
            self.count,
            self.total
        ));
        lines.join("\n")
    }
}

/// JSON page envelope returned by listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Rows on the current page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of pages in the snapshot.
    pub page_count: usize,
    /// Number of rows in the snapshot.
    pub total: usize,
    /// Whether a following page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_prev: bool,
}
