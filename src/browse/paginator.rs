//! Page windowing over ordered lists.
//!
//! Pages are 1-based. A page size of zero is clamped to one; page zero and
//! pages past the end are empty rather than errors.

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Index bounds of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// `(page_index - 1) * page_size`, saturating
    pub fn first_index(&self) -> usize {
        self.page_index.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn last_index(&self) -> usize {
        self.first_index().saturating_add(self.page_size)
    }

    /// Slice of `list` covered by this page, clipped to its bounds
    pub fn slice<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        if self.page_index == 0 {
            return &[];
        }
        let start = self.first_index().min(list.len());
        let end = self.last_index().min(list.len());
        &list[start..end]
    }
}

/// Items shown on page `page_index`
pub fn window<T>(list: &[T], page_index: usize, page_size: usize) -> &[T] {
    PageWindow::new(page_index, page_size).slice(list)
}

/// `ceil(len / page_size)`
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}
