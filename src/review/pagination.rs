use std::ops::Range;

/// Walk cursor over the ordered group list, one fixed-size window at a time.
///
/// The cursor sits at the end of the last window shown. Backing up moves it
/// back two page sizes from there, so the window before the current one is
/// shown next.
#[derive(Debug, Clone)]
pub struct Paginator {
    len: usize,
    page_size: usize,
    cursor: usize,
}

impl Paginator {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            len,
            page_size: page_size.max(1),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next window, or `None` once the cursor reaches the end. The last
    /// window may be shorter than a page.
    pub fn next_page(&mut self) -> Option<Range<usize>> {
        if self.cursor >= self.len {
            return None;
        }
        let start = self.cursor;
        let end = (start + self.page_size).min(self.len);
        self.cursor = end;
        Some(start..end)
    }

    pub fn backup(&mut self) {
        self.cursor = self.cursor.saturating_sub(2 * self.page_size);
    }
}
