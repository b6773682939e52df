//! Page arithmetic and navigation.
//!
//! # Responsibility
//! - Compute page windows over an already-ordered sequence.
//! - Provide clamping navigation as pure functions of `(current, total)`.
//!
//! # Invariants
//! - Pages are 1-indexed; there is always at least one page.
//! - Navigation never errors; at a boundary it returns the same page.
//! - Out-of-range windows are empty, never a panic.

use crate::config::normalize_page_size;
use std::ops::Range;

/// Number of pages needed for `count` items, minimum 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(normalize_page_size(page_size)).max(1)
}

/// Index range of page `page_number` within a sequence of length `len`.
///
/// Page 0 and pages past the end produce an empty range.
pub fn page_bounds(page_number: usize, page_size: usize, len: usize) -> Range<usize> {
    let size = normalize_page_size(page_size);
    let Some(start) = page_number
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
    else {
        return 0..0;
    };
    if start >= len {
        return 0..0;
    }
    let end = start.saturating_add(size).min(len);
    start..end
}

pub fn clamp_page(current: usize, total: usize) -> usize {
    current.clamp(1, total.max(1))
}

pub fn first_page() -> usize {
    1
}

pub fn prev_page(current: usize, total: usize) -> usize {
    clamp_page(current, total).saturating_sub(1).max(1)
}

pub fn next_page(current: usize, total: usize) -> usize {
    clamp_page(current.saturating_add(1), total)
}

pub fn last_page(total: usize) -> usize {
    total.max(1)
}

/// Current page held by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current: first_page(),
        }
    }
}

impl PageCursor {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn first(&mut self) -> usize {
        self.current = first_page();
        self.current
    }

    pub fn prev(&mut self, total: usize) -> usize {
        self.current = prev_page(self.current, total);
        self.current
    }

    pub fn next(&mut self, total: usize) -> usize {
        self.current = next_page(self.current, total);
        self.current
    }

    pub fn last(&mut self, total: usize) -> usize {
        self.current = last_page(total);
        self.current
    }

    /// Jumps to `page`, clamped into `1..=total`.
    pub fn go_to(&mut self, page: usize, total: usize) -> usize {
        self.current = clamp_page(page, total);
        self.current
    }

    /// Re-clamps after the page count changed.
    pub fn clamp(&mut self, total: usize) -> usize {
        self.current = clamp_page(self.current, total);
        self.current
    }
}
