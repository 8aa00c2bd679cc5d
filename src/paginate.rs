//! Fixed-size, 1-based pagination over an already-ordered slice.
//!
//! Callers hand in items sorted by id so page N is reproducible between
//! calls as long as nothing is inserted or deleted in between.

/// A validated page request: `page >= 1`, `page_size >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
  page: usize,
  page_size: usize,
}

impl PageRequest {
  /// Returns `None` for a non-positive page or a zero page size.
  pub fn new(page: i64, page_size: usize) -> Option<Self> {
    if page < 1 || page_size == 0 {
      return None;
    }
    let page = usize::try_from(page).ok()?;
    Some(Self { page, page_size })
  }

  pub fn page(&self) -> usize { self.page }

  fn bounds(&self) -> (usize, usize) {
    let start = (self.page - 1).saturating_mul(self.page_size);
    (start, start.saturating_add(self.page_size))
  }
}

/// Slice `items[(page-1)*size .. page*size]`, clipped to the end. Empty past the last page.
pub fn paginate<T>(items: &[T], req: PageRequest) -> &[T] {
  let (start, end) = req.bounds();
  if start >= items.len() {
    return &[];
  }
  &items[start..end.min(items.len())]
}
