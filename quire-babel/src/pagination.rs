//! Pagination engine.
//!
//! Splits one continuously laid-out block of content into page-sized slices.
//! Each offset is the distance from the top of the content to the top of a
//! page; the renderer draws the content shifted up by that offset and clips
//! to the page box. The last page may be partially filled.

/// Page offsets for content of `total_height` flowed onto pages whose content
/// box is `page_height` tall.
///
/// Returns `ceil(total_height / page_height)` offsets, at least one. The
/// first offset is `0` and consecutive offsets differ by `page_height`.
/// A non-positive or non-finite page height yields a single page.
pub fn paginate(total_height: f64, page_height: f64) -> Vec<f64> {
    page_offsets(total_height, page_height).collect()
}

/// Number of pages [`paginate`] produces.
pub fn page_count(total_height: f64, page_height: f64) -> usize {
    if !(page_height.is_finite() && page_height > 0.0) {
        return 1;
    }
    if !(total_height.is_finite() && total_height > 0.0) {
        return 1;
    }
    ((total_height / page_height).ceil() as usize).max(1)
}

/// Iterator form of [`paginate`].
pub fn page_offsets(total_height: f64, page_height: f64) -> impl Iterator<Item = f64> {
    let count = page_count(total_height, page_height);
    let step = if page_height.is_finite() && page_height > 0.0 {
        page_height
    } else {
        0.0
    };
    (0..count).map(move |page| page as f64 * step)
}

/// Part of the span `[top, top + height)` that falls on the page starting at
/// `offset`, as `(top, height)` in content coordinates.
///
/// Returns `None` when the span does not reach into the page. Zero-height
/// spans belong to the page containing `top`.
pub fn visible_slice(top: f64, height: f64, offset: f64, page_height: f64) -> Option<(f64, f64)> {
    let page_end = offset + page_height;
    if height <= 0.0 {
        return (top >= offset && top < page_end).then_some((top, 0.0));
    }
    let start = top.max(offset);
    let end = (top + height).min(page_end);
    (end > start).then_some((start, end - start))
}
