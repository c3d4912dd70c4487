//! Fixed-height page slicing of the captured bitmap.

/// Number of pages a capture of `content_height_px` occupies. Always at
/// least one: an empty document still exports a single blank page.
pub fn page_count(content_height_px: u32, page_height_px: u32) -> usize {
    if page_height_px == 0 {
        return 1;
    }
    (content_height_px.div_ceil(page_height_px)).max(1) as usize
}

/// Top offsets, in capture pixels, of each page slice.
pub fn slice_offsets(content_height_px: u32, page_height_px: u32) -> Vec<u32> {
    (0..page_count(content_height_px, page_height_px))
        .map(|i| i as u32 * page_height_px)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_is_one_page() {
        assert_eq!(page_count(1122, 1122), 1);
    }

    #[test]
    fn one_pixel_overflow_adds_a_page() {
        assert_eq!(page_count(1123, 1122), 2);
    }

    #[test]
    fn long_content_spans_three_pages() {
        assert_eq!(page_count(3000, 1122), 3);
    }

    #[test]
    fn empty_content_still_has_one_page() {
        assert_eq!(page_count(0, 1122), 1);
        assert_eq!(slice_offsets(0, 1122), vec![0]);
    }

    #[test]
    fn offsets_step_by_page_height() {
        assert_eq!(slice_offsets(2500, 1000), vec![0, 1000, 2000]);
    }
}
