//! Effects keyed on the window scroll offset.

pub const PAGE_TOP_VISIBLE_AFTER: f64 = 300.0;
pub const HEADER_SCROLLED_AFTER: f64 = 100.0;
pub const INDICATOR_HIDDEN_AFTER: f64 = 200.0;
/// Height of the narrow-layout header; it never hides above this offset.
pub const AUTO_HIDE_HEADER_HEIGHT: f64 = 54.0;
/// Gap kept between the sticky header and an anchor target.
pub const ANCHOR_GAP: f64 = 10.0;

pub const PAGE_TOP_THROTTLE_MS: u32 = 50;
pub const HEADER_THROTTLE_MS: u32 = 50;
pub const PROGRESS_THROTTLE_MS: u32 = 16;
pub const INDICATOR_THROTTLE_MS: u32 = 100;

pub fn page_top_visible(scroll_y: f64) -> bool {
    scroll_y > PAGE_TOP_VISIBLE_AFTER
}

pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLLED_AFTER
}

pub fn indicator_hidden(scroll_y: f64) -> bool {
    scroll_y > INDICATOR_HIDDEN_AFTER
}

pub fn progress_percent(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable > 0.0 {
        scroll_y / scrollable * 100.0
    } else {
        0.0
    }
}

pub fn progress_width(scroll_y: f64, document_height: f64, viewport_height: f64) -> String {
    format!(
        "{}%",
        progress_percent(scroll_y, document_height, viewport_height)
    )
}

/// Hides the narrow-layout header while scrolling down and shows it again
/// on the way up.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderAutoHide {
    last_y: f64,
}

impl HeaderAutoHide {
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let hidden = scroll_y > AUTO_HIDE_HEADER_HEIGHT && scroll_y > self.last_y;
        self.last_y = scroll_y;
        hidden
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorTarget {
    Top,
    Selector(String),
}

/// Classifies an in-page link. `None` for links that are not fragments.
pub fn anchor_target(href: &str) -> Option<AnchorTarget> {
    if !href.starts_with('#') {
        return None;
    }
    if href == "#" {
        return Some(AnchorTarget::Top);
    }
    Some(AnchorTarget::Selector(href.to_string()))
}

pub fn anchor_scroll_top(target_client_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_client_top + scroll_y - header_height - ANCHOR_GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strict() {
        assert!(!page_top_visible(300.0));
        assert!(page_top_visible(300.5));
        assert!(!header_scrolled(100.0));
        assert!(header_scrolled(101.0));
        assert!(!indicator_hidden(200.0));
        assert!(indicator_hidden(201.0));
    }

    #[test]
    fn progress_covers_scrollable_range() {
        assert_eq!(progress_percent(0.0, 3_000.0, 1_000.0), 0.0);
        assert_eq!(progress_percent(1_000.0, 3_000.0, 1_000.0), 50.0);
        assert_eq!(progress_percent(2_000.0, 3_000.0, 1_000.0), 100.0);
        assert_eq!(progress_width(500.0, 900.0, 900.0), "0%");
        assert_eq!(progress_width(1_000.0, 3_000.0, 1_000.0), "50%");
    }

    #[test]
    fn header_hides_on_the_way_down_only() {
        let mut header = HeaderAutoHide::default();

        assert!(!header.update(40.0));
        assert!(header.update(120.0));
        assert!(header.update(180.0));
        assert!(!header.update(150.0));
        assert!(!header.update(150.0));
        assert!(header.update(160.0));
        assert!(!header.update(30.0));
    }

    #[test]
    fn anchors_classify_fragments() {
        assert_eq!(anchor_target("#"), Some(AnchorTarget::Top));
        assert_eq!(
            anchor_target("#contact"),
            Some(AnchorTarget::Selector("#contact".to_string()))
        );
        assert_eq!(anchor_target("/shop#contact"), None);
    }

    #[test]
    fn anchor_offset_clears_the_header() {
        assert_eq!(anchor_scroll_top(400.0, 1_200.0, 80.0), 1_510.0);
    }
}
