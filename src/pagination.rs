//! Page layout and navigation
//!
//! A spread always starts on an odd page: page 14 shows 13|14, page 15
//! shows 15|16. Requests outside `1..=total_pages` leave the current page
//! where it is.

use serde::{Deserialize, Serialize};

use crate::error::ReaderError;

/// One page at a time or a two-page spread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    Single,
    #[default]
    Spread,
}

impl PageLayout {
    /// How many pages one navigation step moves
    pub fn step(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Spread => 2,
        }
    }
}

impl std::str::FromStr for PageLayout {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "spread" => Ok(Self::Spread),
            _ => Err(ReaderError::invalid_value("page layout", s)),
        }
    }
}

/// Page numbers currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayedPages {
    pub left: u32,
    pub right: Option<u32>,
}

/// Compute which pages are shown for `current` in `layout`
pub fn displayed_pages(current: u32, total_pages: u32, layout: PageLayout) -> DisplayedPages {
    let total = total_pages.max(1);
    let current = current.clamp(1, total);

    match layout {
        PageLayout::Single => DisplayedPages {
            left: current,
            right: None,
        },
        PageLayout::Spread => {
            let left = if current % 2 == 0 { current - 1 } else { current };
            let right = Some(left + 1).filter(|r| *r <= total);
            DisplayedPages { left, right }
        }
    }
}

/// Current-page state for one open textbook
#[derive(Debug, Clone)]
pub struct Navigator {
    current: u32,
    total_pages: u32,
    layout: PageLayout,
}

impl Navigator {
    /// Start at page 1
    pub fn new(total_pages: u32, layout: PageLayout) -> Self {
        Self {
            current: 1,
            total_pages,
            layout,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
    }

    pub fn displayed(&self) -> DisplayedPages {
        displayed_pages(self.current, self.total_pages, self.layout)
    }

    /// Jump to `page`; returns whether the current page changed
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            tracing::debug!(page, total = self.total_pages, "Ignoring out-of-range page request");
            return false;
        }
        let changed = page != self.current;
        self.current = page;
        changed
    }

    pub fn next(&mut self) -> bool {
        match self.current.checked_add(self.layout.step()) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(self.layout.step()) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Fraction of the book reached, for the progress bar
    pub fn progress(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_starts_on_odd_page() {
        assert_eq!(
            displayed_pages(14, 350, PageLayout::Spread),
            DisplayedPages { left: 13, right: Some(14) }
        );
        assert_eq!(
            displayed_pages(13, 350, PageLayout::Spread),
            DisplayedPages { left: 13, right: Some(14) }
        );
        assert_eq!(
            displayed_pages(15, 350, PageLayout::Spread),
            DisplayedPages { left: 15, right: Some(16) }
        );
    }

    #[test]
    fn test_spread_without_right_page() {
        assert_eq!(
            displayed_pages(5, 5, PageLayout::Spread),
            DisplayedPages { left: 5, right: None }
        );
    }

    #[test]
    fn test_single_clamps() {
        assert_eq!(displayed_pages(0, 10, PageLayout::Single).left, 1);
        assert_eq!(displayed_pages(99, 10, PageLayout::Single).left, 10);
        assert_eq!(displayed_pages(4, 10, PageLayout::Single).right, None);
    }

    #[test]
    fn test_out_of_range_requests_are_ignored() {
        let mut nav = Navigator::new(350, PageLayout::Single);
        assert!(nav.go_to(25));

        assert!(!nav.go_to(351));
        assert_eq!(nav.current(), 25);
        assert!(!nav.go_to(0));
        assert_eq!(nav.current(), 25);
    }

    #[test]
    fn test_step_sizes() {
        let mut nav = Navigator::new(350, PageLayout::Single);
        nav.next();
        assert_eq!(nav.current(), 2);

        nav.set_layout(PageLayout::Spread);
        nav.next();
        assert_eq!(nav.current(), 4);
        nav.prev();
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_edges_are_no_ops() {
        let mut nav = Navigator::new(3, PageLayout::Spread);
        assert!(!nav.prev());
        assert!(!nav.can_go_prev());
        assert_eq!(nav.current(), 1);

        assert!(nav.next());
        assert_eq!(nav.current(), 3);
        assert!(!nav.next());
        assert!(!nav.can_go_next());
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_progress() {
        let mut nav = Navigator::new(4, PageLayout::Single);
        nav.go_to(2);
        assert!((nav.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("Spread".parse::<PageLayout>().unwrap(), PageLayout::Spread);
        assert!("triple".parse::<PageLayout>().is_err());
    }
}
