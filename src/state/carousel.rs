use crate::event::PageDirection;

/// Paging position of the swatch carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    page: usize,
    per_page: usize,
    item_count: usize,
}

impl CarouselState {
    pub fn new(item_count: usize, per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            item_count,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.per_page).max(1)
    }

    /// Index range of the items on the current page
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = (self.page * self.per_page).min(self.item_count);
        let end = (start + self.per_page).min(self.item_count);
        start..end
    }

    /// Move one page, stopping at either end. Returns whether the page changed.
    pub fn step(&mut self, direction: PageDirection) -> bool {
        let target = match direction {
            PageDirection::Previous => self.page.checked_sub(1),
            PageDirection::Next => Some(self.page + 1).filter(|&p| p < self.page_count()),
        };
        match target {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_stops_at_ends() {
        let mut carousel = CarouselState::new(10, 4);
        assert_eq!(carousel.page_count(), 3);
        assert!(!carousel.step(PageDirection::Previous));
        assert!(carousel.step(PageDirection::Next));
        assert!(carousel.step(PageDirection::Next));
        assert_eq!(carousel.visible_range(), 8..10);
        assert!(!carousel.step(PageDirection::Next));
        assert_eq!(carousel.page(), 2);
    }
}
