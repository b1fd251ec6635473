//! Filter state with change detection
//!
//! Holds the current valid filter selection. Mutations go through validated
//! operations; an invalid combination (min > max price) is rejected and the
//! prior valid value retained. Accepted changes are reported so the driver
//! can reset the listing.

use catalog::{Color, FilterError, Filters, PriceRange};

/// Current filter selection for one listing
#[derive(Debug, Default)]
pub struct FilterState {
    current: Filters,
}

impl FilterState {
    /// Create with no active filters
    pub fn new() -> Self {
        Self::default()
    }

    /// The current valid selection
    pub fn current(&self) -> &Filters {
        &self.current
    }

    /// Toggle a color tag; always a change
    pub fn toggle_color(&mut self, color: Color) {
        self.current = self.current.with_color_toggled(color);
    }

    /// Set (or toggle off) a price range
    ///
    /// Bounds are validated first; on rejection the prior selection is kept
    /// and the error returned. Setting the currently active range clears it.
    pub fn set_price_range(
        &mut self,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<(), FilterError> {
        let range = PriceRange::new(min, max)?;
        self.current = self.current.with_price_range(range);
        Ok(())
    }

    /// Clear all filters; returns false when already empty (no change)
    pub fn clear(&mut self) -> bool {
        if self.current.is_empty() {
            return false;
        }
        self.current = Filters::none();
        true
    }
}
