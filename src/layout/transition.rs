//! Scroll offset preservation across layout transitions

/// Relative scroll position captured before a layout change.
///
/// Swapping layouts (grid to list, or a rotation that changes the column
/// count) changes the content height, so an absolute offset would land on
/// unrelated content. The ratio of the top edge to the old content height is
/// stable across the change and resolves back to an offset afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRatio(f64);

impl OffsetRatio {
    /// Capture `(current_offset + top_inset) / old_content_height`.
    ///
    /// Returns `None` when the old content height is not positive or the
    /// ratio is not finite; there is nothing meaningful to preserve then.
    pub fn capture(old_content_height: f64, current_offset: f64, top_inset: f64) -> Option<Self> {
        if old_content_height.is_nan() || old_content_height <= 0.0 {
            return None;
        }
        let ratio = (current_offset + top_inset) / old_content_height;
        ratio.is_finite().then_some(Self(ratio))
    }

    /// Raw ratio value.
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Resolve to a top offset in the new layout.
    ///
    /// The proposal is `ratio * new_content_height - top_inset`. If showing a
    /// full viewport from there would run past the end of the content, the
    /// offset is pulled back so the viewport ends exactly at the content end.
    /// It never goes above `-top_inset`, the resting position at the top.
    pub fn resolve(&self, new_content_height: f64, viewport_height: f64, top_inset: f64) -> f64 {
        let proposed = self.0 * new_content_height - top_inset;
        let clamped = if proposed + viewport_height > new_content_height {
            new_content_height - viewport_height
        } else {
            proposed
        };
        clamped.max(-top_inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod capture {
        use super::*;

        #[test]
        fn ratio_of_top_edge_to_content_height() {
            let ratio = OffsetRatio::capture(500.0, 100.0, 0.0).unwrap();
            assert_eq!(ratio.get(), 0.2);
        }

        #[test]
        fn top_inset_is_added_to_offset() {
            let ratio = OffsetRatio::capture(1000.0, 80.0, 20.0).unwrap();
            assert_eq!(ratio.get(), 0.1);
        }

        #[test]
        fn zero_content_height_captures_nothing() {
            assert_eq!(OffsetRatio::capture(0.0, 100.0, 0.0), None);
        }

        #[test]
        fn nan_content_height_captures_nothing() {
            assert_eq!(OffsetRatio::capture(f64::NAN, 100.0, 0.0), None);
        }
    }

    mod resolve {
        use super::*;

        #[test]
        fn scales_to_new_content_height() {
            let ratio = OffsetRatio::capture(500.0, 100.0, 0.0).unwrap();
            assert_eq!(ratio.resolve(1000.0, 600.0, 0.0), 200.0);
        }

        #[test]
        fn clamps_to_content_end() {
            let ratio = OffsetRatio::capture(500.0, 100.0, 0.0).unwrap();
            assert_eq!(ratio.resolve(1000.0, 900.0, 0.0), 100.0);
        }

        #[test]
        fn viewport_ending_exactly_at_content_end_is_kept() {
            let ratio = OffsetRatio::capture(500.0, 100.0, 0.0).unwrap();
            assert_eq!(ratio.resolve(1000.0, 800.0, 0.0), 200.0);
        }

        #[test]
        fn top_inset_is_subtracted_back() {
            let ratio = OffsetRatio::capture(1000.0, 80.0, 20.0).unwrap();
            assert_eq!(ratio.resolve(2000.0, 500.0, 20.0), 180.0);
        }

        #[test]
        fn short_content_rests_at_top() {
            let ratio = OffsetRatio::capture(1000.0, 500.0, 10.0).unwrap();
            assert_eq!(ratio.resolve(300.0, 600.0, 10.0), -10.0);
        }
    }
}
