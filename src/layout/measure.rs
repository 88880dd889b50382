//! Height measurement capability

use tracing::warn;

/// Produces the content height of an item laid out at a given width.
///
/// Implementations must be deterministic for a given `(item, width)` pair and
/// free of side effects: the engine caches results and only asks again when
/// the column width changes or the item is replaced.
///
/// Any `Fn(&T, f64) -> f64` closure is a measurer:
///
/// ```
/// # use normgrid::layout::measure::MeasureHeight;
/// let measure = |text: &String, width: f64| (text.len() as f64 * 8.0 / width).ceil() * 20.0;
/// assert_eq!(measure.height_for_width(&"hello".to_string(), 100.0), 20.0);
/// ```
pub trait MeasureHeight<T: ?Sized> {
    /// Height of `item` when constrained to `width`.
    fn height_for_width(&self, item: &T, width: f64) -> f64;
}

impl<T, F> MeasureHeight<T> for F
where
    T: ?Sized,
    F: Fn(&T, f64) -> f64,
{
    fn height_for_width(&self, item: &T, width: f64) -> f64 {
        self(item, width)
    }
}

/// Clamp a raw measurement to a usable height.
///
/// Negative, NaN and infinite measurements degrade to zero so a bad
/// measurement produces a zero-height cell instead of a broken layout.
pub fn sanitize_height(raw: f64, index: usize) -> f64 {
    if raw.is_finite() && raw >= 0.0 {
        raw
    } else {
        warn!(index, raw, "Measurement unavailable, using zero height");
        0.0
    }
}

/// Measure one item, treating a missing measurer as a zero-height result.
pub(crate) fn measure_item<T, M>(measurer: Option<&M>, item: &T, width: f64, index: usize) -> f64
where
    M: MeasureHeight<T>,
{
    match measurer {
        Some(measurer) => sanitize_height(measurer.height_for_width(item, width), index),
        None => 0.0,
    }
}
