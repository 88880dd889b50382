//! Card measurers for the grid and list cell shapes.

use serde::{Deserialize, Serialize};

use super::text::TextMetrics;
use crate::layout::measure::MeasureHeight;
use crate::model::card::Card;

/// Fixed dimensions of a card cell, shared by both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardMetrics {
    /// Text metrics for every label.
    pub text: TextMetrics,
    /// Image height divided by image width.
    pub image_aspect: f64,
    /// Sum of vertical margins around the stacked content.
    pub vertical_padding: f64,
    /// Sum of horizontal margins around a label row.
    pub side_padding: f64,
    /// Width of the list thumbnail.
    pub thumbnail_width: f64,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            text: TextMetrics::default(),
            image_aspect: 0.75,
            vertical_padding: 24.0,
            side_padding: 16.0,
            thumbnail_width: 80.0,
        }
    }
}

impl CardMetrics {
    /// Height of the top text over the taller of the two side texts, with
    /// `width` available to the label column.
    fn labels_height(&self, card: &Card, width: f64) -> f64 {
        let top_width = width - self.side_padding;
        let side_width = (width - self.side_padding) / 2.0;
        self.text.height(&card.top_text, top_width)
            + self
                .text
                .max_height(&[&card.left_text, &card.right_text], side_width)
    }
}

/// Image across the full cell width, labels stacked below.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridCardMeasurer {
    metrics: CardMetrics,
}

impl GridCardMeasurer {
    /// Create a measurer with the given metrics.
    pub fn new(metrics: CardMetrics) -> Self {
        Self { metrics }
    }
}

impl MeasureHeight<Card> for GridCardMeasurer {
    fn height_for_width(&self, card: &Card, width: f64) -> f64 {
        let m = &self.metrics;
        width * m.image_aspect + m.labels_height(card, width) + m.vertical_padding
    }
}

/// Fixed-width thumbnail on the left, labels on the right.
///
/// The card is as tall as the taller of the two columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ListCardMeasurer {
    metrics: CardMetrics,
}

impl ListCardMeasurer {
    /// Create a measurer with the given metrics.
    pub fn new(metrics: CardMetrics) -> Self {
        Self { metrics }
    }
}

impl MeasureHeight<Card> for ListCardMeasurer {
    fn height_for_width(&self, card: &Card, width: f64) -> f64 {
        let m = &self.metrics;
        let thumbnail = m.thumbnail_width * m.image_aspect + m.vertical_padding;
        let label_width = width - m.thumbnail_width - m.side_padding;
        let labels = m.labels_height(card, label_width) + m.vertical_padding;
        thumbnail.max(labels)
    }
}

/// Which card shape to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MeasureStyle {
    /// [`GridCardMeasurer`].
    #[default]
    Grid,
    /// [`ListCardMeasurer`].
    List,
}

/// A card measurer chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardMeasurer {
    /// Grid cell shape.
    Grid(GridCardMeasurer),
    /// List cell shape.
    List(ListCardMeasurer),
}

impl CardMeasurer {
    /// Measurer for `style` with the given metrics.
    pub fn new(style: MeasureStyle, metrics: CardMetrics) -> Self {
        match style {
            MeasureStyle::Grid => Self::Grid(GridCardMeasurer::new(metrics)),
            MeasureStyle::List => Self::List(ListCardMeasurer::new(metrics)),
        }
    }
}

impl MeasureHeight<Card> for CardMeasurer {
    fn height_for_width(&self, card: &Card, width: f64) -> f64 {
        match self {
            Self::Grid(measurer) => measurer.height_for_width(card, width),
            Self::List(measurer) => measurer.height_for_width(card, width),
        }
    }
}
