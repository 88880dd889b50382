//! Reference measurers for [`Card`](crate::model::card::Card) items.
//!
//! Text is not shaped; heights are estimated from fixed-pitch metrics so the
//! layout can be inspected without a rendering surface.

pub mod card;
pub mod text;

pub use card::{CardMeasurer, CardMetrics, GridCardMeasurer, ListCardMeasurer, MeasureStyle};
pub use text::TextMetrics;
