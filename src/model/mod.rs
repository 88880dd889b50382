//! Domain model types.
//!
//! Items, the change-tracking container the engine follows, and error types.

pub mod card;
pub mod change;
pub mod error;

pub use card::Card;
pub use change::{Change, ChangeTracked};
pub use error::{InspectError, LayoutError};
