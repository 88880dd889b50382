//! normgrid - normalized-height grid layout
//!
//! Lays out a sequence of variable-height items in a fixed number of columns,
//! stretching every cell in a row to the row's tallest item. The engine caches
//! the derived geometry, applies item insertions, deletions and updates
//! incrementally, and answers "what is visible in this rectangle" by scanning
//! only the rows and columns that can reach it.
//!
//! The library is split the same way as the binary uses it:
//! - [`layout`]: the pure engine ([`layout::GridLayout`] and its geometry types)
//! - [`model`]: change-tracked item sequences, sample cards and error types
//! - [`measure`]: text and card height measurers
//! - [`config`], [`logging`]: ambient setup for the inspector binary
//! - [`inspect`]: one-shot layout reports for the `normgrid` binary

pub mod config;
pub mod inspect;
pub mod layout;
pub mod logging;
pub mod measure;
pub mod model;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
