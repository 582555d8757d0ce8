//! Scraping of the device's HTML pages.
//!
//! The web interface renders its state as script variables embedded in
//! the page (`var qvlan_ds = {...};`). This module finds those
//! assignments and turns their payloads into typed values.

mod extract;
mod tables;

pub use extract::{extract_var, find_var};
pub use tables::VlanTable;
