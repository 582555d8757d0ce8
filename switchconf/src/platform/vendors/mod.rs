//! Vendor-specific platform definitions.

pub mod tplink;
