//! Utility Modules
//!
//! Checks every operation runs before it assembles a transaction.
//!
//! # Modules
//!
//! - `assertions`: address format, curve and balance checks
//! - `amount`: exact decimal <-> base unit conversion
//! - `authority`: wallet vs. on-chain authority

pub mod amount;
pub mod assertions;
pub mod authority;

pub use amount::*;
pub use assertions::*;
pub use authority::*;
