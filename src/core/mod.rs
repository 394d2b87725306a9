//! Core document types, monetary computation, and numbering.
//!
//! Everything here is pure: building a [`Document`] and computing its
//! [`Totals`] never touches the filesystem.

mod builder;
mod error;
pub mod money;
mod numbering;
mod types;

pub use builder::*;
pub use error::*;
pub use money::{Totals, round2};
pub use numbering::*;
pub use types::*;
