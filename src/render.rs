//! # Rendering
//!
//! Turns values into the text that ends up in a failure message.
//!
//! ## Services Provided
//!
//! - **Context messages**: [`message`], [`join`]
//! - **Printable escaping**: [`printable`], [`printable_bytes`]
//! - **Color decoration**: [`Painter`]
//! - **Diffs**: [`diff`]

pub mod color;
pub mod diff;
pub mod message;
pub mod printable;

pub use color::{Painter, Tone};
pub use diff::diff;
pub use message::{join, message};
pub use printable::{printable, printable_bytes};
