//! Internal domain modules for the QuickNote core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod config;
pub mod error;
pub mod handler;
pub mod note;
pub mod notifier;
pub mod search;
pub mod storage;
pub mod surface;
pub mod tags;
