//! Data models for the Septotrip API.
//!
//! - [`primitives`] - id newtypes and [`Patch`] for partial updates
//! - [`user`] - users, credentials, login
//! - [`trip`] - trips, steps, paths, days, points of interest
//! - [`journal`] - logbooks, spends, todo entries, files
//!
//! Output models double as response validators: see [`crate::validate`].

pub mod journal;
pub mod primitives;
pub mod trip;
pub mod user;

pub use journal::*;
pub use primitives::*;
pub use trip::*;
pub use user::*;
