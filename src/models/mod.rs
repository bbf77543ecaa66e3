//! Data models for the A Wee Adventure backend.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod family;
mod journal;
mod milestone;
mod munro;
mod photo;
mod pin;
mod place;
mod revision;
mod setting;
mod wishlist;

pub use family::*;
pub use journal::*;
pub use milestone::*;
pub use munro::*;
pub use photo::*;
pub use pin::*;
pub use place::*;
pub use revision::*;
pub use setting::*;
pub use wishlist::*;
