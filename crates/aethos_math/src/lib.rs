//! Angular primitives on the 360-degree ecliptic circle.
//!
//! Every longitude that enters a comparison elsewhere in the workspace
//! passes through [`normalize_360`] first.

pub mod angle;
pub mod house;

pub use angle::{normalize_360, shortest_angle, signed_diff};
pub use house::{SIGN_SPAN_DEG, whole_sign_house};
