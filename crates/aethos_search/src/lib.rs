//! Transit event search: aspects, angle crossings and the design date.
//!
//! This crate provides:
//! - Orb policy tables and tier/hardness classification
//! - Transit-to-natal aspect detection with whole-sign house context
//! - A generic bracket-and-bisect root finder
//! - Angle-crossing and house-ingress solvers over an ephemeris provider
//! - The 88-degree solar-arc design-date solver
//!
//! Every function here is pure given identical provider answers.

pub mod aspect_types;
pub mod aspects;
pub mod crossing;
pub mod crossing_types;
pub mod design_date;
pub mod error;
pub mod orb;
pub mod root;

pub use aspect_types::{ALL_ASPECTS, Aspect, AspectHit, Hardness, Tier};
pub use aspects::{DEFAULT_MAX_HITS, find_aspects};
pub use crossing::{solve_angle_crossing, solve_house_ingress};
pub use crossing_types::{AngleCrossing, CrossingConfig, Direction, HouseIngress};
pub use design_date::{DesignDate, DesignDateConfig, solve_design_jd, solve_design_jd_with};
pub use error::SearchError;
pub use orb::{
    ANGLE_ORBS, DEFAULT_ORBS, ORB_POLICY, OrbPolicy, OrbTable, hardness, orb_tier,
    round_orb,
};
pub use root::{Root, find_root, find_root_bracketed};
