//! Profile-level orchestration for the aethos timing engine.
//!
//! This crate provides:
//! - Natal profile documents (`NatalProfile`)
//! - The daily timing bundle builder (`DailyTimingBuilder`)
//! - Human Design gate/line activations over a loaded `GateWheel`
//! - The Gene Keys lookup table

pub mod error;
pub mod gene_keys;
pub mod human_design;
pub mod profile;
pub mod timing;

pub use error::ProfileError;
pub use gene_keys::{GeneKey, gene_key, gene_keys_layer};
pub use human_design::{
    ACTIVATION_BODIES, Activation, GATE_SPAN_DEG, GateWheel, HumanDesignLayer, LINE_SPAN_DEG,
    activations_from_frame, human_design_layer, line_of,
};
pub use profile::{NatalAngles, NatalProfile};
pub use timing::{AspectRecord, DailyTimingBuilder, TimingBundle, TimingMeta};
