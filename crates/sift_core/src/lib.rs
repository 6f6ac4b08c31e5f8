//! Sift Core - Filter Designer
//!
//! This crate turns declarative filter requests into coefficients:
//! - Typed requests (`FilterRequest`) with closed filter type / design enums
//! - Per-family option structs (`FirOptions`, `IirOptions`)
//! - String-keyed specifications (`FilterSpec`) as read from JSON
//! - Named EEG band presets
//!
//! # Architecture
//!
//! ```text
//!   FilterSpec (JSON) ──to_request──▶ FilterRequest ──design_filter──▶ FilterOutput
//!                                            │
//!                           ┌────────────────┴────────────────┐
//!                           ▼                                 ▼
//!                  sift_dsp::firwin                  sift_dsp::iirfilter
//!              (order + 1 taps, pass_zero       (prototype → band transform
//!               from the filter type)             → bilinear → ba/zpk/sos)
//! ```
//!
//! Designing is pure: no state survives a call.

mod config;
mod designer;
mod error;
mod options;
mod output;
mod presets;
mod request;

pub use config::FilterSpec;
pub use designer::{design_filter, design_filter_spec};
pub use error::{DesignError, DesignResult};
pub use options::{DesignOptions, FirOptions, IirOptions};
pub use output::OutputRecord;
pub use presets::{find_preset, BandPreset, PRESETS};
pub use request::{FilterDesign, FilterRequest, FilterType, Frequencies};

// Re-export DSP types for convenience
pub use sift_dsp::{
    BesselNorm, DspError, FilterOutput, FrequencyResponse, OutputFormat, Prototype, SosFilter,
    TransferFunction, Window, ZpkFilter,
};
