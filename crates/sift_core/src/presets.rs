//! Built-in Band Presets
//!
//! Conventional EEG rhythm bands, in Hz.

use crate::config::FilterSpec;
use crate::error::{DesignError, DesignResult};
use crate::request::{FilterDesign, FilterType};

/// Named frequency band with its (low, high) edges in Hz
pub type BandPreset = (&'static str, [f64; 2]);

/// List of built-in presets
pub const PRESETS: &[BandPreset] = &[
    ("delta", [1.0, 4.0]),
    ("theta", [4.0, 8.0]),
    ("alpha", [8.0, 12.0]),
    ("mu", [8.0, 13.0]),
    ("beta", [13.0, 30.0]),
    ("gamma", [30.0, 45.0]),
];

/// Look up a preset by name, ignoring case
pub fn find_preset(name: &str) -> Option<[f64; 2]> {
    PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|&(_, edges)| edges)
}

impl FilterSpec {
    /// IIR bandpass spec covering a named band
    pub fn from_preset(name: &str, order: usize, fs: f64) -> DesignResult<Self> {
        let edges = find_preset(name).ok_or_else(|| DesignError::UnknownPreset(name.to_string()))?;
        Ok(FilterSpec::new(edges, order)
            .with_fs(fs)
            .with_filter_design(FilterDesign::Iir.as_str())
            .with_filter_type(FilterType::Bandpass.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer::design_filter_spec;

    #[test]
    fn test_presets_are_ordered_bands() {
        for (name, [low, high]) in PRESETS {
            assert!(low < high, "preset {} has inverted edges", name);
            assert!(*low > 0.0);
        }
    }

    #[test]
    fn test_find_preset_ignores_case() {
        assert_eq!(find_preset("Alpha"), Some([8.0, 12.0]));
        assert_eq!(find_preset("kappa"), None);
    }

    #[test]
    fn test_every_preset_designs_at_256_hz() {
        for (name, _) in PRESETS {
            let spec = FilterSpec::from_preset(name, 4, 256.0).unwrap();
            let out = design_filter_spec(&spec).unwrap();
            let tf = out.as_ba().unwrap();
            assert_eq!(tf.a.len(), 5);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            FilterSpec::from_preset("kappa", 4, 256.0),
            Err(DesignError::UnknownPreset(_))
        ));
    }
}
