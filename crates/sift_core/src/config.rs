//! String-keyed Filter Specification
//!
//! `FilterSpec` is what a configuration loader produces: the family and type
//! are plain strings and the options an open map. Converting it into a
//! [`FilterRequest`] validates, in order:
//! 1. `filter_type` (always, whatever the family)
//! 2. `filter_design`
//! 3. the option map against the selected family's option struct

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{DesignError, DesignResult};
use crate::options::{DesignOptions, FirOptions, IirOptions};
use crate::request::{FilterDesign, FilterRequest, FilterType, Frequencies};

fn default_fs() -> f64 {
    1.0
}

fn default_filter_design() -> String {
    FilterDesign::default().as_str().to_string()
}

fn default_filter_type() -> String {
    FilterType::default().as_str().to_string()
}

/// Declarative filter specification, as read from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub frequencies: Frequencies,
    pub order: usize,
    #[serde(default = "default_fs")]
    pub fs: f64,
    #[serde(default = "default_filter_design")]
    pub filter_design: String,
    #[serde(default = "default_filter_type")]
    pub filter_type: String,
    /// Family-specific options, checked once the family is known
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl FilterSpec {
    /// Spec with every optional field at its default (bandpass FIR, fs = 1.0)
    pub fn new(frequencies: impl Into<Frequencies>, order: usize) -> Self {
        Self {
            frequencies: frequencies.into(),
            order,
            fs: default_fs(),
            filter_design: default_filter_design(),
            filter_type: default_filter_type(),
            options: Map::new(),
        }
    }

    pub fn with_fs(mut self, fs: f64) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_filter_design(mut self, design: impl Into<String>) -> Self {
        self.filter_design = design.into();
        self
    }

    pub fn with_filter_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = filter_type.into();
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn from_json_str(json: &str) -> DesignResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a spec from a JSON file
    pub fn load(path: impl AsRef<Path>) -> DesignResult<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let spec: FilterSpec = serde_json::from_reader(file)?;
        info!("Filter specification loaded from {:?}", path);
        Ok(spec)
    }

    /// Validate the string-keyed fields and build a typed request
    pub fn to_request(&self) -> DesignResult<FilterRequest> {
        let filter_type: FilterType = self.filter_type.parse()?;
        let design: FilterDesign = self.filter_design.parse()?;
        debug!(
            %filter_type,
            %design,
            options = self.options.len(),
            "Validated filter specification"
        );

        let options = match design {
            FilterDesign::Fir => {
                if self.options.contains_key("pass_zero") {
                    return Err(DesignError::PassZeroOverride);
                }
                DesignOptions::Fir(parse_options::<FirOptions>(&self.options, design)?)
            }
            FilterDesign::Iir => {
                DesignOptions::Iir(parse_options::<IirOptions>(&self.options, design)?)
            }
        };

        Ok(FilterRequest {
            frequencies: self.frequencies.clone(),
            order: self.order,
            fs: self.fs,
            filter_type,
            options,
        })
    }
}

fn parse_options<T: serde::de::DeserializeOwned>(
    options: &Map<String, Value>,
    design: FilterDesign,
) -> DesignResult<T> {
    serde_json::from_value(Value::Object(options.clone())).map_err(|e| {
        DesignError::InvalidOptions {
            design: design.as_str(),
            message: e.to_string(),
        }
    })
}

impl TryFrom<&FilterRequest> for FilterSpec {
    type Error = DesignError;

    fn try_from(request: &FilterRequest) -> DesignResult<Self> {
        let design = request.filter_design();
        let value = match &request.options {
            DesignOptions::Fir(opts) => serde_json::to_value(opts)?,
            DesignOptions::Iir(opts) => serde_json::to_value(opts)?,
        };
        let options = match value {
            Value::Object(map) => map,
            other => {
                return Err(DesignError::InvalidOptions {
                    design: design.as_str(),
                    message: format!("expected an object, got {}", other),
                })
            }
        };
        Ok(Self {
            frequencies: request.frequencies.clone(),
            order: request.order,
            fs: request.fs,
            filter_design: design.as_str().to_string(),
            filter_type: request.filter_type.as_str().to_string(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_dsp::{OutputFormat, Prototype, Window};

    #[test]
    fn test_defaults_from_minimal_json() {
        let spec =
            FilterSpec::from_json_str(r#"{"frequencies": [0.1, 0.2], "order": 10}"#).unwrap();
        assert_eq!(spec.fs, 1.0);
        assert_eq!(spec.filter_design, "fir");
        assert_eq!(spec.filter_type, "bandpass");
        assert!(spec.options.is_empty());
        assert_eq!(spec, FilterSpec::new(vec![0.1, 0.2], 10));
    }

    #[test]
    fn test_type_is_checked_before_design() {
        let spec = FilterSpec::new(0.2, 4)
            .with_filter_type("lowpas")
            .with_filter_design("fri");
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::InvalidFilterType(_))
        ));

        let spec = FilterSpec::new(0.2, 4)
            .with_filter_type("lowpas")
            .with_filter_design("iir");
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::InvalidFilterType(_))
        ));

        let spec = FilterSpec::new(0.2, 4)
            .with_filter_type("lowpass")
            .with_filter_design("fri");
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::InvalidFilterDesign(d)) if d == "fri"
        ));
    }

    #[test]
    fn test_pass_zero_is_rejected() {
        let spec = FilterSpec::new(0.2, 10)
            .with_filter_type("lowpass")
            .with_option("pass_zero", false);
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::PassZeroOverride)
        ));
    }

    #[test]
    fn test_options_checked_against_family() {
        let spec = FilterSpec::new(0.2, 4)
            .with_filter_type("lowpass")
            .with_filter_design("fir")
            .with_option("rp", 1.0);
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::InvalidOptions { design: "fir", .. })
        ));

        let spec = FilterSpec::new(0.2, 4)
            .with_filter_type("lowpass")
            .with_filter_design("iir")
            .with_option("window", "hann");
        assert!(matches!(
            spec.to_request(),
            Err(DesignError::InvalidOptions { design: "iir", .. })
        ));
    }

    #[test]
    fn test_to_request_carries_options() {
        let spec = FilterSpec::from_json_str(
            r#"{
                "frequencies": [8, 12],
                "order": 4,
                "fs": 128,
                "filter_design": "iir",
                "filter_type": "bandstop",
                "options": {"ftype": "cheby1", "rp": 0.5, "output": "zpk"}
            }"#,
        )
        .unwrap();
        let req = spec.to_request().unwrap();
        assert_eq!(req.fs, 128.0);
        assert_eq!(req.filter_type, FilterType::Bandstop);
        match req.options {
            DesignOptions::Iir(opts) => {
                assert_eq!(opts.ftype, Prototype::Cheby1);
                assert_eq!(opts.rp, Some(0.5));
                assert_eq!(opts.output, Some(OutputFormat::Zpk));
            }
            other => panic!("expected IIR options, got {:?}", other),
        }
    }

    #[test]
    fn test_request_roundtrip_through_spec() {
        let req = FilterRequest::new(0.3, 8)
            .with_fs(2.0)
            .with_filter_type(FilterType::Highpass)
            .with_fir(FirOptions {
                window: Window::Blackman,
                ..Default::default()
            });
        let spec = FilterSpec::try_from(&req).unwrap();
        assert_eq!(spec.filter_type, "highpass");
        assert_eq!(spec.filter_design, "fir");

        let json = serde_json::to_string(&spec).unwrap();
        let back = FilterSpec::from_json_str(&json).unwrap();
        assert_eq!(back.to_request().unwrap(), req);
    }

    #[test]
    fn test_iir_request_keeps_every_option_key() {
        let req = FilterRequest::new([8.0, 12.0], 4)
            .with_fs(128.0)
            .with_iir(IirOptions::default().with_output(OutputFormat::Sos));
        let spec = FilterSpec::try_from(&req).unwrap();
        assert_eq!(spec.filter_design, "iir");
        for key in ["ftype", "output"] {
            assert!(spec.options.contains_key(key), "missing {}", key);
        }
        assert_eq!(spec.to_request().unwrap(), req);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sift_spec_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"frequencies": 0.2, "order": 10, "filter_type": "lowpass"}"#,
        )
        .unwrap();
        let spec = FilterSpec::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(spec.filter_type, "lowpass");
        assert_eq!(spec.frequencies, Frequencies::Single(0.2));
    }

    #[test]
    fn test_load_missing_file() {
        let result = FilterSpec::load("/nonexistent/sift/spec.json");
        assert!(matches!(result, Err(DesignError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FilterSpec::from_json_str(r#"{"order": 4}"#),
            Err(DesignError::Json(_))
        ));
    }
}
