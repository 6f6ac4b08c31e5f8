//! Serializable view of a designed filter

use serde::{Deserialize, Serialize};
use sift_dsp::FilterOutput;

/// JSON shape of a [`FilterOutput`]
///
/// Complex roots are written as `[re, im]` pairs, sections as
/// `[b0, b1, b2, a0, a1, a2]` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Ba {
        b: Vec<f64>,
        a: Vec<f64>,
    },
    Zpk {
        z: Vec<[f64; 2]>,
        p: Vec<[f64; 2]>,
        k: f64,
    },
    Sos {
        sos: Vec<[f64; 6]>,
    },
}

impl From<&FilterOutput> for OutputRecord {
    fn from(output: &FilterOutput) -> Self {
        match output {
            FilterOutput::Ba(tf) => OutputRecord::Ba {
                b: tf.b.clone(),
                a: tf.a.clone(),
            },
            FilterOutput::Zpk(zpk) => OutputRecord::Zpk {
                z: zpk.zeros.iter().map(|c| [c.re, c.im]).collect(),
                p: zpk.poles.iter().map(|c| [c.re, c.im]).collect(),
                k: zpk.gain,
            },
            FilterOutput::Sos(sos) => OutputRecord::Sos { sos: sos.to_rows() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_dsp::{Complex64, TransferFunction, ZpkFilter};

    #[test]
    fn test_ba_record_json() {
        let out = FilterOutput::Ba(TransferFunction::fir(vec![0.5, 0.5]));
        let json = serde_json::to_string(&OutputRecord::from(&out)).unwrap();
        assert_eq!(json, r#"{"b":[0.5,0.5],"a":[1.0]}"#);
    }

    #[test]
    fn test_zpk_record_splits_complex() {
        let out = FilterOutput::Zpk(ZpkFilter::new(
            vec![Complex64::new(-1.0, 0.0)],
            vec![Complex64::new(0.5, 0.25)],
            2.0,
        ));
        let record = OutputRecord::from(&out);
        assert_eq!(
            record,
            OutputRecord::Zpk {
                z: vec![[-1.0, 0.0]],
                p: vec![[0.5, 0.25]],
                k: 2.0,
            }
        );

        let json = serde_json::to_string(&record).unwrap();
        let back: OutputRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
