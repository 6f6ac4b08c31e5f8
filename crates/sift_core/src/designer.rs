//! Filter Designer
//!
//! Maps a request onto one of the two synthesis routines:
//! - FIR: `firwin` with `order + 1` taps and `pass_zero` derived from the
//!   filter type; the denominator is `[1.0]`
//! - IIR: `iirfilter` with the filter type as band transformation; the
//!   output representation defaults to `(b, a)` when none was asked for
//!
//! Synthesis errors are returned as they are.

use sift_dsp::{
    firwin, iirfilter, DspError, FilterOutput, FirwinOptions, IirfilterOptions, OutputFormat,
    Prototype, TransferFunction,
};
use tracing::{debug, warn};

use crate::config::FilterSpec;
use crate::error::DesignResult;
use crate::options::{DesignOptions, FirOptions, IirOptions};
use crate::request::FilterRequest;

/// Design the filter described by `request`
pub fn design_filter(request: &FilterRequest) -> DesignResult<FilterOutput> {
    match &request.options {
        DesignOptions::Fir(options) => design_fir(request, options),
        DesignOptions::Iir(options) => design_iir(request, options),
    }
}

/// Validate a string-keyed spec, then design it
pub fn design_filter_spec(spec: &FilterSpec) -> DesignResult<FilterOutput> {
    design_filter(&spec.to_request()?)
}

fn design_fir(request: &FilterRequest, options: &FirOptions) -> DesignResult<FilterOutput> {
    let numtaps = request
        .order
        .checked_add(1)
        .ok_or(DspError::OrderTooLarge(request.order))?;
    let pass_zero = request.filter_type.pass_zero();
    debug!(
        numtaps,
        pass_zero,
        filter_type = %request.filter_type,
        "Designing FIR filter"
    );

    let taps = firwin(
        numtaps,
        request.frequencies.as_slice(),
        &FirwinOptions {
            fs: request.fs,
            pass_zero,
            width: options.width,
            window: options.window,
            scale: options.scale,
        },
    )?;
    Ok(FilterOutput::Ba(TransferFunction::fir(taps)))
}

fn design_iir(request: &FilterRequest, options: &IirOptions) -> DesignResult<FilterOutput> {
    let output = options.output.unwrap_or_else(|| {
        debug!("No output representation requested, using ba");
        OutputFormat::Ba
    });

    let uses_rp = matches!(options.ftype, Prototype::Cheby1 | Prototype::Ellip);
    let uses_rs = matches!(options.ftype, Prototype::Cheby2 | Prototype::Ellip);
    if options.rp.is_some() && !uses_rp {
        warn!(ftype = ?options.ftype, "rp has no effect on this prototype");
    }
    if options.rs.is_some() && !uses_rs {
        warn!(ftype = ?options.ftype, "rs has no effect on this prototype");
    }

    debug!(
        order = request.order,
        ftype = ?options.ftype,
        filter_type = %request.filter_type,
        ?output,
        "Designing IIR filter"
    );

    Ok(iirfilter(
        request.order,
        request.frequencies.as_slice(),
        request.filter_type.band_type(),
        &IirfilterOptions {
            fs: request.fs,
            rp: options.rp,
            rs: options.rs,
            ftype: options.ftype,
            norm: options.norm,
            output,
        },
    )?)
}
