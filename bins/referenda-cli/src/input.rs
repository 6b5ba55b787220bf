//! Reading curves and tracks from the command line.
//!
//! A curve argument is either inline metadata JSON or `@path` naming a
//! file that contains it.

use std::path::Path;

use anyhow::{Context, Result};
use referenda_core::types::{Curve, TrackCurves};
use serde_json::Value;
use tracing::warn;

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Parse a curve from inline JSON or an `@file` reference.
///
/// Curves outside the valid parameter domain are accepted with a warning;
/// evaluation is defined for them, just not monotonic.
pub fn load_curve(arg: &str) -> Result<Curve> {
    let value = match arg.strip_prefix('@') {
        Some(path) => read_json(Path::new(path))?,
        None => serde_json::from_str(arg).context("Invalid curve JSON")?,
    };
    let curve = Curve::from_metadata(&value).context("Failed to decode curve")?;

    if let Err(e) = curve.validate() {
        warn!(kind = %curve.kind(), "{e}");
    }
    Ok(curve)
}

/// Load a track's approval and support curves from a metadata file.
pub fn load_track(path: &Path) -> Result<TrackCurves> {
    let value = read_json(path)?;
    let track = TrackCurves::from_metadata(&value)
        .with_context(|| format!("Failed to decode track in {}", path.display()))?;

    for (which, curve) in [("minApproval", &track.min_approval), ("minSupport", &track.min_support)] {
        if let Err(e) = curve.validate() {
            warn!(which, kind = %curve.kind(), "{e}");
        }
    }
    Ok(track)
}
