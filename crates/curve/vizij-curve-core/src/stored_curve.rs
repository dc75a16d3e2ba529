use crate::curve::AnimationCurve;
use crate::error::CurveError;

/// Public API: parse stored curve JSON into an [`AnimationCurve`].
///
/// Format: `{ "keys": [ { "time", "value", "inTangent"?, "outTangent"?,
/// "inWeight"?, "outWeight"?, "weightedMode"? } ] }`.
///
/// Notes:
/// - Missing tangents default to 0, missing weights to 1/3, missing mode to `none`.
/// - `weightedMode` is one of `none`, `in`, `out`, `both`.
/// - The curve is validated (finite fields, non-decreasing times) before it is
///   returned. Baking does not re-check this.
pub fn parse_curve_json(s: &str) -> Result<AnimationCurve, CurveError> {
    let curve: AnimationCurve = serde_json::from_str(s)?;
    if let Err(err) = curve.validate() {
        log::warn!("rejecting stored curve: {err}");
        return Err(err);
    }
    Ok(curve)
}

/// Serialize a curve to the stored JSON format (pretty-printed).
pub fn to_curve_json(curve: &AnimationCurve) -> Result<String, CurveError> {
    Ok(serde_json::to_string_pretty(curve)?)
}
