//! Daily dose safety threshold.

/// Daily total above which a warning is attached to the result (mg/day)
pub const MAX_SAFE_DAILY_DOSE_MG: f64 = 3000.0;

/// Check a daily total against the limit
///
/// Returns a warning message iff `daily_total_mg` is strictly greater than
/// `limit_mg`. A total exactly at the limit is not flagged.
pub fn check_daily_dose(daily_total_mg: f64, limit_mg: f64) -> Option<String> {
    if daily_total_mg > limit_mg {
        tracing::warn!(
            "Daily dose {:.2}mg exceeds limit {}mg",
            daily_total_mg,
            limit_mg
        );
        Some(format!(
            "Daily dose ({:.2}mg) exceeds recommended limit ({}mg). Please consult with a physician.",
            daily_total_mg, limit_mg
        ))
    } else {
        None
    }
}
