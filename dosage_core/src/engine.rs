//! Dosage engine.
//!
//! Pure calculation from a parsed [`DosageInput`] to a [`CalculationResult`]:
//! - Normalize weight to kilograms
//! - Scale the prescribed dose by weight (per-kg dosing) or take it as-is
//! - Convert to a volume (liquids) or a whole tablet count (tablets)
//! - Attach a safety warning when the daily total exceeds the limit

use crate::safety::{check_daily_dose, MAX_SAFE_DAILY_DOSE_MG};
use crate::{CalculationResult, DosageInput, DoseType, Error, MedicationType, Result};

/// Relative slack (in machine epsilons) so 1.1 / 0.1 counts as 11 tablets, not 12
const TABLET_ROUNDING_EPSILONS: f64 = 4.0;

/// Compute a dosage using the default safety limit
pub fn compute(input: &DosageInput) -> Result<CalculationResult> {
    compute_with_limit(input, MAX_SAFE_DAILY_DOSE_MG)
}

/// Compute a dosage, flagging daily totals above `max_daily_dose_mg`
///
/// Returns [`Error::IncompleteInput`] when weight, strength, or dose is not a
/// finite positive number, or when the dose, daily total, volume, or tablet
/// count would overflow. No other failure is possible.
pub fn compute_with_limit(input: &DosageInput, max_daily_dose_mg: f64) -> Result<CalculationResult> {
    let weight_kg = require_positive("weight", input.weight_kg())?;
    let strength = require_positive("medication_strength", input.medication_strength)?;
    let dose = require_positive("prescribed_dose", input.prescribed_dose)?;

    let doses_per_day = input.frequency.doses_per_day();

    let dose_per_administration = match input.dose_type {
        DoseType::PerKg => dose * weight_kg,
        DoseType::Fixed => dose,
    };
    // Overflow on absurd inputs is treated like any other invalid dose
    let dose_per_administration = require_positive("prescribed_dose", dose_per_administration)?;

    let daily_total_dose =
        require_positive("prescribed_dose", dose_per_administration * doses_per_day)?;

    let (volume_to_administer, tablets_required) = match input.medication_type {
        MedicationType::Liquid => {
            let volume =
                require_positive("medication_strength", dose_per_administration / strength)?;
            (Some(volume), None)
        }
        MedicationType::Tablet => (None, Some(tablets_for(dose_per_administration, strength)?)),
    };

    let safety_warning = check_daily_dose(daily_total_dose, max_daily_dose_mg);

    tracing::info!(
        "Calculated {:.2}mg per dose, {:.2}mg/day ({} x {:?})",
        dose_per_administration,
        daily_total_dose,
        input.frequency,
        input.medication_type
    );

    Ok(CalculationResult {
        dose_per_administration,
        volume_to_administer,
        tablets_required,
        daily_total_dose,
        safety_warning,
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        tracing::debug!("Rejecting {} = {}", field, value);
        Err(Error::IncompleteInput { field })
    }
}

/// Whole tablets needed to deliver at least `dose_mg`
///
/// Always at least one tablet for a positive dose. Counts that do not fit in
/// a `u32` are rejected rather than saturated.
fn tablets_for(dose_mg: f64, strength_mg: f64) -> Result<u32> {
    let ratio = require_positive("prescribed_dose", dose_mg / strength_mg)?;
    let slack = ratio * f64::EPSILON * TABLET_ROUNDING_EPSILONS;
    let tablets = (ratio - slack).ceil().max(1.0);

    if tablets > f64::from(u32::MAX) {
        tracing::debug!("Rejecting tablet count {}", tablets);
        return Err(Error::IncompleteInput {
            field: "prescribed_dose",
        });
    }
    Ok(tablets as u32)
}
