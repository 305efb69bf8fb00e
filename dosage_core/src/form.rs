//! Form state for the calculator front ends.
//!
//! The form keeps raw text for the numeric fields, the current enumeration
//! selections, and the most recent result. Calculate and Reset are the only
//! operations that touch the held result.

use crate::config::Config;
use crate::engine::compute_with_limit;
use crate::{
    CalculationResult, DosageInput, DoseType, Error, Frequency, MedicationType, Result,
    WeightUnit,
};

/// Editable calculator form
#[derive(Clone, Debug, PartialEq)]
pub struct DosageForm {
    pub age: String,
    pub weight: String,
    pub weight_unit: WeightUnit,
    pub medication_strength: String,
    pub medication_type: MedicationType,
    pub prescribed_dose: String,
    pub dose_type: DoseType,
    pub frequency: Frequency,

    config: Config,
    result: Option<CalculationResult>,
}

impl Default for DosageForm {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DosageForm {
    /// Create an empty form using the config's default selections and limit
    pub fn new(config: Config) -> Self {
        let defaults = config.defaults.clone();
        Self {
            age: String::new(),
            weight: String::new(),
            weight_unit: defaults.weight_unit,
            medication_strength: String::new(),
            medication_type: defaults.medication_type,
            prescribed_dose: String::new(),
            dose_type: defaults.dose_type,
            frequency: defaults.frequency,
            config,
            result: None,
        }
    }

    /// The most recent successful calculation, if any
    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// True once every required text field has been filled in
    pub fn is_ready(&self) -> bool {
        [
            &self.age,
            &self.weight,
            &self.medication_strength,
            &self.prescribed_dose,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Label for the strength field, depends on the medication form
    pub fn strength_unit_label(&self) -> &'static str {
        self.medication_type.strength_unit()
    }

    /// Label for the dose field, depends on the dose basis
    pub fn dose_unit_label(&self) -> &'static str {
        self.dose_type.dose_unit()
    }

    /// Parse the text fields into an engine input
    ///
    /// Age is validated but not carried into the input; it never affects
    /// the calculation.
    pub fn parse_input(&self) -> Result<DosageInput> {
        parse_non_negative("age", &self.age)?;

        Ok(DosageInput {
            weight: parse_positive("weight", &self.weight)?,
            weight_unit: self.weight_unit,
            medication_strength: parse_positive("medication_strength", &self.medication_strength)?,
            medication_type: self.medication_type,
            prescribed_dose: parse_positive("prescribed_dose", &self.prescribed_dose)?,
            dose_type: self.dose_type,
            frequency: self.frequency,
        })
    }

    /// Calculate from the current fields
    ///
    /// Incomplete or invalid input is a no-op: the previous result (if any)
    /// is kept and `None` is returned.
    pub fn calculate(&mut self) -> Option<&CalculationResult> {
        if !self.is_ready() {
            tracing::debug!("Form incomplete, skipping calculation");
            return None;
        }

        match self.try_calculate() {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::debug!("Skipping calculation: {}", e);
                None
            }
        }
    }

    /// Like [`DosageForm::calculate`], but reports which field blocked it
    ///
    /// On error the previous result is left untouched.
    pub fn try_calculate(&mut self) -> Result<&CalculationResult> {
        let input = self.parse_input()?;
        let result = compute_with_limit(&input, self.config.safety.max_daily_dose_mg)?;
        let held: &CalculationResult = self.result.insert(result);
        Ok(held)
    }

    /// Clear every field and the held result
    pub fn reset(&mut self) {
        tracing::debug!("Resetting form");
        *self = Self::new(self.config.clone());
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(Error::IncompleteInput { field })
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64> {
    parse_number(field, raw).and_then(|v| {
        if v > 0.0 {
            Ok(v)
        } else {
            Err(Error::IncompleteInput { field })
        }
    })
}

fn parse_non_negative(field: &'static str, raw: &str) -> Result<f64> {
    parse_number(field, raw).and_then(|v| {
        if v >= 0.0 {
            Ok(v)
        } else {
            Err(Error::IncompleteInput { field })
        }
    })
}
