//! Core domain types for the dosage calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Unit and form enumerations (weight unit, medication form, dose basis)
//! - Administration frequency
//! - The parsed calculation input and its result

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Enumerations
// ============================================================================

/// Unit the patient weight was entered in
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert a weight in this unit to kilograms
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" | "lb" => Ok(WeightUnit::Lbs),
            other => Err(format!("unknown weight unit '{}' (expected kg or lbs)", other)),
        }
    }
}

/// Physical form of the medication, which decides how strength is read
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MedicationType {
    /// Strength is a concentration in mg/mL
    #[default]
    Liquid,
    /// Strength is a potency in mg/tablet
    Tablet,
}

impl MedicationType {
    /// Unit label for the medication strength field
    pub fn strength_unit(self) -> &'static str {
        match self {
            MedicationType::Liquid => "mg/mL",
            MedicationType::Tablet => "mg/tablet",
        }
    }
}

impl fmt::Display for MedicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedicationType::Liquid => write!(f, "liquid"),
            MedicationType::Tablet => write!(f, "tablet"),
        }
    }
}

impl FromStr for MedicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "liquid" => Ok(MedicationType::Liquid),
            "tablet" => Ok(MedicationType::Tablet),
            other => Err(format!(
                "unknown medication form '{}' (expected liquid or tablet)",
                other
            )),
        }
    }
}

/// How the prescribed dose relates to body weight
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoseType {
    /// mg per kg of body weight
    #[default]
    PerKg,
    /// mg regardless of weight
    Fixed,
}

impl DoseType {
    /// Unit label for the prescribed dose field
    pub fn dose_unit(self) -> &'static str {
        match self {
            DoseType::PerKg => "mg/kg",
            DoseType::Fixed => "mg",
        }
    }
}

impl fmt::Display for DoseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseType::PerKg => write!(f, "per_kg"),
            DoseType::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for DoseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_kg" | "per-kg" | "perkg" => Ok(DoseType::PerKg),
            "fixed" => Ok(DoseType::Fixed),
            other => Err(format!(
                "unknown dose type '{}' (expected per_kg or fixed)",
                other
            )),
        }
    }
}

// ============================================================================
// Frequency
// ============================================================================

/// Dosing interval. Only the intervals offered by the form are representable.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    Every4Hours,
    Every6Hours,
    #[default]
    Every8Hours,
    Every12Hours,
    OnceDaily,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Every4Hours,
        Frequency::Every6Hours,
        Frequency::Every8Hours,
        Frequency::Every12Hours,
        Frequency::OnceDaily,
    ];

    /// Hours between administrations
    pub fn hours(self) -> u32 {
        match self {
            Frequency::Every4Hours => 4,
            Frequency::Every6Hours => 6,
            Frequency::Every8Hours => 8,
            Frequency::Every12Hours => 12,
            Frequency::OnceDaily => 24,
        }
    }

    /// Number of administrations in 24 hours
    pub fn doses_per_day(self) -> f64 {
        24.0 / f64::from(self.hours())
    }
}

impl TryFrom<u32> for Frequency {
    type Error = String;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.hours() == hours)
            .ok_or_else(|| {
                format!(
                    "unsupported frequency of {} hours (expected 4, 6, 8, 12 or 24)",
                    hours
                )
            })
    }
}

impl From<Frequency> for u32 {
    fn from(frequency: Frequency) -> Self {
        frequency.hours()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_suffix('h').unwrap_or(&trimmed);
        let hours: u32 = digits
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency '{}'", s.trim()))?;
        Frequency::try_from(hours)
    }
}

// ============================================================================
// Calculation Input and Result
// ============================================================================

/// Parsed, immutable input to the dosage engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DosageInput {
    pub weight: f64,
    pub weight_unit: WeightUnit,
    /// mg/mL for liquids, mg/tablet for tablets
    pub medication_strength: f64,
    pub medication_type: MedicationType,
    /// mg/kg or mg depending on `dose_type`
    pub prescribed_dose: f64,
    pub dose_type: DoseType,
    pub frequency: Frequency,
}

impl DosageInput {
    /// Patient weight normalized to kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }
}

/// Outcome of a single dosage calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    /// mg given at one administration
    pub dose_per_administration: f64,
    /// mL per administration, liquids only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_to_administer: Option<f64>,
    /// Whole tablets per administration, tablets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablets_required: Option<u32>,
    /// mg across 24 hours
    pub daily_total_dose: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_warning: Option<String>,
}
