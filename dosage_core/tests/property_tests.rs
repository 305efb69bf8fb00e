//! Property-based tests for the dosage engine.
//!
//! Uses proptest to check the calculation invariants over arbitrary valid
//! inputs.

use dosage_core::*;
use proptest::prelude::*;

fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Every4Hours),
        Just(Frequency::Every6Hours),
        Just(Frequency::Every8Hours),
        Just(Frequency::Every12Hours),
        Just(Frequency::OnceDaily),
    ]
}

fn input_strategy() -> impl Strategy<Value = DosageInput> {
    (
        0.5f64..300.0,
        prop_oneof![Just(WeightUnit::Kg), Just(WeightUnit::Lbs)],
        0.1f64..1000.0,
        prop_oneof![Just(MedicationType::Liquid), Just(MedicationType::Tablet)],
        0.1f64..1000.0,
        prop_oneof![Just(DoseType::PerKg), Just(DoseType::Fixed)],
        frequency_strategy(),
    )
        .prop_map(
            |(weight, weight_unit, medication_strength, medication_type, prescribed_dose, dose_type, frequency)| {
                DosageInput {
                    weight,
                    weight_unit,
                    medication_strength,
                    medication_type,
                    prescribed_dose,
                    dose_type,
                    frequency,
                }
            },
        )
}

proptest! {
    /// Daily total is the per-dose amount times administrations per day
    #[test]
    fn daily_total_matches_frequency(input in input_strategy()) {
        let result = compute(&input).unwrap();
        let expected = result.dose_per_administration * 24.0 / f64::from(input.frequency.hours());
        prop_assert!((result.daily_total_dose - expected).abs() <= expected * 1e-12);
    }

    /// Exactly one of volume / tablets is populated, by medication form
    #[test]
    fn exactly_one_conversion(input in input_strategy()) {
        let result = compute(&input).unwrap();
        match input.medication_type {
            MedicationType::Liquid => {
                prop_assert!(result.volume_to_administer.is_some());
                prop_assert!(result.tablets_required.is_none());
            }
            MedicationType::Tablet => {
                prop_assert!(result.volume_to_administer.is_none());
                prop_assert!(result.tablets_required.is_some());
            }
        }
    }

    /// Tablet count covers the dose and never overshoots by a whole tablet
    #[test]
    fn tablets_round_up(input in input_strategy()) {
        let input = DosageInput { medication_type: MedicationType::Tablet, ..input };
        let result = compute(&input).unwrap();
        let tablets = f64::from(result.tablets_required.unwrap());
        let ratio = result.dose_per_administration / input.medication_strength;

        prop_assert!(tablets >= 1.0);
        prop_assert!(tablets >= ratio - 1e-6);
        prop_assert!(tablets < ratio + 1.0);
    }

    /// Warning present iff the daily total exceeds the limit
    #[test]
    fn warning_iff_over_limit(input in input_strategy()) {
        let result = compute(&input).unwrap();
        prop_assert_eq!(
            result.safety_warning.is_some(),
            result.daily_total_dose > MAX_SAFE_DAILY_DOSE_MG
        );
    }

    /// Pounds are converted before per-kg scaling
    #[test]
    fn pounds_match_equivalent_kilograms(lbs in 1.0f64..600.0, dose in 0.1f64..50.0) {
        let base = DosageInput {
            weight: lbs,
            weight_unit: WeightUnit::Lbs,
            medication_strength: 10.0,
            medication_type: MedicationType::Liquid,
            prescribed_dose: dose,
            dose_type: DoseType::PerKg,
            frequency: Frequency::Every8Hours,
        };
        let in_kg = DosageInput {
            weight: lbs * KG_PER_LB,
            weight_unit: WeightUnit::Kg,
            ..base.clone()
        };

        let a = compute(&base).unwrap();
        let b = compute(&in_kg).unwrap();
        prop_assert!((a.dose_per_administration - b.dose_per_administration).abs() < 1e-9);
    }
}

#[test]
fn pounds_154_equals_about_69_85_kg() {
    let lbs = DosageInput {
        weight: 154.0,
        weight_unit: WeightUnit::Lbs,
        medication_strength: 100.0,
        medication_type: MedicationType::Liquid,
        prescribed_dose: 1.0,
        dose_type: DoseType::PerKg,
        frequency: Frequency::Every12Hours,
    };
    let kg = DosageInput {
        weight: 69.85,
        weight_unit: WeightUnit::Kg,
        ..lbs.clone()
    };

    let from_lbs = compute(&lbs).unwrap();
    let from_kg = compute(&kg).unwrap();
    assert!((from_lbs.dose_per_administration - from_kg.dose_per_administration).abs() < 0.01);
}

#[test]
fn non_numeric_fields_produce_no_result() {
    for field in ["weight", "strength", "dose"] {
        let mut form = DosageForm::default();
        form.age = "40".into();
        form.weight = "70".into();
        form.medication_strength = "100".into();
        form.prescribed_dose = "5".into();
        match field {
            "weight" => form.weight = "seventy".into(),
            "strength" => form.medication_strength = "".into(),
            _ => form.prescribed_dose = "5mg".into(),
        }

        assert!(form.calculate().is_none(), "{} should block calculation", field);
        assert!(form.result().is_none());
    }
}
