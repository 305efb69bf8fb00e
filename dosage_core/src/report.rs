//! Rendering of calculation results for display.

use crate::{CalculationResult, Result};

/// Disclaimer printed under every result
pub const DISCLAIMER: &str = "This calculator is for educational purposes. Always verify calculations with a qualified healthcare professional before administering medication.";

/// Render a result as human-readable lines, magnitudes to 2 decimal places
pub fn render_text(result: &CalculationResult) -> String {
    let mut lines = vec![
        "Calculation Results".to_string(),
        format!(
            "  Dose per administration: {:.2} mg",
            result.dose_per_administration
        ),
    ];

    if let Some(volume) = result.volume_to_administer {
        lines.push(format!("  Volume to administer:    {:.2} mL", volume));
    }
    if let Some(tablets) = result.tablets_required {
        lines.push(format!("  Tablets required:        {} tablet(s)", tablets));
    }

    lines.push(format!(
        "  Daily total dose:        {:.2} mg",
        result.daily_total_dose
    ));

    if let Some(ref warning) = result.safety_warning {
        lines.push(String::new());
        lines.push(format!("  ⚠ {}", warning));
    }

    lines.push(String::new());
    lines.push(format!("  Note: {}", DISCLAIMER));

    lines.join("\n")
}

/// Render a result as pretty-printed JSON
pub fn render_json(result: &CalculationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liquid_result() -> CalculationResult {
        CalculationResult {
            dose_per_administration: 200.0,
            volume_to_administer: Some(4.0),
            tablets_required: None,
            daily_total_dose: 600.0,
            safety_warning: None,
        }
    }

    #[test]
    fn test_text_for_liquid() {
        let text = render_text(&liquid_result());
        assert!(text.contains("Dose per administration: 200.00 mg"));
        assert!(text.contains("Volume to administer:    4.00 mL"));
        assert!(text.contains("Daily total dose:        600.00 mg"));
        assert!(!text.contains("Tablets required"));
        assert!(!text.contains('⚠'));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn test_text_for_tablet_with_warning() {
        let result = CalculationResult {
            dose_per_administration: 1500.0,
            volume_to_administer: None,
            tablets_required: Some(3),
            daily_total_dose: 4500.0,
            safety_warning: Some("Daily dose (4500.00mg) exceeds recommended limit (3000mg). Please consult with a physician.".into()),
        };
        let text = render_text(&result);
        assert!(text.contains("Tablets required:        3 tablet(s)"));
        assert!(!text.contains("Volume to administer"));
        assert!(text.contains("⚠ Daily dose (4500.00mg)"));
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let json = render_json(&liquid_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dose_per_administration"], 200.0);
        assert_eq!(value["volume_to_administer"], 4.0);
        assert!(value.get("tablets_required").is_none());
        assert!(value.get("safety_warning").is_none());
    }
}
