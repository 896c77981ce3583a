//! Static care-advice catalog.
//!
//! Maps (disease, severity tier) to advice and diet text. The catalog is a
//! data table rather than branching code so new diseases are a row, not a
//! new arm. Lookup is total: unrecognized labels fall back to the generic
//! healthy entry.

use serde::Serialize;

use super::severity::SeverityTier;

/// Advice and diet text for one (disease, tier) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarePlan {
    pub advice: &'static str,
    pub diet: &'static str,
}

struct CatalogRow {
    disease: &'static str,
    /// `None` applies to every tier (single-row diseases).
    tier: Option<SeverityTier>,
    plan: CarePlan,
}

const fn row(
    disease: &'static str,
    tier: Option<SeverityTier>,
    advice: &'static str,
    diet: &'static str,
) -> CatalogRow {
    CatalogRow {
        disease,
        tier,
        plan: CarePlan { advice, diet },
    }
}

/// Fallback for unknown labels and "healthy" predictions.
const HEALTHY: CarePlan = CarePlan {
    advice: "You seem healthy. Maintain lifestyle.",
    diet: "Balanced diet with proper nutrients.",
};

static CATALOG: &[CatalogRow] = &[
    row(
        "heart disease",
        Some(SeverityTier::High),
        "Consult cardiologist immediately; follow low-fat diet.",
        "Low-fat, high fiber, avoid fried foods, more fruits & veggies.",
    ),
    row(
        "heart disease",
        Some(SeverityTier::Medium),
        "Regular checkups & moderate exercise recommended.",
        "Balanced diet with limited red meat & processed foods.",
    ),
    row(
        "heart disease",
        Some(SeverityTier::Low),
        "Maintain healthy lifestyle.",
        "Balanced diet and regular exercise.",
    ),
    row(
        "diabetes",
        Some(SeverityTier::High),
        "Monitor sugar closely and consult a doctor.",
        "Low sugar, high fiber, avoid sweets & white rice.",
    ),
    row(
        "diabetes",
        Some(SeverityTier::Medium),
        "Control diet and check sugar regularly.",
        "Balanced diet, portion control, include vegetables.",
    ),
    row(
        "diabetes",
        Some(SeverityTier::Low),
        "Maintain healthy lifestyle.",
        "Balanced diet and regular exercise.",
    ),
    row(
        "hypertension",
        Some(SeverityTier::High),
        "Immediate doctor consultation recommended.",
        "Low salt diet, avoid junk foods, more fruits & veggies.",
    ),
    row(
        "hypertension",
        Some(SeverityTier::Medium),
        "Regular BP monitoring and mild exercise needed.",
        "Reduce salt intake, eat potassium-rich foods.",
    ),
    row(
        "hypertension",
        Some(SeverityTier::Low),
        "Maintain normal BP with healthy diet.",
        "Balanced diet, low salt.",
    ),
    row(
        "obesity",
        Some(SeverityTier::High),
        "Serious lifestyle changes required; consult nutritionist.",
        "Strict calorie control, avoid fried & sugary foods.",
    ),
    row(
        "obesity",
        Some(SeverityTier::Medium),
        "Regular exercise and portion control needed.",
        "High protein, low carb diet.",
    ),
    row(
        "obesity",
        Some(SeverityTier::Low),
        "Maintain current weight with balanced food.",
        "Balanced diet, regular activity.",
    ),
    row(
        "asthma",
        None,
        "Avoid triggers; use inhalers as prescribed.",
        "Eat fruits & veggies; avoid allergens.",
    ),
];

/// Resolve the care plan for a predicted disease and severity tier.
///
/// Disease matching is case-insensitive. Diseases without tier-specific
/// rows resolve to their single entry regardless of tier; anything not in
/// the catalog resolves to the healthy fallback.
#[must_use]
pub fn care_plan(disease: &str, tier: SeverityTier) -> CarePlan {
    let disease = disease.trim();
    CATALOG
        .iter()
        .find(|r| r.disease.eq_ignore_ascii_case(disease) && r.tier.map_or(true, |t| t == tier))
        .map_or(HEALTHY, |r| r.plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let plan = care_plan("Heart Disease", SeverityTier::High);
        assert!(plan.advice.contains("cardiologist"));
        assert!(plan.diet.to_ascii_lowercase().contains("low-fat"));

        assert_eq!(plan, care_plan("HEART DISEASE", SeverityTier::High));
        assert_eq!(plan, care_plan("heart disease", SeverityTier::High));
    }

    #[test]
    fn test_tiers_yield_distinct_plans() {
        for disease in ["heart disease", "diabetes", "hypertension", "obesity"] {
            let high = care_plan(disease, SeverityTier::High);
            let medium = care_plan(disease, SeverityTier::Medium);
            let low = care_plan(disease, SeverityTier::Low);
            assert_ne!(high, medium, "{disease}: high vs medium");
            assert_ne!(medium, low, "{disease}: medium vs low");
            assert!(!high.advice.is_empty() && !high.diet.is_empty());
        }
    }

    #[test]
    fn test_low_tier_is_maintenance_text() {
        let plan = care_plan("heart disease", SeverityTier::Low);
        assert_eq!(plan.advice, "Maintain healthy lifestyle.");
    }

    #[test]
    fn test_asthma_ignores_tier() {
        let high = care_plan("asthma", SeverityTier::High);
        let low = care_plan("asthma", SeverityTier::Low);
        assert_eq!(high, low);
        assert!(high.advice.contains("inhalers"));
    }

    #[test]
    fn test_unknown_label_falls_back_to_healthy() {
        for tier in [SeverityTier::Low, SeverityTier::Medium, SeverityTier::High] {
            let plan = care_plan("unknown-x", tier);
            assert_eq!(plan, HEALTHY);
        }
        assert_eq!(care_plan("", SeverityTier::Low), HEALTHY);
    }
}
