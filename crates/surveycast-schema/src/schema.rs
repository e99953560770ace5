//! Per-domain schemas. The field order of each schema is the payload key order.

use serde::{Deserialize, Serialize};
use surveycast_common::Domain;

use crate::field::{FieldKind, FieldSpec, WireType};
use crate::labels::{label_for, AGE_OPTIONS, EDUCATION_OPTIONS, GEN_HLTH_OPTIONS, INCOME_OPTIONS};
use crate::records::{BankRecord, HealthRecord};
use crate::validate::{FormValues, ValidatedRecord, ValidationReport};

/// Which variant of the health survey is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthProfile {
    /// All 21 indicators.
    #[default]
    Full,
    /// Drops PhysActivity, Fruits and DiffWalk.
    Reduced,
}

const REDUCED_OMITS: &[&str] = &["PhysActivity", "Fruits", "DiffWalk"];

#[derive(Debug, Clone)]
pub struct DomainSchema {
    domain: Domain,
    fields: Vec<FieldSpec>,
}

fn binary(key: &'static str) -> FieldSpec {
    FieldSpec::binary(key, label_for(key))
}

impl DomainSchema {
    pub fn health(profile: HealthProfile) -> Self {
        let sex = FieldSpec {
            kind: FieldKind::Binary { no: "Female", yes: "Male" },
            ..binary("Sex")
        };

        let fields = vec![
            binary("HighBP"),
            binary("HighChol"),
            binary("CholCheck"),
            FieldSpec::numeric("BMI", label_for("BMI"), 10, Some(60)),
            binary("Smoker"),
            binary("Stroke"),
            binary("HeartDiseaseorAttack"),
            binary("PhysActivity"),
            binary("Fruits"),
            binary("Veggies"),
            binary("HvyAlcoholConsump"),
            binary("AnyHealthcare"),
            binary("NoDocbcCost"),
            binary("DiffWalk"),
            FieldSpec::ordinal("GenHlth", label_for("GenHlth"), GEN_HLTH_OPTIONS, WireType::Text),
            FieldSpec::numeric("MentHlth", label_for("MentHlth"), 0, Some(30)),
            FieldSpec::numeric("PhysHlth", label_for("PhysHlth"), 0, Some(30)),
            sex,
            FieldSpec::ordinal("Age", label_for("Age"), AGE_OPTIONS, WireType::Number),
            FieldSpec::ordinal("Education", label_for("Education"), EDUCATION_OPTIONS, WireType::Text),
            FieldSpec::ordinal("Income", label_for("Income"), INCOME_OPTIONS, WireType::Text),
        ];

        let fields = match profile {
            HealthProfile::Full => fields,
            HealthProfile::Reduced => fields
                .into_iter()
                .filter(|f| !REDUCED_OMITS.contains(&f.key))
                .collect(),
        };

        Self { domain: Domain::Health, fields }
    }

    pub fn bank() -> Self {
        Self {
            domain: Domain::Bank,
            fields: vec![
                FieldSpec::numeric("age", label_for("age"), 18, Some(100)),
                FieldSpec::numeric("duration", label_for("duration"), 0, None),
                FieldSpec::numeric("campaign", label_for("campaign"), 0, None),
                FieldSpec::numeric("previous", label_for("previous"), 0, None),
            ],
        }
    }

    pub fn for_domain(domain: Domain, profile: HealthProfile) -> Self {
        match domain {
            Domain::Health => Self::health(profile),
            Domain::Bank   => Self::bank(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Payload key order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }

    /// Initial form values for a new session, restricted to this schema's fields.
    pub fn defaults(&self) -> FormValues {
        let all = match self.domain {
            Domain::Health => HealthRecord::default().to_form_values(),
            Domain::Bank   => BankRecord::default().to_form_values(),
        };
        all.into_iter().filter(|(k, _)| self.field(k).is_some()).collect()
    }

    /// Check every field. Keys not in the schema are ignored.
    pub fn validate(&self, raw: &FormValues) -> Result<ValidatedRecord, ValidationReport> {
        let mut report = ValidationReport::default();
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            match field.check(raw.get(field.key).map(String::as_str)) {
                Ok(v) => values.push((*field, v)),
                Err(message) => report.push(field.key, message),
            }
        }

        if report.is_empty() {
            Ok(ValidatedRecord::new(self.domain, values))
        } else {
            tracing::debug!(domain = %self.domain, violations = report.len(), "form rejected by schema");
            Err(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_health_full_key_order() {
        let schema = DomainSchema::health(HealthProfile::Full);
        assert_eq!(
            schema.keys(),
            vec![
                "HighBP", "HighChol", "CholCheck", "BMI", "Smoker", "Stroke",
                "HeartDiseaseorAttack", "PhysActivity", "Fruits", "Veggies",
                "HvyAlcoholConsump", "AnyHealthcare", "NoDocbcCost", "DiffWalk",
                "GenHlth", "MentHlth", "PhysHlth", "Sex", "Age", "Education", "Income",
            ]
        );
    }

    #[test]
    fn test_reduced_profile_drops_three_fields() {
        let schema = DomainSchema::health(HealthProfile::Reduced);
        assert_eq!(schema.fields().len(), 18);
        for key in REDUCED_OMITS {
            assert!(schema.field(key).is_none(), "{} should be omitted", key);
        }
        assert_eq!(schema.keys().first(), Some(&"HighBP"));
        assert_eq!(schema.keys().last(), Some(&"Income"));
    }

    #[test]
    fn test_bank_key_order() {
        assert_eq!(DomainSchema::bank().keys(), vec!["age", "duration", "campaign", "previous"]);
    }

    #[test]
    fn test_defaults_pass_validation() {
        for schema in [
            DomainSchema::health(HealthProfile::Full),
            DomainSchema::health(HealthProfile::Reduced),
            DomainSchema::bank(),
        ] {
            let defaults = schema.defaults();
            assert_eq!(defaults.len(), schema.fields().len());
            assert!(schema.validate(&defaults).is_ok(), "{} defaults invalid", schema.domain());
        }
    }

    #[test]
    fn test_out_of_range_blocks_with_field_message() {
        let schema = DomainSchema::bank();
        let mut values = schema.defaults();
        values.insert("age".to_string(), "17".to_string());
        values.insert("campaign".to_string(), "-2".to_string());

        let report = schema.validate(&values).unwrap_err();
        assert_eq!(report.len(), 2);
        assert_eq!(report.message_for("age"), Some("Must be at least 18"));
        assert_eq!(report.message_for("campaign"), Some("Must be at least 0"));
        assert_eq!(report.message_for("duration"), None);
    }

    #[test]
    fn test_every_health_bound_is_enforced() {
        let schema = DomainSchema::health(HealthProfile::Full);
        let outside = [
            ("HighBP", "2"), ("BMI", "61"), ("BMI", "9"), ("GenHlth", "6"),
            ("MentHlth", "31"), ("PhysHlth", "-1"), ("Sex", "3"), ("Age", "14"),
            ("Age", "0"), ("Education", "6"), ("Income", "9"),
        ];
        for (key, bad) in outside {
            let mut values = schema.defaults();
            values.insert(key.to_string(), bad.to_string());
            let report = schema.validate(&values).unwrap_err();
            assert!(report.message_for(key).is_some(), "{}={} should be rejected", key, bad);
            assert_eq!(report.len(), 1);
        }

        let inside = [
            ("BMI", "10"), ("BMI", "60"), ("GenHlth", "5"), ("MentHlth", "30"),
            ("Age", "13"), ("Education", "5"), ("Income", "8"), ("Sex", "0"),
        ];
        for (key, good) in inside {
            let mut values = schema.defaults();
            values.insert(key.to_string(), good.to_string());
            assert!(schema.validate(&values).is_ok(), "{}={} should pass", key, good);
        }
    }

    #[test]
    fn test_missing_field_is_a_violation() {
        let schema = DomainSchema::bank();
        let mut values = schema.defaults();
        values.remove("previous");
        let report = schema.validate(&values).unwrap_err();
        assert_eq!(report.message_for("previous"), Some("This field is required"));
    }

    #[test]
    fn test_sex_uses_female_male_captions() {
        let schema = DomainSchema::health(HealthProfile::Full);
        let sex = schema.field("Sex").unwrap();
        assert_eq!(sex.caption(0), Some("Female"));
        assert_eq!(sex.caption(1), Some("Male"));
        assert_eq!(sex.label, "What is your biological sex?");
    }
}
