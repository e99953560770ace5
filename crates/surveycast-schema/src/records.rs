//! Typed survey records and their defaults.
//!
//! Records convert from raw form values through the schema, so a record
//! built by `try_from` has passed every field check.

use serde_json::{Map, Value};

use crate::schema::{DomainSchema, HealthProfile};
use crate::validate::{FormValues, ValidatedRecord, ValidationReport};

/// Binary indicator, carried as "0"/"1" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    #[default]
    No,
    Yes,
}

impl Flag {
    pub fn code(&self) -> &'static str {
        match self {
            Flag::No  => "0",
            Flag::Yes => "1",
        }
    }

    fn value(self) -> i64 {
        match self {
            Flag::No  => 0,
            Flag::Yes => 1,
        }
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        if b { Flag::Yes } else { Flag::No }
    }
}

/// Ordered `{key: wire value}` object for the fields of `schema` that `value` knows.
fn payload(schema: &DomainSchema, value: impl Fn(&str) -> Option<i64>) -> Value {
    let mut map = Map::with_capacity(schema.fields().len());
    for field in schema.fields() {
        if let Some(v) = value(field.key) {
            map.insert(field.key.to_string(), field.wire_value(v));
        }
    }
    Value::Object(map)
}

fn form_values(schema: &DomainSchema, value: impl Fn(&str) -> Option<i64>) -> FormValues {
    schema
        .fields()
        .iter()
        .filter_map(|f| value(f.key).map(|v| (f.key.to_string(), v.to_string())))
        .collect()
}

/// Health indicators for the diabetes-risk survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRecord {
    pub high_bp: Flag,
    pub high_chol: Flag,
    pub chol_check: Flag,
    pub bmi: i64,
    pub smoker: Flag,
    pub stroke: Flag,
    pub heart_disease_or_attack: Flag,
    pub phys_activity: Flag,
    pub fruits: Flag,
    pub veggies: Flag,
    pub hvy_alcohol_consump: Flag,
    pub any_healthcare: Flag,
    pub no_docbc_cost: Flag,
    pub diff_walk: Flag,
    /// 1 = excellent .. 5 = poor
    pub gen_hlth: u8,
    pub ment_hlth: i64,
    pub phys_hlth: i64,
    /// No = female, Yes = male
    pub sex: Flag,
    /// Age bucket 1..=13
    pub age: u8,
    pub education: u8,
    pub income: u8,
}

impl Default for HealthRecord {
    fn default() -> Self {
        Self {
            high_bp: Flag::No,
            high_chol: Flag::No,
            chol_check: Flag::No,
            bmi: 25,
            smoker: Flag::No,
            stroke: Flag::No,
            heart_disease_or_attack: Flag::No,
            phys_activity: Flag::No,
            fruits: Flag::No,
            veggies: Flag::No,
            hvy_alcohol_consump: Flag::No,
            any_healthcare: Flag::No,
            no_docbc_cost: Flag::No,
            diff_walk: Flag::No,
            gen_hlth: 3,
            ment_hlth: 0,
            phys_hlth: 0,
            sex: Flag::Yes,
            age: 3,
            education: 3,
            income: 3,
        }
    }
}

impl HealthRecord {
    /// Value of one field by payload key.
    pub fn value(&self, key: &str) -> Option<i64> {
        let v = match key {
            "HighBP"               => self.high_bp.value(),
            "HighChol"             => self.high_chol.value(),
            "CholCheck"            => self.chol_check.value(),
            "BMI"                  => self.bmi,
            "Smoker"               => self.smoker.value(),
            "Stroke"               => self.stroke.value(),
            "HeartDiseaseorAttack" => self.heart_disease_or_attack.value(),
            "PhysActivity"         => self.phys_activity.value(),
            "Fruits"               => self.fruits.value(),
            "Veggies"              => self.veggies.value(),
            "HvyAlcoholConsump"    => self.hvy_alcohol_consump.value(),
            "AnyHealthcare"        => self.any_healthcare.value(),
            "NoDocbcCost"          => self.no_docbc_cost.value(),
            "DiffWalk"             => self.diff_walk.value(),
            "GenHlth"              => i64::from(self.gen_hlth),
            "MentHlth"             => self.ment_hlth,
            "PhysHlth"             => self.phys_hlth,
            "Sex"                  => self.sex.value(),
            "Age"                  => i64::from(self.age),
            "Education"            => i64::from(self.education),
            "Income"               => i64::from(self.income),
            _ => return None,
        };
        Some(v)
    }

    pub fn to_form_values(&self) -> FormValues {
        form_values(&DomainSchema::health(HealthProfile::Full), |k| self.value(k))
    }

    /// Full 21-key payload in schema order with wire types.
    pub fn to_payload(&self) -> Value {
        payload(&DomainSchema::health(HealthProfile::Full), |k| self.value(k))
    }

    fn from_validated(r: &ValidatedRecord) -> Self {
        let num = |k: &str| r.get(k).unwrap_or_default();
        let flag = |k: &str| Flag::from(num(k) == 1);
        let small = |k: &str| u8::try_from(num(k)).unwrap_or_default();
        Self {
            high_bp: flag("HighBP"),
            high_chol: flag("HighChol"),
            chol_check: flag("CholCheck"),
            bmi: num("BMI"),
            smoker: flag("Smoker"),
            stroke: flag("Stroke"),
            heart_disease_or_attack: flag("HeartDiseaseorAttack"),
            phys_activity: flag("PhysActivity"),
            fruits: flag("Fruits"),
            veggies: flag("Veggies"),
            hvy_alcohol_consump: flag("HvyAlcoholConsump"),
            any_healthcare: flag("AnyHealthcare"),
            no_docbc_cost: flag("NoDocbcCost"),
            diff_walk: flag("DiffWalk"),
            gen_hlth: small("GenHlth"),
            ment_hlth: num("MentHlth"),
            phys_hlth: num("PhysHlth"),
            sex: flag("Sex"),
            age: small("Age"),
            education: small("Education"),
            income: small("Income"),
        }
    }
}

impl TryFrom<&FormValues> for HealthRecord {
    type Error = ValidationReport;

    /// Checks against the full health schema; every indicator is required.
    fn try_from(raw: &FormValues) -> Result<Self, Self::Error> {
        let record = DomainSchema::health(HealthProfile::Full).validate(raw)?;
        Ok(Self::from_validated(&record))
    }
}

impl TryFrom<FormValues> for HealthRecord {
    type Error = ValidationReport;

    fn try_from(raw: FormValues) -> Result<Self, Self::Error> {
        <Self as TryFrom<&FormValues>>::try_from(&raw)
    }
}

/// Client attributes for the bank-marketing survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    pub age: i64,
    /// Last contact duration in seconds.
    pub duration: i64,
    pub campaign: i64,
    pub previous: i64,
}

impl Default for BankRecord {
    fn default() -> Self {
        Self { age: 30, duration: 0, campaign: 0, previous: 0 }
    }
}

impl BankRecord {
    pub fn value(&self, key: &str) -> Option<i64> {
        match key {
            "age"      => Some(self.age),
            "duration" => Some(self.duration),
            "campaign" => Some(self.campaign),
            "previous" => Some(self.previous),
            _ => None,
        }
    }

    pub fn to_form_values(&self) -> FormValues {
        form_values(&DomainSchema::bank(), |k| self.value(k))
    }

    pub fn to_payload(&self) -> Value {
        payload(&DomainSchema::bank(), |k| self.value(k))
    }
}

impl TryFrom<&FormValues> for BankRecord {
    type Error = ValidationReport;

    fn try_from(raw: &FormValues) -> Result<Self, Self::Error> {
        let r = DomainSchema::bank().validate(raw)?;
        let num = |k: &str| r.get(k).unwrap_or_default();
        Ok(Self {
            age: num("age"),
            duration: num("duration"),
            campaign: num("campaign"),
            previous: num("previous"),
        })
    }
}

impl TryFrom<FormValues> for BankRecord {
    type Error = ValidationReport;

    fn try_from(raw: FormValues) -> Result<Self, Self::Error> {
        <Self as TryFrom<&FormValues>>::try_from(&raw)
    }
}
