//! Human-readable prompts for every field key, plus option captions for
//! the ordinal fields.

pub const HEALTH_FIELD_LABELS: &[(&str, &str)] = &[
    ("HighBP",               "Do you have high blood pressure?"),
    ("HighChol",             "Do you have high cholesterol?"),
    ("CholCheck",            "Have you had a cholesterol check in last 5 years?"),
    ("BMI",                  "What is your Body Mass Index (BMI)?"),
    ("Smoker",               "Are you a smoker?"),
    ("Stroke",               "Have you ever had a stroke?"),
    ("HeartDiseaseorAttack", "Have you had a heart disease or heart attack?"),
    ("PhysActivity",         "Have you done any physical activity in the past 30 days?"),
    ("Fruits",               "Do you eat fruit at least once a day?"),
    ("Veggies",              "Do you regularly eat vegetables?"),
    ("HvyAlcoholConsump",    "Do you consume alcohol heavily?"),
    ("AnyHealthcare",        "Do you have access to any form of healthcare?"),
    ("NoDocbcCost",          "Have you ever skipped a doctor visit due to cost?"),
    ("DiffWalk",             "Do you have serious difficulty walking or climbing stairs?"),
    ("GenHlth",              "How would you rate your general health (1-5)?"),
    ("MentHlth",             "How many days in the past month was your mental health not good?"),
    ("PhysHlth",             "How many days in the past month was your physical health not good?"),
    ("Sex",                  "What is your biological sex?"),
    ("Age",                  "What is your age?"),
    ("Education",            "What is your highest level of education? (1-5)"),
    ("Income",               "What is your household income level? (1-8)"),
];

pub const BANK_FIELD_LABELS: &[(&str, &str)] = &[
    ("age",      "What is the client's age?"),
    ("duration", "Last contact duration (seconds)"),
    ("campaign", "Number of contacts performed during this campaign"),
    ("previous", "Number of contacts performed before this campaign"),
];

pub const GEN_HLTH_OPTIONS: &[&str] = &["Excellent", "Very Good", "Good", "Fair", "Poor"];

/// Five-year age buckets, 1 = 18-24 through 13 = 80 or older.
pub const AGE_OPTIONS: &[&str] = &[
    "18-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54",
    "55-59", "60-64", "65-69", "70-74", "75-79", "80+",
];

pub const EDUCATION_OPTIONS: &[&str] = &[
    "Elementary School",
    "Middle School",
    "High School",
    "Some college",
    "College Graduate",
];

pub const INCOME_OPTIONS: &[&str] = &[
    "<$10k", "$10k-$15k", "$15k-$20k", "$20k-$25k",
    "$25k-$35k", "$35k-$50k", "$50k-$75k", ">$75k",
];

/// Look up the prompt for a field key in either domain.
/// Unknown keys fall back to the key itself.
pub fn label_for(key: &str) -> &str {
    HEALTH_FIELD_LABELS
        .iter()
        .chain(BANK_FIELD_LABELS)
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_labels() {
        assert_eq!(label_for("BMI"), "What is your Body Mass Index (BMI)?");
        assert_eq!(label_for("campaign"), "Number of contacts performed during this campaign");
        assert_eq!(label_for("Shoe size"), "Shoe size");
    }

    #[test]
    fn test_option_counts() {
        assert_eq!(GEN_HLTH_OPTIONS.len(), 5);
        assert_eq!(AGE_OPTIONS.len(), 13);
        assert_eq!(EDUCATION_OPTIONS.len(), 5);
        assert_eq!(INCOME_OPTIONS.len(), 8);
    }
}
