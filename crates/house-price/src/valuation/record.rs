use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Column order expected by the regression model.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "district",
    "city",
    "bedrooms",
    "bathrooms",
    "land_size_m2",
    "building_size_m2",
    "carports",
    "electricity",
    "floors",
    "building_age",
    "garages",
    "condition",
];

/// Furnishing state of the property as offered for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Furnished => "furnished",
            Condition::SemiFurnished => "semi-furnished",
            Condition::Unfurnished => "unfurnished",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "furnished" => Some(Self::Furnished),
            "semi-furnished" | "semi furnished" | "semi_furnished" => Some(Self::SemiFurnished),
            "unfurnished" => Some(Self::Unfurnished),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed attributes of a single property, validated and ready for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub district: String,
    pub city: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub land_size_m2: f64,
    pub building_size_m2: f64,
    pub carports: u32,
    pub electricity: u32,
    pub floors: u32,
    pub building_age: u32,
    pub garages: u32,
    pub condition: Condition,
}

/// Reason a submitted form could not be turned into a [`FeatureRecord`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    Missing { field: &'static str },
    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },
    #[error("field '{field}' must be a whole number of zero or more, got '{value}'")]
    NotInteger { field: &'static str, value: String },
    #[error("field '{field}' must be a number, got '{value}'")]
    NotNumber { field: &'static str, value: String },
    #[error("field '{field}' must be greater than zero, got '{value}'")]
    NotPositive { field: &'static str, value: String },
    #[error("condition must be one of furnished, semi-furnished, unfurnished, got '{value}'")]
    UnknownCondition { value: String },
}

/// Read access to raw string form fields by name.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;

    /// Copy of every submitted field, kept so a rejected form can be redisplayed.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

impl FormFields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl FormFields for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.clone()
    }
}

/// Validates raw form fields and converts them into a typed record.
///
/// Fields are checked in model column order and the first failure wins.
pub fn normalize<F>(raw: &F) -> Result<FeatureRecord, ValidationError>
where
    F: FormFields + ?Sized,
{
    let district = text_field(raw, "district")?;
    let city = text_field(raw, "city")?;
    let bedrooms = count_field(raw, "bedrooms")?;
    let bathrooms = count_field(raw, "bathrooms")?;
    let land_size_m2 = area_field(raw, "land_size_m2")?;
    let building_size_m2 = area_field(raw, "building_size_m2")?;
    let carports = count_field(raw, "carports")?;
    let electricity = count_field(raw, "electricity")?;
    let floors = count_field(raw, "floors")?;
    let building_age = count_field(raw, "building_age")?;
    let garages = count_field(raw, "garages")?;

    let condition_raw = required(raw, "condition")?;
    let condition =
        Condition::parse(condition_raw).ok_or_else(|| ValidationError::UnknownCondition {
            value: condition_raw.to_string(),
        })?;

    Ok(FeatureRecord {
        district,
        city,
        bedrooms,
        bathrooms,
        land_size_m2,
        building_size_m2,
        carports,
        electricity,
        floors,
        building_age,
        garages,
        condition,
    })
}

fn required<'a, F>(raw: &'a F, field: &'static str) -> Result<&'a str, ValidationError>
where
    F: FormFields + ?Sized,
{
    let value = raw
        .field(field)
        .ok_or(ValidationError::Missing { field })?
        .trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

fn text_field<F>(raw: &F, field: &'static str) -> Result<String, ValidationError>
where
    F: FormFields + ?Sized,
{
    required(raw, field).map(str::to_string)
}

fn count_field<F>(raw: &F, field: &'static str) -> Result<u32, ValidationError>
where
    F: FormFields + ?Sized,
{
    let value = required(raw, field)?;
    value.parse::<u32>().map_err(|_| ValidationError::NotInteger {
        field,
        value: value.to_string(),
    })
}

fn area_field<F>(raw: &F, field: &'static str) -> Result<f64, ValidationError>
where
    F: FormFields + ?Sized,
{
    let value = required(raw, field)?;
    let parsed = value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ValidationError::NotNumber {
            field,
            value: value.to_string(),
        })?;

    if parsed <= 0.0 {
        return Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> HashMap<String, String> {
        [
            ("district", "Menteng"),
            ("city", "Jakarta Pusat"),
            ("bedrooms", "3"),
            ("bathrooms", "2"),
            ("land_size_m2", "150.5"),
            ("building_size_m2", "120"),
            ("carports", "1"),
            ("electricity", "2200"),
            ("floors", "2"),
            ("building_age", "5"),
            ("garages", "0"),
            ("condition", "semi-furnished"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
    }

    #[test]
    fn normalizes_complete_form() {
        let record = normalize(&form()).expect("form is valid");
        assert_eq!(record.district, "Menteng");
        assert_eq!(record.city, "Jakarta Pusat");
        assert_eq!(record.bedrooms, 3);
        assert_eq!(record.land_size_m2, 150.5);
        assert_eq!(record.electricity, 2200);
        assert_eq!(record.garages, 0);
        assert_eq!(record.condition, Condition::SemiFurnished);
    }

    #[test]
    fn trims_whitespace_and_ignores_unknown_fields() {
        let mut raw = form();
        raw.insert("bedrooms".to_string(), " 4 ".to_string());
        raw.insert("condition".to_string(), "Furnished".to_string());
        raw.insert("csrf_token".to_string(), "abc".to_string());

        let record = normalize(&raw).expect("form is valid");
        assert_eq!(record.bedrooms, 4);
        assert_eq!(record.condition, Condition::Furnished);
    }

    #[test]
    fn reports_missing_field() {
        let mut raw = form();
        raw.remove("bedrooms");
        assert_eq!(
            normalize(&raw),
            Err(ValidationError::Missing { field: "bedrooms" })
        );
    }

    #[test]
    fn reports_blank_text_field() {
        let mut raw = form();
        raw.insert("city".to_string(), "   ".to_string());
        assert_eq!(normalize(&raw), Err(ValidationError::Empty { field: "city" }));
    }

    #[test]
    fn rejects_fractional_and_negative_counts() {
        let mut raw = form();
        raw.insert("floors".to_string(), "1.5".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotInteger { field: "floors", .. })
        ));

        raw.insert("floors".to_string(), "-1".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotInteger { field: "floors", .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_and_non_positive_sizes() {
        let mut raw = form();
        raw.insert("land_size_m2".to_string(), "luas".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotNumber {
                field: "land_size_m2",
                ..
            })
        ));

        raw.insert("land_size_m2".to_string(), "NaN".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotNumber { .. })
        ));

        raw.insert("land_size_m2".to_string(), "100".to_string());
        raw.insert("building_size_m2".to_string(), "0".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotPositive {
                field: "building_size_m2",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_condition() {
        let mut raw = form();
        raw.insert("condition".to_string(), "renovated".to_string());
        let err = normalize(&raw).expect_err("condition rejected");
        assert_eq!(
            err,
            ValidationError::UnknownCondition {
                value: "renovated".to_string()
            }
        );
        assert!(err.to_string().contains("renovated"));
    }

    #[test]
    fn first_failing_column_is_reported() {
        let mut raw = form();
        raw.remove("garages");
        raw.insert("bathrooms".to_string(), "two".to_string());
        assert!(matches!(
            normalize(&raw),
            Err(ValidationError::NotInteger {
                field: "bathrooms",
                ..
            })
        ));
    }
}
