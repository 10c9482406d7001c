use super::record::{Condition, FeatureRecord};
use serde::{Deserialize, Serialize};

const MAX_FACTORS: usize = 3;
const MIN_SUBSTANTIVE_FACTORS: usize = 2;

const PREMIUM_DISTRICTS: &[&str] = &[
    "Kebayoran Baru",
    "Pondok Indah",
    "Menteng",
    "BSD City",
    "Kelapa Gading",
    "Summarecon Bekasi",
    "Sentul City",
];

/// Qualitative direction a factor pushes the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// One explanatory statement shown next to the estimated price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub icon: String,
    pub impact: Impact,
    pub text: String,
}

impl Factor {
    fn new(icon: &str, impact: Impact, text: String) -> Self {
        Self {
            icon: icon.to_string(),
            impact,
            text,
        }
    }
}

/// Boundaries used to classify land size and building age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorThresholds {
    /// Land strictly above this counts as large.
    pub large_land_m2: f64,
    /// Land strictly below this counts as small.
    pub small_land_m2: f64,
    /// Buildings strictly older than this count as aging.
    pub aging_building_years: u32,
    /// Buildings at most this old count as new.
    pub new_building_years: u32,
}

impl Default for FactorThresholds {
    fn default() -> Self {
        Self {
            large_land_m2: 200.0,
            small_land_m2: 70.0,
            aging_building_years: 15,
            new_building_years: 1,
        }
    }
}

pub fn is_premium_district(district: &str) -> bool {
    PREMIUM_DISTRICTS.contains(&district)
}

/// Derives up to three pricing factors for a validated record.
///
/// Location, land size, building age and furnishing are checked in that
/// order. When fewer than two of them apply, a neutral building size factor
/// is appended so the explanation is never empty.
pub fn explain(record: &FeatureRecord, thresholds: &FactorThresholds) -> Vec<Factor> {
    let mut factors = Vec::with_capacity(MAX_FACTORS + 1);

    if is_premium_district(&record.district) {
        factors.push(Factor::new(
            "bi-geo-alt-fill",
            Impact::Positive,
            format!(
                "Berada di lokasi premium <strong>{}</strong> secara signifikan meningkatkan nilai properti.",
                record.district
            ),
        ));
    }

    let land_size = truncate_area(record.land_size_m2);
    if record.land_size_m2 > thresholds.large_land_m2 {
        factors.push(Factor::new(
            "bi-aspect-ratio-fill",
            Impact::Positive,
            format!(
                "Luas tanah <strong>({land_size} m²)</strong> yang sangat besar memberikan kontribusi positif yang kuat pada harga."
            ),
        ));
    } else if record.land_size_m2 < thresholds.small_land_m2 {
        factors.push(Factor::new(
            "bi-aspect-ratio",
            Impact::Negative,
            format!(
                "Luas tanah <strong>({land_size} m²)</strong> yang relatif kecil menjadi faktor penekan harga."
            ),
        ));
    }

    let age = record.building_age;
    if age > thresholds.aging_building_years {
        factors.push(Factor::new(
            "bi-calendar-x",
            Impact::Negative,
            format!(
                "Usia bangunan yang lebih dari <strong>{age} tahun</strong> dapat sedikit menurunkan nilai pasar."
            ),
        ));
    } else if age <= thresholds.new_building_years {
        factors.push(Factor::new(
            "bi-stars",
            Impact::Positive,
            "Properti ini adalah <strong>bangunan baru</strong>, menjadi daya tarik utama yang meningkatkan harga."
                .to_string(),
        ));
    }

    if record.condition == Condition::Furnished {
        factors.push(Factor::new(
            "bi-house-heart-fill",
            Impact::Positive,
            "Kondisi <strong>fully furnished</strong> menambah nilai jual properti Anda."
                .to_string(),
        ));
    }

    if factors.len() < MIN_SUBSTANTIVE_FACTORS {
        factors.push(Factor::new(
            "bi-arrows-fullscreen",
            Impact::Neutral,
            format!(
                "Luas bangunan <strong>({} m²)</strong> menjadi dasar perhitungan utama.",
                truncate_area(record.building_size_m2)
            ),
        ));
    }

    factors.truncate(MAX_FACTORS);
    factors
}

// Display only: drops the fractional part toward zero.
fn truncate_area(value: f64) -> String {
    format!("{:.0}", value.trunc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, land: f64, age: u32, condition: Condition) -> FeatureRecord {
        FeatureRecord {
            district: district.to_string(),
            city: "Jakarta Pusat".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            land_size_m2: land,
            building_size_m2: 180.9,
            carports: 1,
            electricity: 2200,
            floors: 2,
            building_age: age,
            garages: 1,
            condition,
        }
    }

    fn icons(factors: &[Factor]) -> Vec<&str> {
        factors.iter().map(|factor| factor.icon.as_str()).collect()
    }

    #[test]
    fn premium_large_old_furnished_keeps_first_three() {
        let factors = explain(
            &record("Menteng", 250.0, 20, Condition::Furnished),
            &FactorThresholds::default(),
        );

        assert_eq!(
            icons(&factors),
            vec!["bi-geo-alt-fill", "bi-aspect-ratio-fill", "bi-calendar-x"]
        );
        assert!(factors[0].text.contains("Menteng"));
        assert!(factors[1].text.contains("(250 m²)"));
        assert!(factors[2].text.contains("20 tahun"));
        assert_eq!(factors[2].impact, Impact::Negative);
    }

    #[test]
    fn ordinary_property_falls_back_to_building_size() {
        let factors = explain(
            &record("Cikokol", 100.0, 5, Condition::Unfurnished),
            &FactorThresholds::default(),
        );

        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].icon, "bi-arrows-fullscreen");
        assert_eq!(factors[0].impact, Impact::Neutral);
        assert!(factors[0].text.contains("(180 m²)"));
    }

    #[test]
    fn premium_new_building_skips_fallback() {
        let factors = explain(
            &record("Pondok Indah", 120.0, 1, Condition::SemiFurnished),
            &FactorThresholds::default(),
        );

        assert_eq!(icons(&factors), vec!["bi-geo-alt-fill", "bi-stars"]);
        assert!(factors.iter().all(|factor| factor.impact != Impact::Neutral));
    }

    #[test]
    fn single_substantive_factor_gets_fallback_appended() {
        let factors = explain(
            &record("Cikokol", 65.7, 8, Condition::Unfurnished),
            &FactorThresholds::default(),
        );

        assert_eq!(icons(&factors), vec!["bi-aspect-ratio", "bi-arrows-fullscreen"]);
        assert_eq!(factors[0].impact, Impact::Negative);
        assert!(factors[0].text.contains("(65 m²)"));
    }

    #[test]
    fn fractional_land_just_above_threshold_counts_as_large() {
        let factors = explain(
            &record("Cikokol", 200.5, 8, Condition::Unfurnished),
            &FactorThresholds::default(),
        );

        assert_eq!(
            icons(&factors),
            vec!["bi-aspect-ratio-fill", "bi-arrows-fullscreen"]
        );
        assert!(factors[0].text.contains("(200 m²)"));
    }

    #[test]
    fn huge_areas_are_displayed_without_clamping() {
        let factors = explain(
            &record("Cikokol", 1e20, 8, Condition::Unfurnished),
            &FactorThresholds::default(),
        );

        assert_eq!(factors[0].icon, "bi-aspect-ratio-fill");
        assert!(factors[0].text.contains("(100000000000000000000 m²)"));
    }

    #[test]
    fn threshold_boundaries_are_exclusive_for_land_and_aging() {
        let thresholds = FactorThresholds::default();

        for land in [70.0, 200.0] {
            let factors = explain(&record("Cikokol", land, 15, Condition::Unfurnished), &thresholds);
            assert_eq!(icons(&factors), vec!["bi-arrows-fullscreen"], "land {land}");
        }

        let factors = explain(&record("Cikokol", 100.0, 16, Condition::Unfurnished), &thresholds);
        assert_eq!(factors[0].icon, "bi-calendar-x");

        let factors = explain(&record("Cikokol", 100.0, 2, Condition::Unfurnished), &thresholds);
        assert_eq!(icons(&factors), vec!["bi-arrows-fullscreen"]);
    }

    #[test]
    fn custom_thresholds_shift_classification() {
        let thresholds = FactorThresholds {
            large_land_m2: 90.0,
            ..FactorThresholds::default()
        };
        let factors = explain(&record("Cikokol", 100.0, 5, Condition::Furnished), &thresholds);
        assert_eq!(
            icons(&factors),
            vec!["bi-aspect-ratio-fill", "bi-house-heart-fill"]
        );
    }

    #[test]
    fn factor_count_stays_within_bounds() {
        let thresholds = FactorThresholds::default();
        let districts = ["Menteng", "Cikokol"];
        let lands = [50.0, 100.0, 300.0];
        let ages = [0, 8, 30];
        let conditions = [
            Condition::Furnished,
            Condition::SemiFurnished,
            Condition::Unfurnished,
        ];

        for district in districts {
            for land in lands {
                for age in ages {
                    for condition in conditions {
                        let count =
                            explain(&record(district, land, age, condition), &thresholds).len();
                        assert!((1..=3).contains(&count));
                    }
                }
            }
        }
    }
}
