use serde::Serialize;
use std::sync::OnceLock;

/// A city and the districts offered for it in the form dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityDistricts {
    pub city: &'static str,
    pub districts: &'static [&'static str],
}

static CATALOG: OnceLock<Vec<CityDistricts>> = OnceLock::new();

pub fn catalog() -> &'static [CityDistricts] {
    CATALOG.get_or_init(|| {
        const CITY_TO_DISTRICTS: &[(&str, &[&str])] = &[
            (
                "Jakarta Selatan",
                &[
                    "Kebayoran Baru",
                    "Pondok Indah",
                    "Cilandak",
                    "Tebet",
                    "Setiabudi",
                    "Pasar Minggu",
                    "Kebayoran Lama",
                ],
            ),
            (
                "Jakarta Pusat",
                &["Menteng", "Tanah Abang", "Gambir", "Senen", "Cempaka Putih"],
            ),
            (
                "Jakarta Timur",
                &["Cakung", "Jatinegara", "Duren Sawit", "Ciracas", "Kramat Jati"],
            ),
            (
                "Jakarta Barat",
                &["Kembangan", "Grogol Petamburan", "Cengkareng", "Palmerah"],
            ),
            (
                "Jakarta Utara",
                &["Kelapa Gading", "Penjaringan", "Tanjung Priok", "Pademangan"],
            ),
            (
                "Tangerang Selatan",
                &["Bintaro", "BSD City", "Serpong", "Ciputat", "Pamulang"],
            ),
            (
                "Tangerang",
                &["Cikokol", "Karawaci", "Cipondoh", "Tangerang Kota"],
            ),
            (
                "Bekasi",
                &[
                    "Summarecon Bekasi",
                    "Bekasi Barat",
                    "Bekasi Timur",
                    "Jatiasih",
                    "Pondok Gede",
                ],
            ),
            (
                "Depok",
                &["Margonda", "Cimanggis", "Sawangan", "Beji", "Pancoran Mas"],
            ),
            (
                "Bogor",
                &["Bogor Kota", "Sentul City", "Ciomas", "Cibinong"],
            ),
        ];

        CITY_TO_DISTRICTS
            .iter()
            .map(|&(city, districts)| CityDistricts { city, districts })
            .collect()
    })
}

pub fn cities() -> impl Iterator<Item = &'static str> {
    catalog().iter().map(|entry| entry.city)
}

pub fn districts_for(city: &str) -> Option<&'static [&'static str]> {
    catalog()
        .iter()
        .find(|entry| entry.city == city)
        .map(|entry| entry.districts)
}
