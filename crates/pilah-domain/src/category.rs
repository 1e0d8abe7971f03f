//! Waste category enumeration.

use serde::{Deserialize, Serialize};

/// Closed set of labels the classifier may produce, plus sentinel values.
///
/// Labels are stored verbatim in `classifications.result` and shown in the
/// UI, so the Indonesian strings from the classifier prompt are the wire
/// format here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteCategory {
    Organik,
    PlastikDaurUlang,
    KertasDaurUlang,
    KacaDaurUlang,
    LogamDaurUlang,
    SampahLainnya,
    /// Sentinel: no waste detected in the image.
    TidakAdaSampah,
    /// Sentinel: the classifier returned a label outside the known set.
    TidakDiketahui,
    /// Sentinel: classification failed; shown for `Failed` images which
    /// carry no classification row.
    GagalKlasifikasi,
}

/// Category order used by reporting views.
pub const ALL_CATEGORIES: [WasteCategory; 9] = [
    WasteCategory::Organik,
    WasteCategory::PlastikDaurUlang,
    WasteCategory::KertasDaurUlang,
    WasteCategory::KacaDaurUlang,
    WasteCategory::LogamDaurUlang,
    WasteCategory::SampahLainnya,
    WasteCategory::TidakAdaSampah,
    WasteCategory::TidakDiketahui,
    WasteCategory::GagalKlasifikasi,
];

impl WasteCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organik => "Organik",
            Self::PlastikDaurUlang => "Plastik Daur Ulang",
            Self::KertasDaurUlang => "Kertas Daur Ulang",
            Self::KacaDaurUlang => "Kaca Daur Ulang",
            Self::LogamDaurUlang => "Logam Daur Ulang",
            Self::SampahLainnya => "Sampah Lainnya",
            Self::TidakAdaSampah => "Tidak Ada Sampah",
            Self::TidakDiketahui => "Tidak Diketahui",
            Self::GagalKlasifikasi => "Gagal Klasifikasi",
        }
    }

    /// Parse an exact label. Returns `None` for anything outside the set.
    pub fn parse(label: &str) -> Option<Self> {
        ALL_CATEGORIES.iter().copied().find(|c| c.as_str() == label)
    }

    /// Constrain a classifier-produced label to the closed set.
    ///
    /// Unknown labels become [`WasteCategory::TidakDiketahui`] rather than
    /// flowing raw strings into the database.
    pub fn from_label(label: &str) -> Self {
        Self::parse(label.trim()).unwrap_or(Self::TidakDiketahui)
    }
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
