use serde::Serialize;

/// ICAO 9303 zone layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub enum MrzType {
    /// ID card, 3 lines of 30.
    #[serde(rename = "TD1")]
    Td1,
    /// ID card, 2 lines of 36.
    #[serde(rename = "TD2")]
    Td2,
    /// Passport, 2 lines of 44.
    #[serde(rename = "TD3")]
    Td3,
    /// Visa, 2 lines of 44.
    #[serde(rename = "MRVA")]
    MrvA,
    /// Visa, 2 lines of 36.
    #[serde(rename = "MRVB")]
    MrvB,
}

impl MrzType {
    pub fn line_length(&self) -> usize {
        match self {
            MrzType::Td1 => 30,
            MrzType::Td2 | MrzType::MrvB => 36,
            MrzType::Td3 | MrzType::MrvA => 44,
        }
    }
}

impl std::fmt::Display for MrzType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MrzType::Td1 => write!(f, "TD1"),
            MrzType::Td2 => write!(f, "TD2"),
            MrzType::Td3 => write!(f, "TD3"),
            MrzType::MrvA => write!(f, "MRVA"),
            MrzType::MrvB => write!(f, "MRVB"),
        }
    }
}

/// Fields parsed from a machine-readable zone.
///
/// Dates are the raw `YYMMDD` strings from the zone. Filler characters are
/// stripped from identifiers and turned into spaces in names. `check_*` are
/// the check characters printed in the zone, `valid_*` whether they match.
/// Checks a layout does not carry are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MrzRecord {
    pub mrz_type: MrzType,
    /// Percentage of applicable checks that passed.
    pub valid_score: u32,
    pub raw_text: String,
    #[serde(rename = "type")]
    pub document_type: String,
    pub country: String,
    pub number: String,
    pub date_of_birth: String,
    pub expiration_date: String,
    pub nationality: String,
    pub sex: String,
    pub names: String,
    pub surname: String,
    /// Personal number (TD3) or the optional data field of other layouts.
    pub personal_number: String,
    /// Second optional data field (TD1 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
    pub check_number: String,
    pub check_date_of_birth: String,
    pub check_expiration_date: String,
    pub check_composite: Option<String>,
    pub check_personal_number: Option<String>,
    pub valid_number: bool,
    pub valid_date_of_birth: bool,
    pub valid_expiration_date: bool,
    pub valid_composite: Option<bool>,
    pub valid_personal_number: Option<bool>,
    pub valid_line_lengths: bool,
    pub valid: bool,
}
