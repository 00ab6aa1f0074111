//! Machine-readable zone location and ICAO 9303 field parsing.
//!
//! The zone is located in plain OCR text: lines are normalised, anything
//! outside the MRZ alphabet is discarded, and the last run of consecutive
//! lines matching one of the three zone geometries is taken. Lines within
//! [`LENGTH_TOLERANCE`] of the expected width are padded or truncated with
//! filler so that fixed field offsets apply.

use super::record::{MrzRecord, MrzType};

/// Characters Tesseract is restricted to when reading a zone.
pub const MRZ_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<";

pub const FILLER: char = '<';

/// How far an OCR'd line may deviate from the layout width.
pub const LENGTH_TOLERANCE: usize = 2;

/// `(line count, line length)`, searched in this order at each position.
const GEOMETRIES: [(usize, usize); 3] = [(2, 44), (2, 36), (3, 30)];

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Zone lines fitted to their layout width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzZone {
    pub lines: Vec<String>,
    /// Whether every line had the exact layout width before fitting.
    pub exact_lengths: bool,
}

/// Value of a zone character for check digit computation.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        FILLER => Some(0),
        _ => None,
    }
}

/// ICAO 9303 check digit (weights 7, 3, 1 repeating, modulo 10).
pub fn check_digit(field: &str) -> Option<char> {
    let mut sum = 0;
    for (i, c) in field.chars().enumerate() {
        sum += char_value(c)? * WEIGHTS[i % 3];
    }
    char::from_digit(sum % 10, 10)
}

/// A filler in the check position counts as zero.
pub fn verify_check_digit(field: &str, check: char) -> bool {
    let check = if check == FILLER { '0' } else { check };
    check_digit(field) == Some(check)
}

/// Strip whitespace, upper-case, and map guillemets back to filler.
pub fn normalize_line(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '«' => FILLER,
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

fn is_zone_line(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == FILLER)
}

fn fit_line(line: &str, width: usize) -> String {
    let mut fitted: String = line.chars().take(width).collect();
    while fitted.len() < width {
        fitted.push(FILLER);
    }
    fitted
}

/// Find the last MRZ-shaped block of lines in OCR output.
pub fn locate_zone(text: &str) -> Option<MrzZone> {
    let lines: Vec<String> = text
        .lines()
        .map(normalize_line)
        .filter(|l| is_zone_line(l))
        .collect();

    for end in (0..lines.len()).rev() {
        for (count, width) in GEOMETRIES {
            if end + 1 < count {
                continue;
            }
            let window = &lines[end + 1 - count..=end];
            let fits = window
                .iter()
                .all(|l| l.len().abs_diff(width) <= LENGTH_TOLERANCE);
            if fits {
                return Some(MrzZone {
                    lines: window.iter().map(|l| fit_line(l, width)).collect(),
                    exact_lengths: window.iter().all(|l| l.len() == width),
                });
            }
        }
    }

    None
}

/// Parse a located zone. `None` if the zone does not have a known geometry.
pub fn parse_zone(zone: &MrzZone) -> Option<MrzRecord> {
    let lines = &zone.lines;
    let width = lines.first()?.len();
    if lines.iter().any(|l| l.len() != width || !is_zone_line(l)) {
        return None;
    }

    let is_visa = lines[0].starts_with('V');
    let mrz_type = match (lines.len(), width, is_visa) {
        (3, 30, _) => MrzType::Td1,
        (2, 36, false) => MrzType::Td2,
        (2, 36, true) => MrzType::MrvB,
        (2, 44, false) => MrzType::Td3,
        (2, 44, true) => MrzType::MrvA,
        _ => return None,
    };

    let fields = match mrz_type {
        MrzType::Td1 => td1_fields(&lines[0], &lines[1], &lines[2]),
        _ => two_line_fields(mrz_type, &lines[0], &lines[1]),
    };

    Some(fields.into_record(mrz_type, lines.join("\n"), zone.exact_lengths))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckedField {
    value: String,
    check: char,
    valid: bool,
}

impl CheckedField {
    fn new(field: &str, check: char) -> Self {
        Self {
            value: field.to_string(),
            check,
            valid: verify_check_digit(field, check),
        }
    }
}

struct ZoneFields {
    document_type: String,
    country: String,
    number: CheckedField,
    date_of_birth: CheckedField,
    expiration_date: CheckedField,
    nationality: String,
    sex: String,
    name_field: String,
    personal_number: String,
    personal_number_check: Option<CheckedField>,
    optional_data: Option<String>,
    composite: Option<CheckedField>,
}

impl ZoneFields {
    fn into_record(self, mrz_type: MrzType, raw_text: String, valid_line_lengths: bool) -> MrzRecord {
        let mut checks = vec![
            self.number.valid,
            self.date_of_birth.valid,
            self.expiration_date.valid,
            valid_line_lengths,
        ];
        if let Some(pn) = &self.personal_number_check {
            checks.push(pn.valid);
        }
        if let Some(composite) = &self.composite {
            checks.push(composite.valid);
        }
        let passed = checks.iter().filter(|ok| **ok).count();
        let valid_score = ((passed as f64 / checks.len() as f64) * 100.0).round() as u32;

        let (surname, names) = split_names(&self.name_field);

        MrzRecord {
            mrz_type,
            valid_score,
            raw_text,
            document_type: strip_filler(&self.document_type),
            country: strip_filler(&self.country),
            number: strip_filler(&self.number.value),
            date_of_birth: self.date_of_birth.value.clone(),
            expiration_date: self.expiration_date.value.clone(),
            nationality: strip_filler(&self.nationality),
            sex: self.sex,
            names,
            surname,
            personal_number: strip_filler(&self.personal_number),
            optional_data: self.optional_data.as_deref().map(strip_filler),
            check_number: self.number.check.to_string(),
            check_date_of_birth: self.date_of_birth.check.to_string(),
            check_expiration_date: self.expiration_date.check.to_string(),
            check_composite: self.composite.as_ref().map(|c| c.check.to_string()),
            check_personal_number: self
                .personal_number_check
                .as_ref()
                .map(|c| c.check.to_string()),
            valid_number: self.number.valid,
            valid_date_of_birth: self.date_of_birth.valid,
            valid_expiration_date: self.expiration_date.valid,
            valid_composite: self.composite.as_ref().map(|c| c.valid),
            valid_personal_number: self.personal_number_check.as_ref().map(|c| c.valid),
            valid_line_lengths,
            valid: passed == checks.len(),
        }
    }
}

fn char_at(line: &str, index: usize) -> char {
    line.as_bytes()[index] as char
}

fn strip_filler(field: &str) -> String {
    field.trim_matches(FILLER).to_string()
}

/// `SURNAME<<GIVEN<NAMES<<<` -> (`SURNAME`, `GIVEN NAMES`).
fn split_names(field: &str) -> (String, String) {
    let field = field.trim_end_matches(FILLER);
    let (surname, given) = field.split_once("<<").unwrap_or((field, ""));
    let tidy = |part: &str| {
        part.split(FILLER)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    };
    (tidy(surname), tidy(given))
}

/// TD2, TD3, MRV-A and MRV-B share the first 28 columns of line 2.
fn two_line_fields(mrz_type: MrzType, line1: &str, line2: &str) -> ZoneFields {
    let width = mrz_type.line_length();

    let (personal_number, personal_number_check, composite) = match mrz_type {
        MrzType::Td3 => (
            line2[28..42].to_string(),
            Some(CheckedField::new(&line2[28..42], char_at(line2, 42))),
            Some(CheckedField::new(
                &format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..43]),
                char_at(line2, 43),
            )),
        ),
        MrzType::Td2 => (
            line2[28..35].to_string(),
            None,
            Some(CheckedField::new(
                &format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..35]),
                char_at(line2, 35),
            )),
        ),
        _ => (line2[28..width].to_string(), None, None),
    };

    ZoneFields {
        document_type: line1[0..2].to_string(),
        country: line1[2..5].to_string(),
        number: CheckedField::new(&line2[0..9], char_at(line2, 9)),
        date_of_birth: CheckedField::new(&line2[13..19], char_at(line2, 19)),
        expiration_date: CheckedField::new(&line2[21..27], char_at(line2, 27)),
        nationality: line2[10..13].to_string(),
        sex: char_at(line2, 20).to_string(),
        name_field: line1[5..width].to_string(),
        personal_number,
        personal_number_check,
        optional_data: None,
        composite,
    }
}

fn td1_fields(line1: &str, line2: &str, line3: &str) -> ZoneFields {
    ZoneFields {
        document_type: line1[0..2].to_string(),
        country: line1[2..5].to_string(),
        number: CheckedField::new(&line1[5..14], char_at(line1, 14)),
        date_of_birth: CheckedField::new(&line2[0..6], char_at(line2, 6)),
        expiration_date: CheckedField::new(&line2[8..14], char_at(line2, 14)),
        nationality: line2[15..18].to_string(),
        sex: char_at(line2, 7).to_string(),
        name_field: line3.to_string(),
        personal_number: line1[15..30].to_string(),
        personal_number_check: None,
        optional_data: Some(line2[18..29].to_string()),
        composite: Some(CheckedField::new(
            &format!("{}{}{}{}", &line1[5..30], &line2[0..7], &line2[8..15], &line2[18..29]),
            char_at(line2, 29),
        )),
    }
}
