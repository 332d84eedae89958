//! Opportunistic typing of delimited text fields.

use mapper_model::CellValue;

/// Converts one raw text field into a cell value.
///
/// With inference on, blank fields become [`CellValue::Empty`] and
/// numeric-looking fields become [`CellValue::Number`]; everything else is
/// kept verbatim as text. With inference off every field is text.
pub fn infer_cell(raw: &str, infer_types: bool) -> CellValue {
    if !infer_types {
        return CellValue::Text(raw.to_string());
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if looks_numeric(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    CellValue::Text(raw.to_string())
}

/// Matches `-?(digits[.digits] | digits. | .digits)([eE][+-]?digits)?`.
///
/// Words like `inf` or `NaN` and a leading `+` are not numeric here even
/// though `f64::from_str` accepts them.
pub fn looks_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
