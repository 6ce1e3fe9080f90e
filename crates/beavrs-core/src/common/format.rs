//! Float text conventions used across the solver documents.
//!
//! Two styles are in play: shortest round-trip text (lattice origins,
//! nuclide fractions, mesh bounds) and a general format with a fixed number
//! of significant digits right-padded with zeros (surface coefficients).

/// Shortest text that reads back to `value`, always with a decimal point or
/// exponent. Exponents are signed and at least two digits wide; scientific
/// form is used below 1e-4 and from 1e16 upward.
pub fn shortest_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = split_exponent(&scientific);
    if (-4..16).contains(&exponent) {
        let plain = format!("{value}");
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        format!("{mantissa}{}", exponent_suffix(exponent))
    }
}

/// General format with `precision` significant digits. Trailing zeros are
/// dropped but a fixed-point result keeps one digit after the point.
pub fn general_float(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if !value.is_finite() {
        return shortest_float(value);
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = split_exponent(&scientific);
    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = trim_fraction(mantissa);
        let mantissa = mantissa.strip_suffix('.').unwrap_or(&mantissa);
        return format!("{mantissa}{}", exponent_suffix(exponent));
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    let fixed = trim_fraction(&format!("{value:.decimals$}"));
    if fixed.ends_with('.') {
        format!("{fixed}0")
    } else if fixed.contains('.') {
        fixed
    } else {
        format!("{fixed}.0")
    }
}

/// [`general_float`] right-padded with `'0'` up to `width` characters.
pub fn general_float_padded(value: f64, precision: usize, width: usize) -> String {
    let mut text = general_float(value, precision);
    while text.len() < width {
        text.push('0');
    }
    text
}

/// Surface-coefficient style used throughout the geometry document.
pub fn coefficient(value: f64) -> String {
    general_float_padded(value, 6, 8)
}

pub fn fixed_float(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Space-separated shortest floats.
pub fn float_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| shortest_float(*value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_exponent(scientific: &str) -> (&str, i32) {
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (scientific, 0),
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exponent.unsigned_abs())
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').to_string()
    } else {
        text.to_string()
    }
}
