//! Text measurement and wrapping, plus the number formats used on ticks and labels.

use num_format::{Locale, ToFormattedString};

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> u32 {
    (text.chars().count() as f64 * font_px * 0.60).ceil() as u32
}

/// Cut `text` to fit `max_px`, ending with an ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: f64, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = text.chars().collect();
    while !out.is_empty() && estimate_text_width_px(&format!("{out}…"), font_px) > max_px {
        out.pop();
    }
    if out.is_empty() {
        return String::new();
    }
    out.push('…');
    out
}

/// Wrap on whitespace so each line fits `max_px`; single overlong words are truncated.
pub fn wrap_text_to_width(text: &str, font_px: f64, max_px: u32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate = if cur.is_empty() {
            word.to_string()
        } else {
            format!("{cur} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            cur = candidate;
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        if estimate_text_width_px(word, font_px) <= max_px {
            cur = word.to_string();
        } else {
            lines.push(truncate_to_width(word, font_px, max_px));
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// Format `value` with `decimals` fraction digits and locale thousands separators.
pub fn format_number(value: f64, decimals: usize, locale: &Locale, dec_sep: char) -> String {
    let plain = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let grouped = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| int_part.to_string());

    let is_zero = plain.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push(dec_sep);
        out.push_str(f);
    }
    out
}

/// Value labels show one decimal place.
pub fn format_label(value: f64, locale: &Locale, dec_sep: char) -> String {
    format_number(value, 1, locale, dec_sep)
}

/// Tick precision shrinks as magnitude grows.
pub fn format_tick(value: f64, locale: &Locale, dec_sep: char) -> String {
    let a = value.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format_number(value, prec, locale, dec_sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rounds_to_one_decimal() {
        assert_eq!(format_label(12.34, &Locale::en, '.'), "12.3");
        assert_eq!(format_label(12.5, &Locale::en, '.'), "12.5");
        assert_eq!(format_label(-3.0, &Locale::en, '.'), "-3.0");
        assert_eq!(format_label(-0.04, &Locale::en, '.'), "0.0");
    }

    #[test]
    fn thousands_follow_locale() {
        assert_eq!(format_label(1234567.21, &Locale::en, '.'), "1,234,567.2");
        assert_eq!(format_label(-1234.5, &Locale::de, ','), "-1.234,5");
        assert_eq!(format_tick(2500.0, &Locale::en, '.'), "2,500");
        assert_eq!(format_tick(0.5, &Locale::en, '.'), "0.50");
    }

    #[test]
    fn wrapping_keeps_words() {
        let lines = wrap_text_to_width("Large Cap Equity Index", 10.0, 70);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| estimate_text_width_px(l, 10.0) <= 70));
        assert_eq!(lines.join(" "), "Large Cap Equity Index");
    }

    #[test]
    fn truncation_adds_ellipsis() {
        let t = truncate_to_width("Supercalifragilistic", 10.0, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 10.0) <= 60);
    }
}
