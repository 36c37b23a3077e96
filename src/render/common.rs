//! Shared helpers for template rendering: escaping, locale-aware dates and
//! ordinals, page scaffolding and download names.

use chrono::{Datelike, NaiveDate};

use crate::certificate::model::{parse_date, CertificateRecord};
use crate::institution::Lang;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

const BENGALI_ORDINALS: [&str; 10] = [
    "প্রথম",
    "দ্বিতীয়",
    "তৃতীয়",
    "চতুর্থ",
    "পঞ্চম",
    "ষষ্ঠ",
    "সপ্তম",
    "অষ্টম",
    "নবম",
    "দশম",
];

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Replace ASCII digits with Bengali digits.
pub fn bengali_digits(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) if ch.is_ascii_digit() => BENGALI_DIGITS[d as usize],
            _ => ch,
        })
        .collect()
}

pub fn localize_digits(value: &str, lang: Lang) -> String {
    match lang {
        Lang::Bn => bengali_digits(value),
        Lang::En => value.to_string(),
    }
}

/// `10 January 2025` in English, `১০/১/২০২৫` in Bengali.
pub fn format_date(date: NaiveDate, lang: Lang) -> String {
    match lang {
        Lang::En => {
            let month = MONTHS[(date.month0() as usize).min(MONTHS.len() - 1)];
            format!("{} {} {}", date.day(), month, date.year())
        }
        Lang::Bn => bengali_digits(&format!("{}/{}/{}", date.day(), date.month(), date.year())),
    }
}

/// Format a stored date string. Text that is not a date is passed through;
/// blank input yields `None`.
pub fn format_date_text(raw: &str, lang: Lang) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match parse_date(trimmed) {
        Some(date) => format_date(date, lang),
        None => trimmed.to_string(),
    })
}

/// `1st`, `2nd`, `3rd`, `11th` in English; `প্রথম` to `দশম`, then `১১তম`, in Bengali.
pub fn ordinal(n: u32, lang: Lang) -> String {
    match lang {
        Lang::En => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
        Lang::Bn => match n {
            1..=10 => BENGALI_ORDINALS[(n - 1) as usize].to_string(),
            _ => format!("{}তম", bengali_digits(&n.to_string())),
        },
    }
}

/// Numeric class names read as ordinals ("7" becomes "7th" / "সপ্তম").
pub fn class_display(raw: &str, lang: Lang) -> String {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => ordinal(n, lang),
        _ => localize_digits(raw, lang),
    }
}

/// Wrap a rendered fragment into a standalone HTML document.
///
/// Print documents open the browser print dialog once loaded.
pub fn document(title: &str, stylesheet: &str, body: &str, lang: Lang, print: bool) -> String {
    let lang_attr = match lang {
        Lang::Bn => "bn",
        Lang::En => "en",
    };
    let script = if print {
        "<script>window.onload = function () { window.print(); };</script>"
    } else {
        ""
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang_attr}\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>{}</title>\n<style>{stylesheet}</style>\n</head>\n<body>\n{body}\n{script}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// `TC_<admission_no>_<student_name>.pdf`, safe for filesystems.
pub fn download_filename(record: &CertificateRecord) -> String {
    let raw = format!(
        "{}_{}_{}.pdf",
        record.kind.download_prefix(),
        record.admission_no,
        record.student_name
    );
    sanitize_filename::sanitize(raw)
}
