//! HTML rendering of certificates and ID cards.
//!
//! Rendering is a pure function of the record, the branding, the institution
//! mode and the current date; nothing here touches the network or the clock.

pub mod common;
pub mod id_card;
pub mod styles;

mod adhar;
mod appreciation;
mod bonafide;
mod character;
mod course;
mod progress;
mod transfer;

use chrono::NaiveDate;

use crate::certificate::model::{CertificateDetails, CertificateRecord};
use crate::institution::{InstitutionMode, LabelKey, Labels, Lang, SchoolBranding};
use common::{escape_html, format_date, format_date_text};

/// Everything a template needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub branding: &'a SchoolBranding,
    pub mode: InstitutionMode,
    pub today: NaiveDate,
}

impl<'a> RenderContext<'a> {
    pub fn new(branding: &'a SchoolBranding, mode: InstitutionMode, today: NaiveDate) -> Self {
        Self {
            branding,
            mode,
            today,
        }
    }

    pub fn lang(&self) -> Lang {
        self.mode.lang()
    }

    pub fn labels(&self) -> Labels {
        self.mode.labels()
    }

    pub fn label(&self, key: LabelKey) -> &'static str {
        self.labels().get(key)
    }

    /// Escaped value, or the mode's placeholder when blank.
    pub fn text(&self, value: &str) -> String {
        if value.trim().is_empty() {
            self.mode.placeholder().to_string()
        } else {
            escape_html(value)
        }
    }

    /// Escaped value with digits localized, or the placeholder.
    pub fn number(&self, value: &str) -> String {
        if value.trim().is_empty() {
            self.mode.placeholder().to_string()
        } else {
            escape_html(&common::localize_digits(value, self.lang()))
        }
    }

    pub fn date_text(&self, raw: &str) -> String {
        format_date_text(raw, self.lang())
            .map(|formatted| escape_html(&formatted))
            .unwrap_or_else(|| self.mode.placeholder().to_string())
    }

    pub fn date(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => format_date(date, self.lang()),
            None => self.mode.placeholder().to_string(),
        }
    }

    pub fn class_name(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            self.mode.placeholder().to_string()
        } else {
            escape_html(&common::class_display(raw, self.lang()))
        }
    }

    /// `<p><strong>Label:</strong> value</p>`; `value` must already be escaped.
    pub fn row(&self, key: LabelKey, value: &str) -> String {
        format!("<p><strong>{}:</strong> {}</p>\n", self.label(key), value)
    }

    /// Institution header block shared by all certificates.
    pub fn header(&self) -> String {
        let branding = self.branding;
        let logo = branding
            .logo
            .as_deref()
            .filter(|logo| !logo.is_empty())
            .map(|logo| {
                format!(
                    "<img src=\"{}\" alt=\"Logo\" class=\"school-logo\" />\n",
                    escape_html(logo)
                )
            })
            .unwrap_or_default();
        let name = if branding.name.is_empty() {
            self.label(LabelKey::InstitutionNameFallback).to_string()
        } else {
            escape_html(&branding.name)
        };
        let contact: Vec<String> = [&branding.phone, &branding.email]
            .into_iter()
            .filter(|v| !v.is_empty())
            .map(|v| escape_html(v))
            .collect();
        let contact = if contact.is_empty() {
            String::new()
        } else {
            format!("<p class=\"school-contact\">{}</p>\n", contact.join(" | "))
        };

        format!(
            "<div class=\"header\">\n{logo}<h1 class=\"school-name\">{name}</h1>\n\
             <p class=\"school-address\">{}</p>\n{contact}</div>\n",
            self.text(&branding.address)
        )
    }

    pub fn signatures(&self, keys: &[LabelKey]) -> String {
        let boxes: String = keys
            .iter()
            .map(|key| {
                format!(
                    "<div class=\"signature-box\"><div class=\"signature-line\">{}</div></div>\n",
                    self.label(*key)
                )
            })
            .collect();
        format!("<div class=\"signature-section\">\n{boxes}</div>\n")
    }

    /// Signatories: madrasahs add the director.
    pub fn default_signatories(&self) -> &'static [LabelKey] {
        if self.mode.is_madrasah() {
            &[LabelKey::ClassTeacher, LabelKey::Principal, LabelKey::Director]
        } else {
            &[LabelKey::ClassTeacher, LabelKey::Principal]
        }
    }

    /// Issue-date line; unissued records show today's date as the print date.
    pub fn issue_line(&self, record: &CertificateRecord) -> String {
        let date = record.issue_date.unwrap_or(self.today);
        format!(
            "<p class=\"issue-date\">{}: {}</p>\n",
            self.label(LabelKey::IssueDate),
            format_date(date, self.lang())
        )
    }
}

/// A per-kind certificate layout.
pub trait CertificateTemplate {
    fn title(&self) -> LabelKey;

    /// Markup between the institution header and the end of the page.
    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String;

    fn stylesheet(&self) -> &'static str {
        styles::CERTIFICATE
    }

    /// Full certificate fragment including the header.
    fn render(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        format!(
            "<div class=\"certificate-wrapper\">\n<div class=\"certificate\">\n{}\
             <h2 class=\"cert-title\">{}</h2>\n{}</div>\n</div>\n",
            ctx.header(),
            ctx.label(self.title()),
            self.body(record, ctx)
        )
    }
}

fn template_for(details: &CertificateDetails) -> &dyn CertificateTemplate {
    match details {
        CertificateDetails::Transfer(d) => d,
        CertificateDetails::Course(d) => d,
        CertificateDetails::Progress(d) => d,
        CertificateDetails::Bonafide(d) => d,
        CertificateDetails::AdharExtract(d) => d,
        CertificateDetails::Appreciation(d) => d,
        CertificateDetails::Character(d) => d,
    }
}

/// Render the certificate fragment for `record`.
pub fn render_certificate(record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
    template_for(&record.details).render(record, ctx)
}

/// Render `record` as a standalone document. `print` adds the print trigger.
pub fn certificate_document(
    record: &CertificateRecord,
    ctx: &RenderContext<'_>,
    print: bool,
) -> String {
    let template = template_for(&record.details);
    let title = format!("{} - {}", ctx.label(template.title()), record.student_name);
    common::document(
        &title,
        template.stylesheet(),
        &template.render(record, ctx),
        ctx.lang(),
        print,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_branding_still_fills_every_header_slot() {
        let branding = SchoolBranding::default();
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let html = RenderContext::new(&branding, InstitutionMode::school(), today).header();
        assert!(html.contains("<h1 class=\"school-name\">Institution Name</h1>"));
        assert!(html.contains("<p class=\"school-address\">N/A</p>"));
        assert!(!html.contains("school-logo"));

        let html = RenderContext::new(&branding, InstitutionMode::madrasah(), today).header();
        assert!(html.contains("<p class=\"school-address\">প্রযোজ্য নয়</p>"));
    }
}
