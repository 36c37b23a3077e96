use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{CertificateRecord, TransferDetails};
use crate::institution::LabelKey;

impl CertificateTemplate for TransferDetails {
    fn title(&self) -> LabelKey {
        LabelKey::TransferTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let conduct = if self.conduct_remarks.trim().is_empty() {
            ctx.label(LabelKey::Satisfactory).to_string()
        } else {
            ctx.text(&self.conduct_remarks)
        };

        let mut html = format!(
            "<p class=\"cert-subtitle\">{}</p>\n<div class=\"student-info\">\n\
             <p class=\"student-name\">{}</p>\n<p>{}: {}</p>\n<p>{}: {}, {}: {}</p>\n</div>\n",
            ctx.label(LabelKey::CertifyThat),
            ctx.text(&record.student_name),
            ctx.label(LabelKey::AdmissionNo),
            ctx.number(&record.admission_no),
            ctx.label(LabelKey::Class),
            ctx.class_name(&self.last_class),
            ctx.label(LabelKey::Section),
            ctx.text(&self.last_section),
        );

        html.push_str("<div class=\"info-highlight\">\n");
        html.push_str(&ctx.row(LabelKey::DateOfAdmission, &ctx.date_text(&self.date_of_admission)));
        html.push_str(&ctx.row(LabelKey::DateOfLeaving, &ctx.date_text(&self.date_of_leaving)));
        html.push_str(&ctx.row(LabelKey::ReasonForLeaving, &ctx.text(&self.reason_for_transfer)));
        html.push_str(&ctx.row(LabelKey::ConductAndCharacter, &conduct));
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<p class=\"closing-text\">{}</p>\n",
            ctx.label(LabelKey::TransferClosing)
        ));
        html.push_str(&ctx.signatures(ctx.default_signatories()));
        html.push_str(&ctx.issue_line(record));
        html
    }
}

#[cfg(test)]
mod tests {
    use crate::certificate::model::{CertificateKind, CertificateRecord};
    use crate::institution::{InstitutionMode, SchoolBranding};
    use crate::render::{render_certificate, RenderContext};
    use chrono::NaiveDate;
    use serde_json::json;

    fn record() -> CertificateRecord {
        CertificateRecord::from_value(
            CertificateKind::Transfer,
            json!({
                "id": "tc-1",
                "student_name": "আব্দুল্লাহ",
                "admission_no": "2021",
                "last_class": "7",
                "last_section": "A",
                "date_of_admission": "2021-01-05",
                "date_of_leaving": "2025-01-10",
                "reason_for_transfer": "পারিবারিক স্থানান্তর",
                "status": "issued",
                "issue_date": "2025-01-10"
            }),
        )
        .unwrap()
    }

    #[test]
    fn madrasah_transfer_certificate_is_bengali() {
        let branding = SchoolBranding {
            name: "দারুল উলুম".into(),
            ..Default::default()
        };
        let ctx = RenderContext::new(
            &branding,
            InstitutionMode::madrasah(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        );

        let html = render_certificate(&record(), &ctx);
        assert!(html.contains("ছাড়পত্র"));
        assert!(html.contains("দারুল উলুম"));
        assert!(html.contains("সপ্তম"));
        assert!(html.contains("১০/১/২০২৫"));
        assert!(html.contains("ভর্তি নং: ২০২১"));
        assert!(html.contains("সন্তোষজনক"));
        assert!(html.contains("মোহতামিম"));
    }

    #[test]
    fn school_transfer_certificate_uses_placeholders() {
        let branding = SchoolBranding::default();
        let mut record = record();
        if let crate::certificate::model::CertificateDetails::Transfer(d) = &mut record.details {
            d.date_of_admission.clear();
        }
        let ctx = RenderContext::new(
            &branding,
            InstitutionMode::school(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        );

        let html = render_certificate(&record, &ctx);
        assert!(html.contains("Transfer Certificate"));
        assert!(html.contains("Institution Name"));
        assert!(html.contains("<strong>Date of Admission:</strong> N/A"));
        assert!(html.contains("10 January 2025"));
        assert!(!html.contains("Director"));
    }
}
