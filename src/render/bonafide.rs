use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{BonafideDetails, CertificateRecord};
use crate::institution::LabelKey;

impl CertificateTemplate for BonafideDetails {
    fn title(&self) -> LabelKey {
        LabelKey::BonafideTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(
            "<p class=\"cert-subtitle\">{}</p>\n<div class=\"student-info\">\n\
             <p class=\"student-name\">{}</p>\n</div>\n",
            ctx.label(LabelKey::CertifyThat),
            ctx.text(&record.student_name),
        );

        html.push_str("<div class=\"info-highlight\">\n");
        html.push_str(&ctx.row(LabelKey::AdmissionNo, &ctx.number(&record.admission_no)));
        html.push_str(&ctx.row(LabelKey::FatherName, &ctx.text(&self.father_name)));
        html.push_str(&ctx.row(LabelKey::MotherName, &ctx.text(&self.mother_name)));
        html.push_str(&ctx.row(LabelKey::Class, &ctx.class_name(&self.class_name)));
        html.push_str(&ctx.row(LabelKey::Section, &ctx.text(&self.section)));
        html.push_str(&ctx.row(LabelKey::AcademicYear, &ctx.number(&self.academic_year)));
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<p class=\"body-text\">{} {}.</p>\n<p class=\"body-text\">{}: <strong>{}</strong></p>\n",
            ctx.text(&record.student_name),
            ctx.label(LabelKey::BonafideBody),
            ctx.label(LabelKey::BonafidePurpose),
            ctx.text(&self.purpose),
        ));
        html.push_str(&ctx.signatures(&[LabelKey::Principal]));
        html.push_str(&ctx.issue_line(record));
        html
    }
}
