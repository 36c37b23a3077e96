use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{AppreciationDetails, CertificateRecord};
use crate::institution::LabelKey;

impl CertificateTemplate for AppreciationDetails {
    fn title(&self) -> LabelKey {
        LabelKey::AppreciationTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(
            "<p class=\"cert-subtitle\">{}</p>\n<div class=\"student-info\">\n\
             <p class=\"student-name\">{}</p>\n<p>{}: {}, {}: {}</p>\n<p>{}: {}</p>\n</div>\n",
            ctx.label(LabelKey::CertifyThat),
            ctx.text(&record.student_name),
            ctx.label(LabelKey::Class),
            ctx.class_name(&self.class_name),
            ctx.label(LabelKey::Section),
            ctx.text(&self.section),
            ctx.label(LabelKey::AdmissionNo),
            ctx.number(&record.admission_no),
        );

        html.push_str(&format!(
            "<p class=\"body-text\">{}</p>\n<div class=\"info-highlight\">\n",
            ctx.label(LabelKey::AppreciationBody)
        ));
        html.push_str(&ctx.row(LabelKey::Achievement, &ctx.text(&self.achievement)));
        if !self.remarks.trim().is_empty() {
            html.push_str(&ctx.row(LabelKey::Remarks, &ctx.text(&self.remarks)));
        }
        html.push_str("</div>\n");

        html.push_str(&ctx.signatures(ctx.default_signatories()));
        html.push_str(&ctx.issue_line(record));
        html
    }
}
