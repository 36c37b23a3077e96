use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{CertificateRecord, CharacterDetails, ConductRating};
use crate::institution::LabelKey;

impl ConductRating {
    pub fn label_key(self) -> LabelKey {
        match self {
            ConductRating::Excellent => LabelKey::ConductExcellent,
            ConductRating::VeryGood => LabelKey::ConductVeryGood,
            ConductRating::Good => LabelKey::ConductGood,
            ConductRating::Average => LabelKey::ConductAverage,
        }
    }
}

impl CertificateTemplate for CharacterDetails {
    fn title(&self) -> LabelKey {
        LabelKey::CharacterTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let conduct = ctx.label(self.conduct.label_key());

        let mut html = format!(
            "<p class=\"cert-subtitle\">{}</p>\n<div class=\"student-info\">\n\
             <p class=\"student-name\">{}</p>\n",
            ctx.label(LabelKey::CertifyThat),
            ctx.text(&record.student_name),
        );
        html.push_str(&ctx.row(LabelKey::FatherName, &ctx.text(&self.father_name)));
        html.push_str(&format!(
            "<p>{}: {}, {}: {}</p>\n</div>\n",
            ctx.label(LabelKey::Class),
            ctx.class_name(&self.class_name),
            ctx.label(LabelKey::Section),
            ctx.text(&self.section),
        ));

        html.push_str(&format!(
            "<p class=\"body-text\">{} <strong>{}</strong>.</p>\n",
            ctx.label(LabelKey::CharacterBody),
            conduct
        ));
        html.push_str("<div class=\"info-highlight\">\n");
        html.push_str(&ctx.row(LabelKey::ConductRating, conduct));
        if !self.remarks.trim().is_empty() {
            html.push_str(&ctx.row(LabelKey::Remarks, &ctx.text(&self.remarks)));
        }
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<p class=\"closing-text\">{}</p>\n",
            ctx.label(LabelKey::CharacterClosing)
        ));

        html.push_str(&ctx.signatures(ctx.default_signatories()));
        html.push_str(&ctx.issue_line(record));
        html
    }
}
