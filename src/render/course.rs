use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{CertificateRecord, CourseDetails};
use crate::institution::LabelKey;

impl CertificateTemplate for CourseDetails {
    fn title(&self) -> LabelKey {
        LabelKey::CourseTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let mut html = format!(
            "<p class=\"cert-subtitle\">{}</p>\n<div class=\"student-info\">\n\
             <p class=\"student-name\">{}</p>\n<p>{}: {}</p>\n<p>{}</p>\n\
             <p class=\"student-name\">{}</p>\n</div>\n",
            ctx.label(LabelKey::CertifyThat),
            ctx.text(&record.student_name),
            ctx.label(LabelKey::AdmissionNo),
            ctx.number(&record.admission_no),
            ctx.label(LabelKey::CourseBody),
            ctx.text(&self.course_name),
        );

        html.push_str("<div class=\"info-highlight\">\n");
        html.push_str(&ctx.row(LabelKey::CompletionDate, &ctx.date_text(&self.completion_date)));
        html.push_str(&ctx.row(LabelKey::Grade, &ctx.text(&self.grade_obtained)));
        html.push_str(&ctx.row(LabelKey::Credits, &ctx.number(&self.credits_earned)));
        html.push_str(&ctx.row(LabelKey::Duration, &ctx.text(&self.course_duration)));
        html.push_str(&ctx.row(LabelKey::Instructor, &ctx.text(&self.instructor_name)));
        html.push_str("</div>\n");

        html.push_str(&ctx.signatures(&[LabelKey::Instructor, LabelKey::Principal]));
        html.push_str(&ctx.issue_line(record));
        html
    }
}
