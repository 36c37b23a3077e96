use super::common::{escape_html, format_date};
use super::{styles, CertificateTemplate, RenderContext};
use crate::certificate::model::{CertificateRecord, ProgressDetails, SubjectMark};
use crate::institution::LabelKey;

impl ProgressDetails {
    fn info_item(ctx: &RenderContext<'_>, key: LabelKey, value: &str) -> String {
        format!(
            "<div class=\"info-item\"><span class=\"info-label\">{}:</span>\
             <span class=\"info-value\">{}</span></div>\n",
            ctx.label(key),
            value
        )
    }

    fn subject_row(ctx: &RenderContext<'_>, subject: &SubjectMark) -> String {
        let remarks = if subject.remarks.trim().is_empty() {
            "-".to_string()
        } else {
            escape_html(&subject.remarks)
        };
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td><td>{}</td></tr>\n",
            ctx.text(subject.display_name()),
            ctx.number(&subject.marks_obtained),
            ctx.number(&subject.total_marks),
            ctx.text(&subject.grade),
            remarks
        )
    }

    fn subjects_section(&self, ctx: &RenderContext<'_>) -> String {
        if self.subjects.is_empty() {
            return format!(
                "<p class=\"empty-subjects\">{}</p>\n",
                ctx.label(LabelKey::NoSubjects)
            );
        }

        let rows: String = self
            .subjects
            .iter()
            .map(|subject| Self::subject_row(ctx, subject))
            .collect();
        let headers: String = [
            LabelKey::Subject,
            LabelKey::MarksObtained,
            LabelKey::TotalMarks,
            LabelKey::Grade,
            LabelKey::Remarks,
        ]
        .iter()
        .map(|key| format!("<th>{}</th>", ctx.label(*key)))
        .collect();

        format!(
            "<h3 class=\"section-title\">{}</h3>\n<table class=\"subjects-table\">\n\
             <thead><tr>{headers}</tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n",
            ctx.label(LabelKey::SubjectPerformance)
        )
    }

    fn remarks(ctx: &RenderContext<'_>, key: LabelKey, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        format!(
            "<div class=\"remarks-section\">\n<div class=\"remarks-label\">{}:</div>\n\
             <div class=\"remarks-text\">{}</div>\n</div>\n",
            ctx.label(key),
            escape_html(text)
        )
    }
}

impl CertificateTemplate for ProgressDetails {
    fn title(&self) -> LabelKey {
        LabelKey::ProgressTitle
    }

    fn stylesheet(&self) -> &'static str {
        styles::PROGRESS_REPORT
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let attendance = if self.attendance_percentage.trim().is_empty() {
            ctx.mode.placeholder().to_string()
        } else {
            format!("{}%", ctx.number(self.attendance_percentage.trim_end_matches('%')))
        };

        let mut html = String::from("<div class=\"student-info\">\n<div class=\"info-grid\">\n");
        html.push_str(&Self::info_item(ctx, LabelKey::StudentName, &ctx.text(&record.student_name)));
        html.push_str(&Self::info_item(ctx, LabelKey::AdmissionNo, &ctx.number(&record.admission_no)));
        html.push_str(&Self::info_item(ctx, LabelKey::Class, &ctx.class_name(&self.class_name)));
        html.push_str(&Self::info_item(ctx, LabelKey::Section, &ctx.text(&self.section)));
        html.push_str(&Self::info_item(ctx, LabelKey::AcademicYear, &ctx.number(&self.academic_year)));
        html.push_str(&Self::info_item(ctx, LabelKey::Term, &ctx.text(self.term_label())));
        html.push_str(&Self::info_item(
            ctx,
            LabelKey::OverallGrade,
            &format!("<strong>{}</strong>", ctx.text(&self.overall_grade)),
        ));
        html.push_str(&Self::info_item(ctx, LabelKey::Attendance, &attendance));
        html.push_str("</div>\n</div>\n");

        html.push_str(&self.subjects_section(ctx));
        html.push_str(&Self::remarks(ctx, LabelKey::TeacherRemarks, &self.teacher_remarks));
        html.push_str(&Self::remarks(ctx, LabelKey::PrincipalRemarks, &self.principal_remarks));
        html.push_str(&ctx.signatures(&[LabelKey::ClassTeacher, LabelKey::Principal]));
        html.push_str(&format!(
            "<div class=\"report-footer\">{}: {} | {}: {}</div>\n",
            ctx.label(LabelKey::GeneratedOn),
            format_date(ctx.today, ctx.lang()),
            ctx.label(LabelKey::ReportId),
            ctx.text(&record.id)
        ));
        html
    }

    fn render(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        format!(
            "<div class=\"report\">\n{}<div class=\"report-title\">{}</div>\n{}</div>\n",
            ctx.header(),
            ctx.label(self.title()),
            self.body(record, ctx)
        )
    }
}
