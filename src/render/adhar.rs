use super::{CertificateTemplate, RenderContext};
use crate::certificate::model::{AdharExtractDetails, CertificateRecord};
use crate::institution::LabelKey;

impl CertificateTemplate for AdharExtractDetails {
    fn title(&self) -> LabelKey {
        LabelKey::AdharTitle
    }

    fn body(&self, record: &CertificateRecord, ctx: &RenderContext<'_>) -> String {
        let student = [
            (LabelKey::StudentName, ctx.text(&record.student_name)),
            (LabelKey::AdmissionNo, ctx.number(&record.admission_no)),
            (LabelKey::Class, ctx.class_name(&self.class_name)),
            (LabelKey::Section, ctx.text(&self.section)),
            (LabelKey::DateOfBirth, ctx.date_text(&self.date_of_birth)),
            (LabelKey::FatherName, ctx.text(&self.father_name)),
            (LabelKey::MotherName, ctx.text(&self.mother_name)),
            (LabelKey::AdharNumber, ctx.number(&self.adhar_number)),
            (LabelKey::AcademicYear, ctx.number(&self.academic_year)),
        ];
        let guardian = [
            (LabelKey::GuardianName, ctx.text(&self.guardian_name)),
            (LabelKey::GuardianRelationship, ctx.text(&self.guardian_relationship)),
            (LabelKey::ContactNumber, ctx.number(&self.contact_number)),
            (LabelKey::Address, ctx.text(&self.address)),
        ];

        let mut html = format!("<h3>{}</h3>\n<div class=\"info-highlight\">\n", ctx.label(LabelKey::StudentDetails));
        for (key, value) in &student {
            html.push_str(&ctx.row(*key, value));
        }
        html.push_str(&format!(
            "</div>\n<h3>{}</h3>\n<div class=\"info-highlight\">\n",
            ctx.label(LabelKey::GuardianDetails)
        ));
        for (key, value) in &guardian {
            html.push_str(&ctx.row(*key, value));
        }
        html.push_str("</div>\n");

        html.push_str(&ctx.row(LabelKey::Purpose, &ctx.text(&self.purpose)));
        html.push_str(&ctx.row(LabelKey::VerifiedBy, &ctx.text(&self.verified_by)));
        html.push_str(&ctx.signatures(&[LabelKey::VerifiedBy, LabelKey::Principal]));
        html.push_str(&ctx.issue_line(record));
        html
    }
}
