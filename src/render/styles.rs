//! Stylesheets embedded into rendered documents.

pub const CERTIFICATE: &str = r#"
@page { size: A4; margin: 12mm; }
* { box-sizing: border-box; }
body { margin: 0; font-family: 'Noto Sans Bengali', 'Hind Siliguri', 'Segoe UI', sans-serif; color: #1f2937; background: #f3f4f6; }
.certificate-wrapper { padding: 16px; }
.certificate { max-width: 780px; margin: 0 auto; padding: 40px 48px; background: #fff; border: 6px double #1e3a8a; }
.header { text-align: center; border-bottom: 2px solid #1e3a8a; padding-bottom: 12px; margin-bottom: 20px; }
.school-logo { max-height: 72px; margin-bottom: 8px; }
.school-name { margin: 0; font-size: 26px; color: #1e3a8a; }
.school-address, .school-contact { margin: 4px 0 0; font-size: 13px; color: #4b5563; }
.cert-title { text-align: center; font-size: 24px; margin: 8px 0; text-decoration: underline; }
.cert-subtitle { text-align: center; font-size: 15px; margin-bottom: 16px; }
.student-info { text-align: center; margin-bottom: 16px; line-height: 1.8; }
.student-info .student-name { font-size: 20px; font-weight: 700; }
.info-highlight { background: #eff6ff; border-left: 4px solid #1e3a8a; padding: 12px 16px; margin: 16px 0; line-height: 1.9; }
.info-highlight p { margin: 0; }
.body-text { font-size: 15px; line-height: 1.9; text-align: justify; }
.closing-text { margin-top: 20px; font-size: 14px; line-height: 1.8; }
.signature-section { display: flex; justify-content: space-between; margin-top: 56px; gap: 24px; }
.signature-box { flex: 1; text-align: center; }
.signature-line { border-top: 1px solid #374151; padding-top: 6px; font-size: 13px; }
.issue-date { margin-top: 24px; font-size: 13px; color: #4b5563; }
@media print {
  body { background: #fff; }
  .certificate-wrapper { padding: 0; }
  .certificate { border-width: 4px; }
}
"#;

pub const PROGRESS_REPORT: &str = r#"
@page { size: A4; margin: 12mm; }
body { margin: 0; font-family: 'Segoe UI', 'Noto Sans Bengali', sans-serif; color: #111827; }
.report { max-width: 820px; margin: 0 auto; padding: 32px; }
.header { text-align: center; border-bottom: 3px solid #1e3a8a; padding-bottom: 12px; margin-bottom: 20px; }
.school-logo { max-height: 64px; }
.school-name { margin: 0; font-size: 24px; font-weight: 700; color: #1e3a8a; }
.school-address { margin: 4px 0 0; font-size: 13px; color: #4b5563; }
.report-title { margin-top: 8px; font-size: 18px; letter-spacing: 1px; }
.info-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 8px 24px; margin-bottom: 20px; }
.info-item { display: flex; justify-content: space-between; border-bottom: 1px dotted #d1d5db; padding: 4px 0; }
.info-label { font-weight: 600; color: #374151; }
.section-title { margin: 20px 0 10px; color: #1e3a8a; }
.subjects-table { width: 100%; border-collapse: collapse; }
.subjects-table th, .subjects-table td { border: 1px solid #d1d5db; padding: 8px; text-align: center; }
.subjects-table th { background: #1e3a8a; color: #fff; }
.empty-subjects { text-align: center; color: #6b7280; margin: 20px 0; }
.remarks-section { margin-top: 16px; padding: 12px; background: #f9fafb; border-radius: 6px; }
.remarks-label { font-weight: 600; margin-bottom: 4px; }
.signature-section { display: flex; justify-content: space-between; margin-top: 48px; }
.signature-box { width: 40%; text-align: center; }
.signature-line { border-top: 1px solid #374151; margin-bottom: 6px; }
.report-footer { margin-top: 30px; text-align: center; font-size: 12px; color: #6b7280; }
"#;

pub const ID_CARD: &str = r#"
@page { size: 85mm 54mm; margin: 0; }
* { box-sizing: border-box; }
body { margin: 0; font-family: 'Segoe UI', 'Noto Sans Bengali', sans-serif; }
.cards { display: flex; flex-wrap: wrap; gap: 12px; padding: 12px; }
.id-card { width: 85mm; height: 54mm; border: 1px solid #1e3a8a; border-radius: 3mm; overflow: hidden; background: #fff; display: flex; flex-direction: column; page-break-inside: avoid; }
.card-header { display: flex; align-items: center; gap: 2mm; background: #1e3a8a; color: #fff; padding: 1.5mm 2.5mm; }
.card-logo { height: 8mm; width: 8mm; object-fit: contain; background: #fff; border-radius: 50%; }
.card-school { font-size: 9pt; font-weight: 700; line-height: 1.1; }
.card-type { font-size: 6.5pt; opacity: 0.9; }
.card-body { display: flex; gap: 2.5mm; padding: 2mm 2.5mm; flex: 1; }
.card-photo { width: 18mm; height: 22mm; border: 1px solid #d1d5db; object-fit: cover; display: flex; align-items: center; justify-content: center; font-size: 6pt; color: #9ca3af; }
.card-details { font-size: 6.5pt; line-height: 1.35; }
.card-name { font-size: 8.5pt; font-weight: 700; margin-bottom: 0.5mm; }
.card-footer { display: flex; justify-content: space-between; font-size: 6pt; padding: 1mm 2.5mm; border-top: 1px solid #e5e7eb; }
@media screen { .id-card { box-shadow: 0 1px 4px rgba(0, 0, 0, 0.15); } }
@media print { .cards { padding: 0; gap: 0; } .id-card { page-break-after: always; border-radius: 0; } }
"#;
