//! UI and template strings in English (schools) and Bengali (madrasahs).

use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};

use super::mode::Lang;

macro_rules! label_keys {
    ($($variant:ident => $key:literal, $en:literal, $bn:literal;)+) => {
        /// A fixed UI or template string.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum LabelKey {
            $($variant,)+
        }

        impl LabelKey {
            pub const ALL: &'static [LabelKey] = &[$(LabelKey::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(LabelKey::$variant => $key,)+
                }
            }
        }

        const TABLE: &[(LabelKey, &str, &str)] = &[$((LabelKey::$variant, $en, $bn),)+];
    };
}

label_keys! {
    CertificatesTitle => "certificates_title", "Certificates", "সনদপত্র ব্যবস্থাপনা";
    CertificatesSubtitle => "certificates_subtitle", "Generate and manage student certificates", "শিক্ষার্থীদের সনদপত্র তৈরি ও পরিচালনা করুন";
    TotalIssued => "total_issued", "Total Issued", "মোট প্রদত্ত";
    Pending => "pending", "Pending", "অপেক্ষমাণ";
    TabAppreciation => "tab_appreciation", "Appreciation", "প্রশংসাপত্র";
    TabCharacter => "tab_character", "Character", "চরিত্র সনদ";
    TabTransfer => "tab_transfer", "Transfer", "ছাড়পত্র";
    TabCourse => "tab_course", "Course", "কোর্স সনদ";
    TabProgress => "tab_progress", "Progress", "অগ্রগতি প্রতিবেদন";
    TabAdhar => "tab_adhar", "Adhar", "আধার";
    TabBonafide => "tab_bonafide", "Bonafide", "বোনাফাইড";
    TabIdCards => "tab_id_cards", "ID Cards", "আইডি কার্ড";
    StatusAll => "status_all", "All Status", "সব অবস্থা";
    StatusDraft => "status_draft", "Draft", "খসড়া";
    StatusPendingApproval => "status_pending_approval", "Pending Approval", "অনুমোদনের অপেক্ষায়";
    StatusIssued => "status_issued", "Issued", "প্রদান করা হয়েছে";
    StatusCancelled => "status_cancelled", "Cancelled", "বাতিল";
    SaveDraft => "save_draft", "Save as Draft", "খসড়া সংরক্ষণ";
    SubmitForApproval => "submit_for_approval", "Submit for Approval", "অনুমোদনের জন্য জমা দিন";
    IssueCertificate => "issue_certificate", "Issue Certificate", "সনদ প্রদান করুন";
    ResetForm => "reset_form", "Reset", "রিসেট";
    BackToList => "back_to_list", "Back to List", "তালিকায় ফিরুন";
    SelectStudent => "select_student", "Select Student", "শিক্ষার্থী নির্বাচন করুন";
    SearchPlaceholder => "search_placeholder", "Search by name or admission number", "নাম বা ভর্তি নং দিয়ে খুঁজুন";
    Print => "print", "Print", "প্রিন্ট";
    Download => "download", "Download", "ডাউনলোড";
    StudentName => "student_name", "Student Name", "শিক্ষার্থীর নাম";
    AdmissionNo => "admission_no", "Admission No", "ভর্তি নং";
    Class => "class", "Class", "শ্রেণি";
    Section => "section", "Section", "শাখা";
    FatherName => "father_name", "Father's Name", "পিতার নাম";
    MotherName => "mother_name", "Mother's Name", "মাতার নাম";
    AcademicYear => "academic_year", "Academic Year", "শিক্ষাবর্ষ";
    Purpose => "purpose", "Purpose", "উদ্দেশ্য";
    DateOfAdmission => "date_of_admission", "Date of Admission", "ভর্তির তারিখ";
    DateOfLeaving => "date_of_leaving", "Date of Leaving", "ছাড়ার তারিখ";
    ReasonForLeaving => "reason_for_leaving", "Reason for Leaving", "ছাড়ার কারণ";
    ConductAndCharacter => "conduct_and_character", "Conduct & Character", "আচরণ ও চরিত্র";
    Satisfactory => "satisfactory", "Satisfactory", "সন্তোষজনক";
    IssueDate => "issue_date", "Issue Date", "ইস্যু তারিখ";
    CertifyThat => "certify_that", "This is to certify that", "এই মর্মে প্রত্যয়ন করা যাচ্ছে যে,";
    TransferTitle => "transfer_title", "Transfer Certificate", "ছাড়পত্র";
    TransferClosing => "transfer_closing", "We wish the student every success in future endeavours.", "আমরা তার ভবিষ্যৎ জীবনের সর্বাঙ্গীণ সাফল্য কামনা করি।";
    CourseTitle => "course_title", "Course Completion Certificate", "কোর্স সমাপনী সনদ";
    CourseBody => "course_body", "has successfully completed the course", "সফলভাবে নিম্নোক্ত কোর্সটি সম্পন্ন করেছে";
    CourseName => "course_name", "Course", "কোর্স";
    CompletionDate => "completion_date", "Completion Date", "সমাপনের তারিখ";
    Grade => "grade", "Grade", "গ্রেড";
    Credits => "credits", "Credits", "ক্রেডিট";
    Instructor => "instructor", "Instructor", "প্রশিক্ষক";
    Duration => "duration", "Duration", "মেয়াদ";
    ProgressTitle => "progress_title", "Student Progress Report", "শিক্ষার্থীর অগ্রগতি প্রতিবেদন";
    Term => "term", "Term", "সাময়িক";
    OverallGrade => "overall_grade", "Overall Grade", "সামগ্রিক গ্রেড";
    Attendance => "attendance", "Attendance", "উপস্থিতি";
    SubjectPerformance => "subject_performance", "Subject Performance", "বিষয়ভিত্তিক ফলাফল";
    Subject => "subject", "Subject", "বিষয়";
    MarksObtained => "marks_obtained", "Marks Obtained", "প্রাপ্ত নম্বর";
    TotalMarks => "total_marks", "Total Marks", "পূর্ণ নম্বর";
    Remarks => "remarks", "Remarks", "মন্তব্য";
    NoSubjects => "no_subjects", "No subject details available", "বিষয়ভিত্তিক তথ্য পাওয়া যায়নি";
    TeacherRemarks => "teacher_remarks", "Class Teacher's Remarks", "শ্রেণি শিক্ষকের মন্তব্য";
    PrincipalRemarks => "principal_remarks", "Principal's Remarks", "প্রধান শিক্ষকের মন্তব্য";
    GeneratedOn => "generated_on", "Generated on", "তৈরির তারিখ";
    ReportId => "report_id", "Report ID", "প্রতিবেদন নং";
    ClassTeacher => "class_teacher", "Class Teacher", "শ্রেণি শিক্ষক";
    Principal => "principal", "Principal", "প্রধান শিক্ষক";
    Director => "director", "Director", "মোহতামিম";
    BonafideTitle => "bonafide_title", "Bonafide Certificate", "প্রত্যয়নপত্র";
    BonafideBody => "bonafide_body", "is a bonafide student of this institution", "এই প্রতিষ্ঠানের একজন নিয়মিত শিক্ষার্থী";
    BonafidePurpose => "bonafide_purpose", "This certificate is issued for the purpose of", "এই প্রত্যয়নপত্রটি নিম্নোক্ত উদ্দেশ্যে প্রদান করা হলো";
    AdharTitle => "adhar_title", "Adhar Card Extract", "আধার কার্ড উদ্ধৃতি";
    AdharNumber => "adhar_number", "Adhar Number", "আধার নম্বর";
    GuardianName => "guardian_name", "Guardian Name", "অভিভাবকের নাম";
    GuardianRelationship => "guardian_relationship", "Relationship", "সম্পর্ক";
    ContactNumber => "contact_number", "Contact Number", "যোগাযোগ নম্বর";
    Address => "address", "Address", "ঠিকানা";
    DateOfBirth => "date_of_birth", "Date of Birth", "জন্ম তারিখ";
    VerifiedBy => "verified_by", "Verified By", "যাচাইকারী";
    StudentDetails => "student_details", "Student Details", "শিক্ষার্থীর তথ্য";
    GuardianDetails => "guardian_details", "Guardian Details", "অভিভাবকের তথ্য";
    AppreciationTitle => "appreciation_title", "Certificate of Appreciation", "প্রশংসাপত্র";
    AppreciationBody => "appreciation_body", "is hereby appreciated for", "কে নিম্নোক্ত কৃতিত্বের জন্য প্রশংসাপত্র প্রদান করা হলো";
    Achievement => "achievement", "Achievement", "কৃতিত্ব";
    CharacterTitle => "character_title", "Character Certificate", "চরিত্র সনদ";
    CharacterBody => "character_body", "To the best of our knowledge, the student's conduct and character have been", "আমাদের জানামতে তার আচার-আচরণ ও চরিত্র";
    CharacterClosing => "character_closing", "The student has not been involved in any activity against the discipline of this institution.", "সে এই প্রতিষ্ঠানের শৃঙ্খলা পরিপন্থী কোনো কাজে জড়িত ছিল না।";
    ConductRating => "conduct_rating", "Character Assessment", "চরিত্র মূল্যায়ন";
    ConductExcellent => "conduct_excellent", "Excellent", "অতি উত্তম";
    ConductVeryGood => "conduct_very_good", "Very Good", "উত্তম";
    ConductGood => "conduct_good", "Good", "ভালো";
    ConductAverage => "conduct_average", "Average", "মধ্যম";
    StudentIdCard => "student_id_card", "Student ID Card", "শিক্ষার্থী পরিচয়পত্র";
    StaffIdCard => "staff_id_card", "Staff ID Card", "কর্মী পরিচয়পত্র";
    EmployeeId => "employee_id", "Employee ID", "কর্মী আইডি";
    Department => "department", "Department", "বিভাগ";
    Designation => "designation", "Designation", "পদবি";
    Phone => "phone", "Phone", "ফোন";
    RollNo => "roll_no", "Roll No", "রোল নং";
    BloodGroup => "blood_group", "Blood Group", "রক্তের গ্রুপ";
    EmergencyContact => "emergency_contact", "Emergency", "জরুরি যোগাযোগ";
    JoinDate => "join_date", "Joined", "যোগদান";
    CardNumber => "card_number", "Card No", "কার্ড নং";
    CardIssued => "card_issued", "Issued", "ইস্যু";
    Photo => "photo", "PHOTO", "ছবি";
    InstitutionNameFallback => "institution_name_fallback", "Institution Name", "প্রতিষ্ঠানের নাম";
    NotAvailable => "not_available", "N/A", "প্রযোজ্য নয়";
}

lazy_static! {
    static ref ENGLISH: HashMap<LabelKey, &'static str> =
        TABLE.iter().map(|(key, en, _)| (*key, *en)).collect();
    static ref BENGALI: HashMap<LabelKey, &'static str> =
        TABLE.iter().map(|(key, _, bn)| (*key, *bn)).collect();
}

/// The label dictionary of one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    lang: Lang,
}

impl Labels {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    fn dictionary(&self) -> &'static HashMap<LabelKey, &'static str> {
        match self.lang {
            Lang::En => &ENGLISH,
            Lang::Bn => &BENGALI,
        }
    }

    pub fn get(&self, key: LabelKey) -> &'static str {
        self.dictionary().get(&key).copied().unwrap_or("")
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, &'static str> {
        LabelKey::ALL
            .iter()
            .map(|key| (key.as_str(), self.get(*key)))
            .collect()
    }
}
