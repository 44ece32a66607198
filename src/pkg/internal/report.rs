use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::pkg::internal::adaptors::submissions::spec::SubmissionEntry;
use crate::prelude::Result;

pub const REPORT_FILE_NAME: &str = "Master.xlsx";
pub const REPORT_SHEET_NAME: &str = "Biodata Master";

/// Header row of the master sheet. Kept verbatim from the spreadsheet this
/// registry replaced, repeated labels included, downstream tooling matches
/// on these strings.
pub const REPORT_HEADERS: [&str; 26] = [
    "Sl No",
    "Name",
    "Mobile Number",
    "email id",
    "Designation",
    "Qualification",
    "Year",
    "Highest qualification",
    "Year",
    "DOB",
    "Age",
    "Location",
    "Married",
    "M/F",
    "EXP-1",
    "Designation",
    "From to",
    "EXP-2",
    "EXP-3",
    "total exp",
    "Current CTC",
    "Expected ctc",
    "Ref",
    "Remark",
    "Resume URL",
    "Submission Date",
];

/// Renders the registry into a single-sheet workbook. Entries land in the
/// order given, serial numbers restart from 1.
pub fn build_report(entries: &[SubmissionEntry]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE0E0E0));
    for (col, title) in REPORT_HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, 15)?;
    }

    for (idx, entry) in entries.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_number(row, 0, (idx + 1) as f64)?;
        worksheet.write_string(row, 1, &entry.name)?;
        worksheet.write_string(row, 2, &entry.mobile_number)?;
        worksheet.write_string(row, 3, &entry.email_id)?;
        write_opt_string(worksheet, row, 4, &entry.designation)?;
        worksheet.write_string(row, 5, &entry.qualification)?;
        worksheet.write_number(row, 6, entry.year)?;
        write_opt_string(worksheet, row, 7, &entry.highest_qualification)?;
        write_opt_number(worksheet, row, 8, entry.highest_year.map(f64::from))?;
        if let Some(dob) = entry.dob {
            worksheet.write_string(row, 9, short_date(&dob))?;
        }
        write_opt_number(worksheet, row, 10, entry.age.map(f64::from))?;
        write_opt_string(worksheet, row, 11, &entry.location)?;
        write_opt_string(worksheet, row, 12, &entry.married)?;
        write_opt_string(worksheet, row, 13, &entry.gender)?;
        write_opt_string(worksheet, row, 14, &entry.exp_1)?;
        write_opt_string(worksheet, row, 15, &entry.exp_designation)?;
        write_opt_string(worksheet, row, 16, &entry.exp_from_to)?;
        write_opt_string(worksheet, row, 17, &entry.exp_2)?;
        write_opt_string(worksheet, row, 18, &entry.exp_3)?;
        write_opt_number(worksheet, row, 19, entry.total_exp)?;
        write_opt_number(worksheet, row, 20, entry.current_ctc)?;
        write_opt_number(worksheet, row, 21, entry.expected_ctc)?;
        write_opt_string(worksheet, row, 22, &entry.reference)?;
        write_opt_string(worksheet, row, 23, &entry.remark)?;
        write_opt_string(worksheet, row, 24, &entry.resume_url)?;
        worksheet.write_string(row, 25, short_date(&entry.submission_date.date_naive()))?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_opt_string(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Option<String>,
) -> Result<()> {
    if let Some(v) = value {
        worksheet.write_string(row, col, v)?;
    }
    Ok(())
}

fn write_opt_number(worksheet: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        worksheet.write_number(row, col, v)?;
    }
    Ok(())
}

fn short_date(date: &NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry() -> SubmissionEntry {
        SubmissionEntry {
            sl_no: 7,
            name: "Asha".into(),
            email_id: "asha@example.com".into(),
            mobile_number: "+919812345678".into(),
            dob: NaiveDate::from_ymd_opt(2001, 1, 5),
            age: Some(25),
            location: Some("Pune".into()),
            married: Some("No".into()),
            gender: Some("F".into()),
            qualification: "BSc".into(),
            year: 2022,
            highest_qualification: Some("MSc".into()),
            highest_year: Some(2024),
            designation: None,
            exp_1: None,
            exp_designation: None,
            exp_from_to: None,
            exp_2: None,
            exp_3: None,
            total_exp: Some(1.5),
            current_ctc: None,
            expected_ctc: Some(4.2),
            reference: None,
            remark: None,
            resume_url: Some("http://localhost:9000/resumes/asha@example.com_1.pdf".into()),
            submission_date: Utc.with_ymd_and_hms(2026, 8, 22, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn headers_match_the_master_sheet() {
        assert_eq!(REPORT_HEADERS.len(), 26);
        assert_eq!(REPORT_HEADERS[0], "Sl No");
        assert_eq!(REPORT_HEADERS[3], "email id");
        //the sheet repeats Year and Designation on purpose
        assert_eq!(REPORT_HEADERS[6], REPORT_HEADERS[8]);
        assert_eq!(REPORT_HEADERS[4], REPORT_HEADERS[15]);
        assert_eq!(REPORT_HEADERS[13], "M/F");
        assert_eq!(REPORT_HEADERS[25], "Submission Date");
    }

    #[test]
    fn dates_render_without_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(short_date(&date), "1/5/2024");
        let date = NaiveDate::from_ymd_opt(2026, 11, 30).unwrap();
        assert_eq!(short_date(&date), "11/30/2026");
    }

    #[test]
    fn empty_registry_still_produces_a_workbook() {
        let buf = build_report(&[]).unwrap();
        assert!(buf.starts_with(b"PK"));
    }

    #[test]
    fn entries_produce_a_workbook() {
        let buf = build_report(&[entry(), entry()]).unwrap();
        assert!(buf.starts_with(b"PK"));
        assert!(buf.len() > 1000);
    }
}
