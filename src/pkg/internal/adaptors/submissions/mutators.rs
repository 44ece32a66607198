use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::submissions::spec::SubmissionEntry;
use crate::pkg::server::handlers::submissions::SubmissionForm;
use crate::prelude::Result;

pub struct SubmissionMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SubmissionMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SubmissionMutator { pool }
    }

    pub async fn create(
        &mut self,
        form: &SubmissionForm,
        resume_url: Option<&str>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionEntry> {
        let row = sqlx::query_as::<_, SubmissionEntry>(
            r#"
            INSERT INTO biodata_master (
                name, email_id, mobile_number, dob, age, location, married, gender,
                qualification, year, highest_qualification, highest_year, designation,
                exp_1, exp_designation, exp_from_to, exp_2, exp_3, total_exp,
                current_ctc, expected_ctc, "ref", remark, resume_url, submission_date
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25
            )
            RETURNING sl_no, name, email_id, mobile_number, dob, age, location, married, gender,
                      qualification, year, highest_qualification, highest_year, designation,
                      exp_1, exp_designation, exp_from_to, exp_2, exp_3, total_exp,
                      current_ctc, expected_ctc, "ref", remark, resume_url, submission_date
            "#,
        )
        .bind(&form.name)
        .bind(&form.email_id)
        .bind(&form.mobile_number)
        .bind(form.dob)
        .bind(form.age)
        .bind(&form.location)
        .bind(&form.married)
        .bind(&form.gender)
        .bind(&form.qualification)
        .bind(form.year)
        .bind(&form.highest_qualification)
        .bind(form.highest_year)
        .bind(&form.designation)
        .bind(&form.exp_1)
        .bind(&form.exp_designation)
        .bind(&form.exp_from_to)
        .bind(&form.exp_2)
        .bind(&form.exp_3)
        .bind(form.total_exp)
        .bind(form.current_ctc)
        .bind(form.expected_ctc)
        .bind(&form.reference)
        .bind(&form.remark)
        .bind(resume_url)
        .bind(submitted_at)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
