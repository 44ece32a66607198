use sqlx::PgConnection;

use crate::pkg::internal::adaptors::submissions::spec::SubmissionEntry;
use crate::prelude::Result;

pub struct SubmissionSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> SubmissionSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        SubmissionSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<SubmissionEntry>> {
        let rows = sqlx::query_as::<_, SubmissionEntry>(
            r#"
            SELECT sl_no, name, email_id, mobile_number, dob, age, location, married, gender,
                   qualification, year, highest_qualification, highest_year, designation,
                   exp_1, exp_designation, exp_from_to, exp_2, exp_3, total_exp,
                   current_ctc, expected_ctc, "ref", remark, resume_url, submission_date
            FROM biodata_master ORDER BY submission_date DESC
            "#,
        )
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }
}
