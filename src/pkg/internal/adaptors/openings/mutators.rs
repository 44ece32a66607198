use sqlx::PgConnection;

use crate::pkg::internal::adaptors::openings::spec::OpeningEntry;
use crate::pkg::server::handlers::admin::{CreateJobInput, PatchJobInput};
use crate::prelude::Result;

pub struct OpeningMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> OpeningMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        OpeningMutator { pool }
    }

    pub async fn create(&mut self, job: &CreateJobInput) -> Result<OpeningEntry> {
        let row = sqlx::query_as::<_, OpeningEntry>(
            r#"
            INSERT INTO job_master (company, location, timing, posted, salary_band, email, mobile, qualification, target)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING sl_no, company, location, timing, posted, salary_band, email, mobile, qualification, target, created_at
            "#,
        )
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.timing)
        .bind(&job.posted)
        .bind(&job.salary_band)
        .bind(&job.email)
        .bind(&job.mobile)
        .bind(&job.qualification)
        .bind(&job.target)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, job: PatchJobInput) -> Result<Option<OpeningEntry>> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_count = 1;

        if job.company.is_some() {
            param_count += 1;
            sets.push(format!("company = ${}", param_count));
        }
        if job.location.is_some() {
            param_count += 1;
            sets.push(format!("location = ${}", param_count));
        }
        if job.timing.is_some() {
            param_count += 1;
            sets.push(format!("timing = ${}", param_count));
        }
        if job.posted.is_some() {
            param_count += 1;
            sets.push(format!("posted = ${}", param_count));
        }
        if job.salary_band.is_some() {
            param_count += 1;
            sets.push(format!("salary_band = ${}", param_count));
        }
        if job.email.is_some() {
            param_count += 1;
            sets.push(format!("email = ${}", param_count));
        }
        if job.mobile.is_some() {
            param_count += 1;
            sets.push(format!("mobile = ${}", param_count));
        }
        if job.qualification.is_some() {
            param_count += 1;
            sets.push(format!("qualification = ${}", param_count));
        }
        if job.target.is_some() {
            param_count += 1;
            sets.push(format!("target = ${}", param_count));
        }

        if sets.is_empty() {
            let row = sqlx::query_as::<_, OpeningEntry>(
                "SELECT sl_no, company, location, timing, posted, salary_band, email, mobile, qualification, target, created_at
                 FROM job_master WHERE sl_no = $1",
            )
            .bind(id)
            .fetch_optional(&mut *self.pool)
            .await?;
            return Ok(row);
        }

        let query = format!(
            "UPDATE job_master SET {} WHERE sl_no = $1 RETURNING sl_no, company, location, timing, posted, salary_band, email, mobile, qualification, target, created_at",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, OpeningEntry>(&query).bind(id);

        if let Some(company) = job.company {
            q = q.bind(company);
        }
        if let Some(location) = job.location {
            q = q.bind(location);
        }
        if let Some(timing) = job.timing {
            q = q.bind(timing);
        }
        if let Some(posted) = job.posted {
            q = q.bind(posted);
        }
        if let Some(salary_band) = job.salary_band {
            q = q.bind(salary_band);
        }
        if let Some(email) = job.email {
            q = q.bind(email);
        }
        if let Some(mobile) = job.mobile {
            q = q.bind(mobile);
        }
        if let Some(qualification) = job.qualification {
            q = q.bind(qualification);
        }
        if let Some(target) = job.target {
            q = q.bind(target);
        }
        let row = q.fetch_optional(&mut *self.pool).await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_master WHERE sl_no = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
