use sqlx::PgConnection;

use crate::pkg::internal::adaptors::openings::spec::{CompanyEntry, OpeningEntry};
use crate::prelude::Result;

pub struct OpeningSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> OpeningSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        OpeningSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<OpeningEntry>> {
        let row = sqlx::query_as::<_, OpeningEntry>(
            "SELECT sl_no, company, location, timing, posted, salary_band, email, mobile, qualification, target, created_at
             FROM job_master WHERE sl_no = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<OpeningEntry>> {
        let rows = sqlx::query_as::<_, OpeningEntry>(
            "SELECT sl_no, company, location, timing, posted, salary_band, email, mobile, qualification, target, created_at
             FROM job_master ORDER BY created_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_companies(&mut self) -> Result<Vec<CompanyEntry>> {
        let rows = sqlx::query_as::<_, CompanyEntry>(
            "SELECT company FROM job_master ORDER BY created_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
