use super::models::{Company, CompanyChanges, CompanyFilter, NewCompany};
use crate::common::ApiError;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

const COMPANY_COLUMNS: &str = "c.id, c.name, c.image, c.type, c.country, c.url, c.employee_count";

pub struct CompaniesService {
    db: SqlitePool,
}

impl CompaniesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    // ============================================================================
    // Company CRUD Operations
    // ============================================================================

    /// List companies matching `filter`, oldest first
    pub async fn list_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ApiError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM companies c WHERE 1=1",
            COMPANY_COLUMNS
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY c.id ASC");

        let companies = builder
            .build_query_as::<Company>()
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        debug!(count = companies.len(), ?filter, "Listed companies");

        Ok(companies)
    }

    /// Get company by ID
    pub async fn get_company_by_id(&self, company_id: i64) -> Result<Company, ApiError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies c WHERE c.id = ?",
            COMPANY_COLUMNS
        ))
        .bind(company_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

        Ok(company)
    }

    /// Create a new company
    pub async fn create_company(&self, company: NewCompany) -> Result<Company, ApiError> {
        let result = sqlx::query(
            r#"
            INSERT INTO companies (name, image, type, country, url, employee_count)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.name)
        .bind(&company.image)
        .bind(company.company_type)
        .bind(&company.country)
        .bind(&company.url)
        .bind(company.employee_count)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let company_id = result.last_insert_rowid();
        info!(company_id, name = %company.name, "Created company");

        self.get_company_by_id(company_id).await
    }

    /// Apply `changes` in a single statement; untouched columns keep their values
    pub async fn update_company(
        &self,
        company_id: i64,
        changes: CompanyChanges,
    ) -> Result<Company, ApiError> {
        if changes.is_empty() {
            return self.get_company_by_id(company_id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE companies SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(name) = changes.name {
                assignments.push("name = ").push_bind_unseparated(name);
            }
            if let Some(image) = changes.image {
                assignments.push("image = ").push_bind_unseparated(image);
            }
            if let Some(company_type) = changes.company_type {
                assignments.push("type = ").push_bind_unseparated(company_type);
            }
            if let Some(country) = changes.country {
                assignments.push("country = ").push_bind_unseparated(country);
            }
            if let Some(url) = changes.url {
                assignments.push("url = ").push_bind_unseparated(url);
            }
            if let Some(employee_count) = changes.employee_count {
                assignments
                    .push("employee_count = ")
                    .push_bind_unseparated(employee_count);
            }
        }
        builder.push(" WHERE id = ").push_bind(company_id);

        let result = builder
            .build()
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Company not found".to_string()));
        }

        info!(company_id, "Updated company");

        self.get_company_by_id(company_id).await
    }

    /// Delete a company together with its follow relations
    pub async fn delete_company(&self, company_id: i64) -> Result<(), ApiError> {
        let mut tx = self.db.begin().await.map_err(ApiError::DatabaseError)?;

        sqlx::query("DELETE FROM company_likes WHERE company_id = ?")
            .bind(company_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        let result = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(company_id)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(ApiError::NotFound("Company not found".to_string()));
        }

        tx.commit().await.map_err(ApiError::DatabaseError)?;

        info!(company_id, "Deleted company");

        Ok(())
    }

    // ============================================================================
    // Follow Relation
    // ============================================================================

    pub async fn is_following(&self, company_id: i64, user_id: &str) -> Result<bool, ApiError> {
        self.get_company_by_id(company_id).await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT company_id FROM company_likes WHERE company_id = ? AND user_id = ?",
        )
        .bind(company_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(existing.is_some())
    }

    /// Idempotent: following twice leaves a single relation
    pub async fn follow_company(&self, company_id: i64, user_id: &str) -> Result<(), ApiError> {
        self.get_company_by_id(company_id).await?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO company_likes (company_id, user_id) VALUES (?, ?)",
        )
        .bind(company_id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() > 0 {
            info!(company_id, user_id = %user_id, "Company followed");
        } else {
            debug!(company_id, user_id = %user_id, "Company already followed");
        }

        Ok(())
    }

    /// Idempotent: unfollowing a company that isn't followed still succeeds
    pub async fn unfollow_company(&self, company_id: i64, user_id: &str) -> Result<(), ApiError> {
        self.get_company_by_id(company_id).await?;

        let result = sqlx::query("DELETE FROM company_likes WHERE company_id = ? AND user_id = ?")
            .bind(company_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() > 0 {
            info!(company_id, user_id = %user_id, "Company unfollowed");
        }

        Ok(())
    }

    /// Companies followed by `user_id`, narrowed by `filter`
    pub async fn list_followed_companies(
        &self,
        user_id: &str,
        filter: &CompanyFilter,
    ) -> Result<Vec<Company>, ApiError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM companies c \
             JOIN company_likes l ON l.company_id = c.id \
             WHERE l.user_id = ",
            COMPANY_COLUMNS
        ));
        builder.push_bind(user_id);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY c.id ASC");

        let companies = builder
            .build_query_as::<Company>()
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        debug!(
            user_id = %user_id,
            count = companies.len(),
            "Listed followed companies"
        );

        Ok(companies)
    }
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a CompanyFilter) {
    if let Some(company_type) = filter.company_type {
        builder.push(" AND c.type = ").push_bind(company_type);
    }
    if let Some(country) = &filter.country {
        builder.push(" AND c.country = ").push_bind(country);
    }
    if let Some(min) = filter.min_employee {
        builder.push(" AND c.employee_count >= ").push_bind(min);
    }
    if let Some(max) = filter.max_employee {
        builder.push(" AND c.employee_count <= ").push_bind(max);
    }
}
