use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;

const COLUMNS: &str = "id, name, description, active, created_at, updated_at";

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_category(r: &PgRow) -> Category {
        Category {
            id: CategoryId(r.get("id")),
            name: r.get("name"),
            description: r.get("description"),
            active: r.get("active"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ListFilter) {
        if let Some(active) = filter.active {
            builder.push(" WHERE active = ").push_bind(active);
        }
    }

    fn map_write_error(e: sqlx::Error, name: &str) -> CategoryError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("categories_name_key") {
                return CategoryError::NameAlreadyExists(name.to_string());
            }
        }
        database_error(e)
    }
}

fn database_error(e: sqlx::Error) -> CategoryError {
    CategoryError::DatabaseError(e.to_string())
}

fn uuids(ids: &[CategoryId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.0).collect()
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.0)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError> {
        let row = sqlx::query(&format!("SELECT {} FROM categories WHERE id = $1", COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.as_ref().map(Self::row_to_category))
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM categories WHERE id = ANY($1) ORDER BY created_at, id",
            COLUMNS
        ))
        .bind(uuids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.iter().map(Self::row_to_category).collect())
    }

    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Category>, CategoryError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories");
        Self::push_filter(&mut count, &filter);
        let total_count: i64 = count
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?
            .get(0);

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM categories", COLUMNS));
        Self::push_filter(&mut select, &filter);
        select
            .push(" ORDER BY created_at, id LIMIT ")
            .push_bind(request.limit())
            .push(" OFFSET ")
            .push_bind(request.offset());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(Page::new(
            rows.iter().map(Self::row_to_category).collect(),
            total_count,
        ))
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, active = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(category.id.0)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.active)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &category.name))?;

        if result.rows_affected() == 0 {
            return Err(CategoryError::NotFound(category.id));
        }

        Ok(category)
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[CategoryId]) -> Result<u64, CategoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(uuids(ids))
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
