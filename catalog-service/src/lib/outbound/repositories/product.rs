use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Row;
use sqlx::Transaction;
use uuid::Uuid;

use crate::domain::category::models::CategoryId;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;

// Product columns plus the sorted category ids aggregated from the join table
const SELECT_PRODUCTS: &str = r#"
    SELECT p.id, p.name, p.description, p.price, p.active, p.created_at, p.updated_at,
           COALESCE(
               array_agg(pc.category_id ORDER BY pc.category_id)
                   FILTER (WHERE pc.category_id IS NOT NULL),
               '{}'::uuid[]
           ) AS category_ids
    FROM products p
    LEFT JOIN products_categories pc ON pc.product_id = p.id
"#;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(r: &PgRow) -> Product {
        let category_ids: Vec<Uuid> = r.get("category_ids");

        Product {
            id: ProductId(r.get("id")),
            name: r.get("name"),
            description: r.get("description"),
            price: r.get("price"),
            active: r.get("active"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
            category_ids: category_ids.into_iter().map(CategoryId).collect(),
        }
    }

    /// Appends the WHERE clause shared by the count and page queries.
    fn push_filter(
        builder: &mut QueryBuilder<'_, Postgres>,
        category_id: Option<&CategoryId>,
        filter: &ListFilter,
    ) {
        builder.push(" WHERE TRUE");
        if let Some(category_id) = category_id {
            builder
                .push(" AND p.id IN (SELECT product_id FROM products_categories")
                .push(" WHERE category_id = ")
                .push_bind(category_id.0)
                .push(")");
        }
        if let Some(active) = filter.active {
            builder.push(" AND p.active = ").push_bind(active);
        }
    }

    async fn page(
        &self,
        category_id: Option<&CategoryId>,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        Self::push_filter(&mut count, category_id, &filter);
        let total_count: i64 = count
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?
            .get(0);

        let mut select = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        Self::push_filter(&mut select, category_id, &filter);
        select
            .push(" GROUP BY p.id ORDER BY p.created_at, p.id LIMIT ")
            .push_bind(request.limit())
            .push(" OFFSET ")
            .push_bind(request.offset());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(Page::new(
            rows.iter().map(Self::row_to_product).collect(),
            total_count,
        ))
    }

    async fn link_categories(
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
    ) -> Result<(), ProductError> {
        let category_ids: Vec<Uuid> = product.category_ids.iter().map(|id| id.0).collect();

        sqlx::query(
            r#"
            INSERT INTO products_categories (product_id, category_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(product.id.0)
        .bind(category_ids)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    // A category vanished between the existence check and the write
                    if let Some(first) = product.category_ids.first() {
                        return ProductError::CategoryNotFound(*first);
                    }
                }
            }
            database_error(e)
        })?;

        Ok(())
    }
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        Self::link_categories(&mut tx, &product).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let mut select = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        select
            .push(" WHERE p.id = ")
            .push_bind(id.0)
            .push(" GROUP BY p.id");

        let row = select
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.as_ref().map(Self::row_to_product))
    }

    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        self.page(None, filter, request).await
    }

    async fn list_by_category(
        &self,
        category_id: &CategoryId,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        self.page(Some(category_id), filter, request).await
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, active = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.active)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id));
        }

        sqlx::query("DELETE FROM products_categories WHERE product_id = $1")
            .bind(product.id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        Self::link_categories(&mut tx, &product).await?;

        tx.commit().await.map_err(database_error)?;

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, ProductError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();

        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
