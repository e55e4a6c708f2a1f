#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use catalog_service::domain::account::errors::AccountError;
use catalog_service::domain::account::models::Login;
use catalog_service::domain::account::models::StoredCredentials;
use catalog_service::domain::account::ports::CredentialRepository;
use catalog_service::domain::account::service::AccountService;
use catalog_service::domain::category::errors::CategoryError;
use catalog_service::domain::category::models::Category;
use catalog_service::domain::category::models::CategoryId;
use catalog_service::domain::category::ports::CategoryRepository;
use catalog_service::domain::category::service::CategoryService;
use catalog_service::domain::pagination::ListFilter;
use catalog_service::domain::pagination::Page;
use catalog_service::domain::pagination::PageRequest;
use catalog_service::domain::product::errors::ProductError;
use catalog_service::domain::product::models::Product;
use catalog_service::domain::product::models::ProductId;
use catalog_service::domain::product::ports::ProductRepository;
use catalog_service::domain::product::service::ProductService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tokio::sync::RwLock;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(Duration::ZERO, Duration::from_secs(10)).await
    }

    /// Spawn with a delay on every category listing and a custom deadline
    pub async fn spawn_with(list_latency: Duration, request_timeout: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(RwLock::new(CatalogStore::default()));
        let credential_repository = Arc::new(InMemoryCredentialRepository::default());
        let category_repository = Arc::new(InMemoryCategoryRepository {
            store: Arc::clone(&store),
            list_latency,
        });
        let product_repository = Arc::new(InMemoryProductRepository { store });

        let account_service = Arc::new(AccountService::new(
            credential_repository,
            Arc::new(Authenticator::new(JWT_SECRET)),
        ));
        let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repository)));
        let product_service =
            Arc::new(ProductService::new(product_repository, category_repository));

        let state = AppState::new(
            account_service,
            category_service,
            product_service,
            "",
            request_timeout,
        );
        let router = create_router(state, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            authenticator: Authenticator::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register `login` and return the token pair body of a fresh login
    pub async fn register_and_login(&self, login: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({ "login": login, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        self.post("/auth/login")
            .json(&json!({ "login": login, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }

    /// Access token for a freshly registered admin account
    pub async fn admin_token(&self) -> String {
        let pair = self.register_and_login("admin", "password123").await;
        pair["access_token"].as_str().unwrap().to_string()
    }

    /// Create a category through the API and return its id
    pub async fn create_category(&self, token: &str, name: &str, active: bool) -> String {
        let body: Value = self
            .post_authenticated("/admin/categories", token)
            .json(&json!({
                "name": name,
                "description": format!("{} description", name),
                "active": active
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    users: RwLock<HashMap<String, StoredCredentials>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<StoredCredentials>, AccountError> {
        Ok(self.users.read().await.get(login.as_str()).cloned())
    }

    async fn insert(
        &self,
        credentials: StoredCredentials,
    ) -> Result<StoredCredentials, AccountError> {
        let mut users = self.users.write().await;
        if users.contains_key(credentials.login.as_str()) {
            return Err(AccountError::LoginAlreadyExists(
                credentials.login.to_string(),
            ));
        }
        users.insert(credentials.login.to_string(), credentials.clone());
        Ok(credentials)
    }
}

/// Categories and products in insertion order, shared by both repositories
#[derive(Default)]
pub struct CatalogStore {
    categories: Vec<Category>,
    products: Vec<Product>,
}

fn window<T: Clone>(items: Vec<&T>, request: PageRequest) -> Page<T> {
    let total_count = items.len() as i64;
    let items = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, total_count)
}

pub struct InMemoryCategoryRepository {
    store: Arc<RwLock<CatalogStore>>,
    list_latency: Duration,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, CategoryError> {
        let mut store = self.store.write().await;
        if store.categories.iter().any(|c| c.name == category.name) {
            return Err(CategoryError::NameAlreadyExists(category.name));
        }
        store.categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, CategoryError> {
        let store = self.store.read().await;
        Ok(store.categories.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CategoryError> {
        let store = self.store.read().await;
        Ok(store
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Category>, CategoryError> {
        if !self.list_latency.is_zero() {
            tokio::time::sleep(self.list_latency).await;
        }

        let store = self.store.read().await;
        let matching = store
            .categories
            .iter()
            .filter(|c| filter.active.map_or(true, |active| c.active == active))
            .collect();
        Ok(window(matching, request))
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let mut store = self.store.write().await;
        if store
            .categories
            .iter()
            .any(|c| c.name == category.name && c.id != category.id)
        {
            return Err(CategoryError::NameAlreadyExists(category.name));
        }
        let slot = store
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(CategoryError::NotFound(category.id))?;
        *slot = category.clone();
        Ok(category)
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryError> {
        Ok(self.delete_many(std::slice::from_ref(id)).await? > 0)
    }

    async fn delete_many(&self, ids: &[CategoryId]) -> Result<u64, CategoryError> {
        let mut store = self.store.write().await;
        let before = store.categories.len();
        store.categories.retain(|c| !ids.contains(&c.id));
        for product in store.products.iter_mut() {
            product.category_ids.retain(|id| !ids.contains(id));
        }
        Ok((before - store.categories.len()) as u64)
    }
}

pub struct InMemoryProductRepository {
    store: Arc<RwLock<CatalogStore>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.store.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let store = self.store.read().await;
        Ok(store.products.iter().find(|p| p.id == *id).cloned())
    }

    async fn list(
        &self,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let store = self.store.read().await;
        let matching = store
            .products
            .iter()
            .filter(|p| filter.active.map_or(true, |active| p.active == active))
            .collect();
        Ok(window(matching, request))
    }

    async fn list_by_category(
        &self,
        category_id: &CategoryId,
        filter: ListFilter,
        request: PageRequest,
    ) -> Result<Page<Product>, ProductError> {
        let store = self.store.read().await;
        let matching = store
            .products
            .iter()
            .filter(|p| p.category_ids.contains(category_id))
            .filter(|p| filter.active.map_or(true, |active| p.active == active))
            .collect();
        Ok(window(matching, request))
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut store = self.store.write().await;
        let slot = store
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, ProductError> {
        Ok(self.delete_many(std::slice::from_ref(id)).await? > 0)
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, ProductError> {
        let mut store = self.store.write().await;
        let before = store.products.len();
        store.products.retain(|p| !ids.contains(&p.id));
        Ok((before - store.products.len()) as u64)
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name.
    ///
    /// Returns `None` when `DATABASE_URL` is unset so the Postgres suites are
    /// skipped on machines without a server.
    pub async fn new() -> Option<Self> {
        let server_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_catalog_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
