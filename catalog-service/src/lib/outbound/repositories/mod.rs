pub mod category;
pub mod credentials;
pub mod product;

pub use category::PostgresCategoryRepository;
pub use credentials::PostgresCredentialRepository;
pub use product::PostgresProductRepository;
