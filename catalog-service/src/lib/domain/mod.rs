pub mod account;
pub mod category;
pub mod pagination;
pub mod product;
