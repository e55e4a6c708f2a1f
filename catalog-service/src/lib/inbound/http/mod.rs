pub mod handlers;
pub mod hateoas;
pub mod middleware;
pub mod router;
