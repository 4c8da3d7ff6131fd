//! REST surface of the team membership module.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;

pub use auth::{AuthCaller, Claims, JwtValidator};
pub use problem::Problem;
pub use routes::register_routes;
