pub mod routes;
pub mod services;

pub use routes::build_router;
pub use services::build_state;
