mod error;
mod provision_handler;
mod server;

pub use error::domain_error_to_response;
pub use provision_handler::router;
pub use server::{run_provision_http_server, serve, HttpServerConfig};
