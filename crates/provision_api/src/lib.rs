pub mod domain;
pub mod http;
pub mod provision_api;

pub use domain::*;
pub use http::*;
pub use provision_api::*;
