pub mod errors;
pub mod extract;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod rpc;
pub mod startup;
pub mod state;

pub use startup::run;
