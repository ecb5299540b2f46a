use std::sync::Arc;

use service::products::{repository::ProductRepository, ProductService};

/// Product store as seen by the transports; the repository is chosen at startup.
pub type Products = ProductService<dyn ProductRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub products: Products,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: ProductService::new(repo) }
    }
}
