//! Service layer holding the catalog business rules.
//! - Soft-delete visibility, pagination and bulk id validation live here.
//! - Persistence is reached only through `products::repository::ProductRepository`.
//! - Errors are transport-neutral; callers map `ServiceError` to their wire format.

pub mod errors;
pub mod pagination;
pub mod products;
#[cfg(test)]
pub mod test_support;
