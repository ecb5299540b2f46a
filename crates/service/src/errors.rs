use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn product_not_found(id: i32) -> Self { Self::NotFound(format!("Product with id #{} not found", id)) }

    /// HTTP-style status code shared by the HTTP and RPC transports.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::InvalidArgument(_) | ServiceError::Validation(_) => 400,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 400,
            ServiceError::Db(_) | ServiceError::Model(_) => 500,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn status_codes() {
        assert_eq!(ServiceError::product_not_found(3).status(), 404);
        assert_eq!(ServiceError::InvalidArgument("x".into()).status(), 400);
        assert_eq!(ServiceError::Validation("x".into()).status(), 400);
        assert_eq!(ServiceError::Model(ModelError::Validation("x".into())).status(), 400);
        assert_eq!(ServiceError::Model(ModelError::Db("x".into())).status(), 500);
        assert_eq!(ServiceError::Db("x".into()).status(), 500);
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(ServiceError::product_not_found(42).to_string(), "Product with id #42 not found");
    }
}
