use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::errors::ServiceError;
use service::pagination::{Paginated, PaginationDto};
use service::products::domain::{CreateProduct, Product, UpdateProduct};

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{errors::JsonApiError, observability, state::ServerState};

const TRANSPORT: &str = "http";

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateProductsInput {
    pub ids: Vec<i32>,
}

fn counted<T>(op: &str, res: Result<T, ServiceError>) -> Result<T, JsonApiError> {
    observability::record(op, TRANSPORT, &res, ServiceError::status);
    res.map_err(JsonApiError::from)
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::CreateProductDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    input.validate()?;
    let created = counted("create", state.products.create(input).await)?;
    info!(id = created.id, "created product");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("limit" = Option<u32>, Query, description = "page size, default 10")
    ),
    responses(
        (status = 200, description = "Page of available products", body = crate::openapi::ProductPageDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn find_all(
    State(state): State<ServerState>,
    ApiQuery(pagination): ApiQuery<PaginationDto>,
) -> Result<Json<Paginated<Product>>, JsonApiError> {
    pagination.validate()?;
    let page = counted("find_all", state.products.find_all(pagination).await)?;
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_one(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Product>, JsonApiError> {
    let product = counted("find_one", state.products.find_one(id).await)?;
    Ok(Json(product))
}

#[utoipa::path(
    patch, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::UpdateProductDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateProduct>,
) -> Result<Json<Product>, JsonApiError> {
    input.validate()?;
    let updated = counted("update", state.products.update(id, input).await)?;
    info!(id = updated.id, "updated product");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Soft-deleted product", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Product>, JsonApiError> {
    let removed = counted("remove", state.products.remove(id).await)?;
    info!(id = removed.id, "removed product");
    Ok(Json(removed))
}

#[utoipa::path(
    post, path = "/products/validate", tag = "products",
    request_body = crate::openapi::ValidateProductsDoc,
    responses(
        (status = 200, description = "All ids exist", body = [crate::openapi::ProductDoc]),
        (status = 400, description = "Some products were not found")
    )
)]
pub async fn validate(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ValidateProductsInput>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = counted("validate_products", state.products.validate_products(&input.ids).await)?;
    Ok(Json(products))
}
