use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct CreateProductDoc { pub name: String, pub price: f64 }

#[derive(ToSchema)]
pub struct UpdateProductDoc {
    /// ignored; the path id is used
    pub id: Option<i32>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// `totalPages` is the number of available products, `lastPage` the number of pages.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PageMetaDoc { pub total_pages: u64, pub page: u64, pub last_page: u64 }

#[derive(ToSchema)]
pub struct ProductPageDoc { pub data: Vec<ProductDoc>, pub meta: PageMetaDoc }

#[derive(ToSchema)]
pub struct ValidateProductsDoc { pub ids: Vec<i32> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::create,
        crate::routes::products::find_all,
        crate::routes::products::find_one,
        crate::routes::products::update,
        crate::routes::products::remove,
        crate::routes::products::validate,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            CreateProductDoc,
            UpdateProductDoc,
            PageMetaDoc,
            ProductPageDoc,
            ValidateProductsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
