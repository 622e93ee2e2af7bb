//! HTTP handlers for Products API

use axum::{Router, extract::State, routing::get};
use axum_helpers::{ApiResponse, JsonBody, MessageResponse, ResponseStatus, UuidPath};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use utoipa::OpenApi;

use crate::audit::AuditContext;
use crate::error::ProductResult;
use crate::models::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ResponseStatus,
            MessageResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Token cancelled when the handler future is dropped, e.g. on client disconnect.
fn request_token() -> (CancellationToken, tokio_util::sync::DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, oldest first", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Unexpected failure", body = MessageResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<ApiResponse<Vec<ProductResponse>>> {
    let (cancel, _guard) = request_token();
    service.list_products(&cancel).await
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProductRequest,
    params(
        ("x-user-name" = Option<String>, Header, description = "User recorded in the audit columns")
    ),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid product fields or malformed JSON", body = MessageResponse),
        (status = 409, description = "Name already in use", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    audit: AuditContext,
    JsonBody(input): JsonBody<CreateProductRequest>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let (cancel, _guard) = request_token();
    service.create_product(input, &audit, &cancel).await
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid UUID", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let (cancel, _guard) = request_token();
    service.get_product(id, &cancel).await
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("x-user-name" = Option<String>, Header, description = "User recorded in the audit columns")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid UUID, product fields or JSON", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 409, description = "Name already in use", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    audit: AuditContext,
    JsonBody(input): JsonBody<UpdateProductRequest>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let (cancel, _guard) = request_token();
    service.update_product(id, input, &audit, &cancel).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Invalid UUID", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    audit: AuditContext,
) -> ProductResult<ApiResponse<()>> {
    let (cancel, _guard) = request_token();
    service.delete_product(id, &audit, &cancel).await
}
