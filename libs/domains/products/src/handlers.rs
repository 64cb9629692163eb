use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::ProductResult;
use crate::models::{
    BrandResponse, CategoryResponse, CreateProduct, OutOfStockResponse, ProductDetail,
    ProductListResponse, ProductSummary, ReduceStockRequest, ReduceStockResponse, SearchResponse,
    UpdateProduct, summaries,
};
use crate::pagination::PaginationMeta;
use crate::query::{ListParams, ProductOrder, SearchParams};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        update_product,
        delete_product,
        search_products,
        products_by_category,
        products_by_brand,
        out_of_stock_products,
        reduce_stock,
    ),
    components(
        schemas(
            ProductSummary,
            ProductDetail,
            CreateProduct,
            UpdateProduct,
            ReduceStockRequest,
            ProductListResponse,
            PaginationMeta,
            ProductOrder,
            SearchResponse,
            CategoryResponse,
            BrandResponse,
            OutOfStockResponse,
            ReduceStockResponse,
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/sin-stock", get(out_of_stock_products))
        .route("/category/{category}", get(products_by_category))
        .route("/brand/{brand}", get(products_by_brand))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/{id}/reducir-stock", post(reduce_stock))
        .with_state(shared_service)
}

/// List products, filtered and sorted, 20 per page
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    params(ListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<ListParams>,
) -> ProductResult<Json<ProductListResponse>> {
    let page = service.list_products(&params).await?;

    Ok(Json(ProductListResponse {
        products: summaries(&page.products),
        pagination: page.pagination,
    }))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductDetail),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductDetail::from(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDetail),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductDetail>> {
    let product = service.get_product(id).await?;
    Ok(Json(product.into()))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product replaced", body = ProductDetail),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<ProductDetail>> {
    let product = service.replace_product(id, input).await?;
    Ok(Json(product.into()))
}

/// Update some fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductDetail),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductDetail>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product.into()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search name, category and brand for a substring
#[utoipa::path(
    get,
    path = "/search",
    tag = entity::Model::TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching products", body = SearchResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<SearchParams>,
) -> ProductResult<Json<SearchResponse>> {
    let (term, limit) = params.parse()?;
    let products = service.search_products(&term, limit).await?;

    Ok(Json(SearchResponse {
        total: products.len(),
        results: summaries(&products),
        query: term,
    }))
}

/// All products whose category contains the given text
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = entity::Model::TAG,
    params(
        ("category" = String, Path, description = "Case-insensitive category fragment")
    ),
    responses(
        (status = 200, description = "Products in the category", body = CategoryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<CategoryResponse>> {
    let products = service.products_by_category(&category).await?;

    Ok(Json(CategoryResponse {
        total: products.len(),
        products: summaries(&products),
        category,
    }))
}

/// All products whose brand contains the given text
#[utoipa::path(
    get,
    path = "/brand/{brand}",
    tag = entity::Model::TAG,
    params(
        ("brand" = String, Path, description = "Case-insensitive brand fragment")
    ),
    responses(
        (status = 200, description = "Products of the brand", body = BrandResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_brand<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(brand): Path<String>,
) -> ProductResult<Json<BrandResponse>> {
    let products = service.products_by_brand(&brand).await?;

    Ok(Json(BrandResponse {
        total: products.len(),
        products: summaries(&products),
        brand,
    }))
}

/// Products with zero quantity
#[utoipa::path(
    get,
    path = "/sin-stock",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "Out-of-stock products", body = OutOfStockResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn out_of_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<OutOfStockResponse>> {
    let products = service.out_of_stock_products().await?;

    Ok(Json(OutOfStockResponse {
        total: products.len(),
        products: summaries(&products),
    }))
}

/// Subtract stock if enough is available
#[utoipa::path(
    post,
    path = "/{id}/reducir-stock",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ReduceStockRequest,
    responses(
        (status = 200, description = "Stock reduced", body = ReduceStockResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reduce_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    payload: Result<Json<ReduceStockRequest>, JsonRejection>,
) -> Result<Json<ReduceStockResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            service.get_product(id).await?;
            return Err(rejection.into());
        }
    };

    // Strings, floats, booleans and null count as non-positive amounts.
    let amount = request.quantity.as_i64().unwrap_or(0);

    let product = service.reduce_stock(id, amount).await?;
    Ok(Json(ReduceStockResponse::new(&product)))
}
