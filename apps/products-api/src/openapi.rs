//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust/Axum/SeaORM",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/api/productos", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "API operations related to products")
    )
)]
pub struct ApiDoc;
