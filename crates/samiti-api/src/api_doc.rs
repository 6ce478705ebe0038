//! OpenAPI document for the registration API.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Samiti Registration API",
        description = "Membership registration: multipart form ingestion, file persistence, and record creation."
    ),
    paths(crate::handlers::register::register),
    components(schemas(
        crate::handlers::register::RegisterResponse,
        crate::error::ErrorResponse
    )),
    tags(
        (name = "registration", description = "Membership registration endpoints")
    )
)]
pub struct ApiDoc;
