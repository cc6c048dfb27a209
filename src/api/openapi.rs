//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::services::TokenResponse;

/// OpenAPI documentation for the signup/login API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auth API",
        version = "0.1.0",
        description = "Signup and login backed by salted PBKDF2 credentials",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
    ),
    components(
        schemas(
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::SignupResponse,
            auth_handler::LoginResponse,
            TokenResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "User signup and login")
    )
)]
pub struct ApiDoc;
