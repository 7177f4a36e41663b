//! REST API server for payment form validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! payform-server
//!
//! # With custom port
//! payform-server --port 8080
//! ```
//!
//! Charge parameters for `/submit` come from `PAYFORM_AMOUNT_CENTS` and
//! `PAYFORM_CURRENCY`.
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use payform::{
    classify, cvc, expiry, format, is_checksum_valid, mask, CardBrand, CardForm, CheckoutConfig,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payform API",
        version = "0.1.0",
        description = "Card validation for a payment form: brand classification, Luhn checksum, expiry, security code and whole-form submission.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Classification", description = "Card brand classification from partial numbers"),
        (name = "Validation", description = "Per-field validation endpoints"),
        (name = "Submission", description = "Whole-form validation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        classify_handler,
        checksum_handler,
        expiry_handler,
        cvc_handler,
        submit_handler,
        health,
    ),
    components(schemas(
        ClassifyRequest,
        ClassifyResponse,
        ChecksumRequest,
        ChecksumResponse,
        ExpiryRequest,
        ExpiryResponse,
        CvcRequest,
        CvcResponse,
        SubmitRequest,
        SubmitResponse,
        FieldErrorBody,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "3782 82"}))]
struct ClassifyRequest {
    /// Card number or the digits typed so far
    card_number: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "brand": "amex",
    "name": "American Express",
    "valid_lengths": [15],
    "code_name": "CID",
    "code_size": 4,
    "formatted": "3782 82"
}))]
struct ClassifyResponse {
    /// Brand slug: visa, mastercard, amex, diners or unknown
    brand: String,
    /// Display name
    name: String,
    /// Digit counts the brand issues
    valid_lengths: Vec<u8>,
    /// Security code label for the form
    code_name: String,
    /// Security code length
    code_size: usize,
    /// Input re-grouped for display
    formatted: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "4242 4242 4242 4242"}))]
struct ChecksumRequest {
    /// Card number. Spaces and dashes are ignored.
    card_number: String,
}

#[derive(Serialize, ToSchema)]
struct ChecksumResponse {
    /// Whether the Luhn checksum passes
    valid: bool,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"date": "12/30"}))]
struct ExpiryRequest {
    /// Expiry date as MM/YY
    date: String,
}

#[derive(Serialize, ToSchema)]
struct ExpiryResponse {
    /// Whether the expiry month has not elapsed
    valid: bool,
    /// Two-digit month
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    /// Two-digit year
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<String>,
    /// Error message if validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"cvc": "1234", "brand": "amex"}))]
struct CvcRequest {
    /// Security code (3-4 digits)
    cvc: String,
    /// Brand slug for brand-specific length. American Express requires 4 digits, the others 3.
    brand: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct CvcResponse {
    /// Whether the security code is valid
    valid: bool,
    /// Code length
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    /// Error message if validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "cardNumber": "4242 4242 4242 4242",
    "cardName": "Ada Lovelace",
    "expDate": "12/30",
    "cvc": "123"
}))]
struct SubmitRequest {
    /// Card number as typed
    card_number: String,
    /// Cardholder name
    card_name: String,
    /// Expiry as MM/YY
    exp_date: String,
    /// Security code
    cvc: String,
}

impl From<SubmitRequest> for CardForm {
    fn from(req: SubmitRequest) -> Self {
        CardForm::new(req.card_number, req.card_name, req.exp_date, req.cvc)
    }
}

#[derive(Serialize, ToSchema)]
struct SubmitResponse {
    /// Whether every field passed
    valid: bool,
    /// Tokenization payload, present when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    token_request: Option<serde_json::Value>,
    /// One entry per failing field
    errors: Vec<FieldErrorBody>,
}

#[derive(Serialize, ToSchema)]
struct FieldErrorBody {
    /// Form field name (cardNumber, cardName, expDate, cvc)
    field: String,
    /// Human-readable message
    message: String,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Classify the card brand from a (partial) number
#[utoipa::path(
    post,
    path = "/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Classified brand", body = ClassifyResponse)
    ),
    tag = "Classification"
)]
async fn classify_handler(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let brand = classify(&req.card_number);
    let code = brand.security_code();

    Json(ClassifyResponse {
        brand: brand.slug().to_string(),
        name: brand.name().to_string(),
        valid_lengths: brand.valid_lengths().to_vec(),
        code_name: code.name.to_string(),
        code_size: code.size,
        formatted: format::format_card_number(&req.card_number),
    })
}

/// Check the Luhn checksum of a card number
#[utoipa::path(
    post,
    path = "/checksum",
    request_body = ChecksumRequest,
    responses(
        (status = 200, description = "Checksum result", body = ChecksumResponse)
    ),
    tag = "Validation"
)]
async fn checksum_handler(Json(req): Json<ChecksumRequest>) -> Json<ChecksumResponse> {
    Json(ChecksumResponse {
        valid: is_checksum_valid(&req.card_number),
    })
}

/// Validate an MM/YY expiry date
#[utoipa::path(
    post,
    path = "/expiry",
    request_body = ExpiryRequest,
    responses(
        (status = 200, description = "Expiry validation result", body = ExpiryResponse)
    ),
    tag = "Validation"
)]
async fn expiry_handler(Json(req): Json<ExpiryRequest>) -> Json<ExpiryResponse> {
    match expiry::validate_expiry(&req.date) {
        Ok(exp) => Json(ExpiryResponse {
            valid: true,
            month: Some(exp.month_str()),
            year: Some(exp.year_str()),
            error: None,
        }),
        Err(e) => Json(ExpiryResponse {
            valid: false,
            month: None,
            year: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Validate a security code
#[utoipa::path(
    post,
    path = "/cvc",
    request_body = CvcRequest,
    responses(
        (status = 200, description = "Security code validation result", body = CvcResponse),
        (status = 400, description = "Unknown brand")
    ),
    tag = "Validation"
)]
async fn cvc_handler(
    Json(req): Json<CvcRequest>,
) -> Result<Json<CvcResponse>, (StatusCode, String)> {
    let result = match &req.brand {
        Some(slug) => {
            let brand: CardBrand = slug
                .parse()
                .map_err(|e: payform::card::ParseBrandError| {
                    (StatusCode::BAD_REQUEST, e.to_string())
                })?;
            cvc::validate_cvc_for_brand(&req.cvc, brand)
        }
        None => cvc::validate_cvc(&req.cvc),
    };

    Ok(Json(match result {
        Ok(validated) => CvcResponse {
            valid: true,
            length: Some(validated.length()),
            error: None,
        },
        Err(e) => CvcResponse {
            valid: false,
            length: None,
            error: Some(e.to_string()),
        },
    }))
}

/// Validate a whole card form
#[utoipa::path(
    post,
    path = "/submit",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Form accepted", body = SubmitResponse),
        (status = 422, description = "One or more fields rejected", body = SubmitResponse)
    ),
    tag = "Submission"
)]
async fn submit_handler(
    State(config): State<Arc<CheckoutConfig>>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), (StatusCode, String)> {
    let form = CardForm::from(req);
    let masked = mask::mask_number(&form.card_number);

    match form.validate(&config) {
        Ok(request) => {
            let token_request = serde_json::to_value(&request)
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            tracing::info!(card = %masked, brand = %form.brand(), "form accepted");
            Ok((
                StatusCode::OK,
                Json(SubmitResponse {
                    valid: true,
                    token_request: Some(token_request),
                    errors: Vec::new(),
                }),
            ))
        }
        Err(errors) => {
            tracing::info!(card = %masked, errors = errors.len(), "form rejected");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SubmitResponse {
                    valid: false,
                    token_request: None,
                    errors: errors
                        .iter()
                        .map(|e| FieldErrorBody {
                            field: e.field().name().to_string(),
                            message: e.to_string(),
                        })
                        .collect(),
                }),
            ))
        }
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // tower_http debug spans carry request URIs, which may hold card digits
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::args()
        .skip_while(|a| a != "--port")
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let config = CheckoutConfig::from_env()?;
    tracing::info!(
        amount = %config.display_amount(),
        currency = %config.currency,
        "checkout configured"
    );

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/classify", post(classify_handler))
        .route("/checksum", post(checksum_handler))
        .route("/expiry", post(expiry_handler))
        .route("/cvc", post(cvc_handler))
        .route("/submit", post(submit_handler))
        .route("/health", get(health))
        .with_state(Arc::new(config))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
