use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beer Stock API",
        version = "1.0.0",
        description = r#"
# Beer Stock API

Registers beers and keeps their stock between zero and each beer's maximum
capacity.

## Error Handling

Every failure uses the same body:

```json
{
  "error": "Bad Request",
  "message": "Stock exceeded: adding would bring quantity to 60, max capacity is 50",
  "request_id": "5f0c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Stock writes are version checked. A `409 Conflict` on increment or decrement
means the beer changed while the request ran and can be retried.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "beers", description = "Beer registration and stock adjustments"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::beers::create_beer,
        crate::handlers::beers::list_beers,
        crate::handlers::beers::get_beer_by_name,
        crate::handlers::beers::delete_beer,
        crate::handlers::beers::increment_beer,
        crate::handlers::beers::decrement_beer,
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::models::Beer,
            crate::models::BeerType,
            crate::handlers::beers::BeerRequest,
            crate::handlers::beers::QuantityRequest,
            crate::handlers::health::HealthResponse,
            crate::handlers::health::HealthStatus,
            crate::errors::ErrorResponse,
        )
    )
)]
pub struct ApiDocV1;

/// Swagger UI serving the generated document at `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_beer_route() {
        let openapi = ApiDocV1::openapi();
        let paths: Vec<&String> = openapi.paths.paths.keys().collect();

        for expected in [
            "/api/v1/beers",
            "/api/v1/beers/{name}",
            "/api/v1/beers/{id}",
            "/api/v1/beers/{id}/increment",
            "/api/v1/beers/{id}/decrement",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn error_example_matches_real_message() {
        let openapi = ApiDocV1::openapi();
        let description = openapi.info.description.unwrap_or_default();
        let message = crate::errors::ServiceError::StockExceeded {
            attempted: 60,
            max: 50,
        }
        .to_string();
        assert!(description.contains(&message), "stale example: {}", message);
    }
}
