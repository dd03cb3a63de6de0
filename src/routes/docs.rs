//! Interactive API documentation.
//!
//! `/openapi.json` describes the API routes; `/docs` renders it with Swagger UI
//! loaded from a CDN.

use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use crate::config::{SERVICE_DESCRIPTION, SERVICE_NAME, SERVICE_VERSION};

use super::health::{HEALTH_PATH, READY_PATH};
use super::root::ROOT_PATH;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/openapi.json";

const SWAGGER_UI_VERSION: &str = "5";

/// OpenAPI document for the routes under `/api`.
pub fn openapi_document() -> Value {
    let json_object = |description: &str, properties: Value| {
        json!({
            "description": description,
            "content": {
                "application/json": {
                    "schema": { "type": "object", "properties": properties }
                }
            }
        })
    };
    let string = json!({ "type": "string" });

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": SERVICE_NAME,
            "description": SERVICE_DESCRIPTION,
            "version": SERVICE_VERSION,
        },
        "paths": {
            HEALTH_PATH: {
                "get": {
                    "summary": "Health Check",
                    "operationId": "health_check_api_health_get",
                    "responses": {
                        "200": json_object("Successful Response", json!({
                            "status": string,
                            "service": string,
                            "version": string,
                        })),
                    }
                }
            },
            ROOT_PATH: {
                "get": {
                    "summary": "Root",
                    "operationId": "root_api__get",
                    "responses": {
                        "200": json_object("Successful Response", json!({
                            "message": string,
                            "documentation": string,
                            "health": string,
                        })),
                    }
                }
            },
            READY_PATH: {
                "get": {
                    "summary": "Readiness Check",
                    "operationId": "readiness_check_api_ready_get",
                    "responses": {
                        "200": json_object("Database connected", json!({
                            "status": string,
                            "database": string,
                        })),
                        "503": json_object("Database unavailable", json!({
                            "detail": string,
                        })),
                    }
                }
            }
        }
    })
}

pub async fn openapi() -> Json<Value> {
    Json(openapi_document())
}

pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html>
<head>
    <title>{title} - Swagger UI</title>
    <meta charset="utf-8">
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{ui}/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{ui}/swagger-ui-bundle.js"></script>
    <script>
        SwaggerUIBundle({{ url: "{spec}", dom_id: "#swagger-ui" }});
    </script>
</body>
</html>"##,
        title = SERVICE_NAME,
        ui = SWAGGER_UI_VERSION,
        spec = OPENAPI_PATH,
    ))
}
