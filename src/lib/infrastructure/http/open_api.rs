//! OpenAPI module

use utoipa::OpenApi;

use crate::{
    domain::contact::{FieldFlags, FormData},
    infrastructure::http::{errors::ErrorResponse, handlers::*},
};

/// OpenAPI document for the relay and health routes
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Portfolio Contact Relay"),
    paths(send_email::handler, uptime::handler),
    components(schemas(
        FormData,
        FieldFlags,
        send_email::SendEmailResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::test_state};

    #[tokio::test]
    async fn test_openapi_document_lists_relay_route() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .get("/api/openapi.json")
            .await;

        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();

        assert!(json["paths"]["/api/sendEmail"]["post"].is_object());
        assert!(json["components"]["schemas"]["FieldFlags"].is_object());

        Ok(())
    }
}
