//! Mock SVF Cloud server and client fixtures

use svf_print::{AccessToken, Config, PrintRequest, SvfClient};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token used by every scenario
pub const TOKEN: &str = "tok123";

/// Artifact body served by [`mount_job`]
pub const ARTIFACT: &[u8] = b"PDF-DATA";

/// Artifact metadata served by [`mount_job`]
pub const ARTIFACT_INFO: &str = r#"{"name":"order.pdf","size":8}"#;

/// Print status served by [`mount_job`]
pub const PRINT_STATUS: &str = r#"{"status":"Finished"}"#;

pub fn token() -> AccessToken {
    AccessToken::new(TOKEN)
}

pub fn print_request() -> PrintRequest {
    PrintRequest {
        printer_id: "PDF".to_string(),
        form_file_path: "form/Test/sample_ja.xml".into(),
        data_file_path: "/WebAPISample/sample_ja.csv".into(),
        resource_file_path: Some("/WebAPISample/logo.png".into()),
    }
}

/// Client whose API endpoint is the mock server
pub fn client_for(server: &MockServer) -> SvfClient {
    let mut config = Config::default();
    config.api.endpoint = server.uri();
    SvfClient::new(config).unwrap()
}

/// Serve a complete job for action `action_id` on the mock server
///
/// - `GET /artifacts/<action_id>` (octet-stream) answers 303 to `/files/<action_id>.pdf`
/// - `GET /files/<action_id>.pdf` answers the artifact bytes
/// - `GET /artifacts/<action_id>` (json) answers the artifact metadata
/// - `GET /v1/actions/<action_id>` answers the print status
///
/// All routes require `Authorization: Bearer tok123`.
pub async fn mount_job(server: &MockServer, action_id: &str) {
    let auth = format!("Bearer {}", TOKEN);

    Mock::given(method("GET"))
        .and(path(format!("/artifacts/{}", action_id)))
        .and(header("Accept", "application/octet-stream"))
        .and(header("Authorization", auth.as_str()))
        .respond_with(
            ResponseTemplate::new(303)
                .insert_header("Location", format!("/files/{}.pdf", action_id).as_str()),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/files/{}.pdf", action_id)))
        .and(header("Authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(ARTIFACT.to_vec()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/artifacts/{}", action_id)))
        .and(header("Accept", "application/json"))
        .and(header("Authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTIFACT_INFO))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/actions/{}", action_id)))
        .and(header("Accept", "application/json"))
        .and(header("Authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRINT_STATUS))
        .mount(server)
        .await;
}

/// Result location of the job served by [`mount_job`]
pub fn job_location(server: &MockServer, action_id: &str) -> String {
    format!("{}/artifacts/{}?action={}", server.uri(), action_id, action_id)
}

/// Scratch directory and the artifact path inside it
pub fn scratch() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("order.pdf");
    (temp_dir, dest)
}
