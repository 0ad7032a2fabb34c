#![allow(dead_code)]

use octocrab::Octocrab;
use repo_showcase::Pause;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A [`Pause`] that returns immediately.
pub struct NoPause;

impl Pause for NoPause {
    fn pause(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

pub fn fixture(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/github")
        .join(name);
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Builds a client talking to the mock server.
pub fn client(server: &MockServer) -> Octocrab {
    install_crypto_provider();
    Octocrab::builder()
        .base_uri(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

/// Mounts a JSON response for `GET {route}`.
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body_fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(fixture(body_fixture)))
        .mount(server)
        .await;
}
