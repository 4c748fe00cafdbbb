//! Shared fixtures: a provider wired to a mock IronMQ server

#![allow(dead_code)]

use ironmq_infra::{load_settings, IronMqClient, SettingsSources};
use ironmq_provider::{AttributeMap, Provider};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const PROJECT: &str = "p1";

/// Settings resolved through the config layer, pointed at the mock server
pub fn sources_for(server: &MockServer) -> SettingsSources {
    let addr = server.address();
    SettingsSources::isolated()
        .with_override("scheme", "http")
        .with_override("host", addr.ip().to_string())
        .with_override("port", addr.port().to_string())
        .with_override("token", TOKEN)
}

pub fn provider_for(server: &MockServer) -> Provider {
    let settings = load_settings(&sources_for(server)).unwrap();
    let client = IronMqClient::new(&settings).unwrap();
    Provider::new(Arc::new(client))
}

pub fn config(value: Value) -> AttributeMap {
    value.as_object().cloned().unwrap()
}

pub async fn mount_queue_list(server: &MockServer, names: &[&str]) {
    let queues: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    Mock::given(method("GET"))
        .and(path(format!("/3/projects/{}/queues", PROJECT)))
        .and(header("authorization", format!("OAuth {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "queues": queues })))
        .mount(server)
        .await;
}

pub async fn mount_queue_info(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/3/projects/{}/queues/{}", PROJECT, name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_queue_status(server: &MockServer, name: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/3/projects/{}/queues/{}", PROJECT, name)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}
