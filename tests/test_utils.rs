//! 测试工具模块
//! 提供模拟的平台 v2 API

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const CELL_HOST: &str = "10.0.0.1";
pub const OTHER_HOST: &str = "192.168.0.10";

/// 按 `page` 查询参数匹配请求；`None` 表示没有该参数
pub struct PageParam(pub Option<&'static str>);

impl Match for PageParam {
    fn matches(&self, request: &Request) -> bool {
        let page = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value.into_owned());
        page.as_deref() == self.0
    }
}

fn app_resource(guid: &str, name: &str) -> Value {
    json!({
        "metadata": {"guid": guid, "url": format!("/v2/apps/{}", guid)},
        "entity": {"name": name, "space_url": "/v2/spaces/space-1"}
    })
}

fn instance(name: &str, host: &str, port: u32) -> Value {
    json!({
        "state": "RUNNING",
        "stats": {
            "name": name,
            "uris": [format!("{}.apps.example.com", name)],
            "host": host,
            "port": port,
            "uptime": 90000,
            "mem_quota": 1073741824u64,
            "disk_quota": 1073741824u64,
            "fds_quota": 16384,
            "usage": {"time": "2016-06-17 18:42:51 +0000", "cpu": 0.4567, "mem": 52428800, "disk": 73400320}
        }
    })
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// 挂载两页应用列表：第一页 app-1、app-2，第二页 app-2（重复）、app-3
pub async fn mount_apps(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(PageParam(None))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 3,
            "total_pages": 2,
            "prev_url": null,
            "next_url": "/v2/apps?order-direction=asc&page=2&results-per-page=2",
            "resources": [app_resource("app-1", "web"), app_resource("app-2", "worker")]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .and(PageParam(Some("2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 3,
            "total_pages": 2,
            "prev_url": "/v2/apps?order-direction=asc&page=1&results-per-page=2",
            "next_url": null,
            "resources": [app_resource("app-2", "worker"), app_resource("app-3", "batch")]
        })))
        .mount(server)
        .await;
}

/// 创建完整的模拟平台
pub async fn create_mock_server() -> MockServer {
    let server = MockServer::start().await;

    mount_apps(&server).await;

    mount_get(
        &server,
        "/v2/apps/app-1/stats",
        json!({
            "0": instance("web", CELL_HOST, 61001),
            "1": instance("web", OTHER_HOST, 61002)
        }),
    )
    .await;
    mount_get(
        &server,
        "/v2/apps/app-2/stats",
        json!({"0": instance("worker", CELL_HOST, 61003)}),
    )
    .await;
    mount_get(
        &server,
        "/v2/apps/app-3/stats",
        json!({
            "0": instance("batch", OTHER_HOST, 61004),
            "1": {"state": "DOWN", "since": 1466188906.52}
        }),
    )
    .await;

    for (guid, name) in [("app-1", "web"), ("app-2", "worker"), ("app-3", "batch")] {
        mount_get(&server, &format!("/v2/apps/{}", guid), app_resource(guid, name)).await;
    }

    mount_get(
        &server,
        "/v2/spaces/space-1",
        json!({
            "metadata": {"guid": "space-1"},
            "entity": {"name": "development", "organization_url": "/v2/organizations/org-1"}
        }),
    )
    .await;
    mount_get(
        &server,
        "/v2/organizations/org-1",
        json!({"metadata": {"guid": "org-1"}, "entity": {"name": "acme"}}),
    )
    .await;

    server
}

/// 命令参数
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
