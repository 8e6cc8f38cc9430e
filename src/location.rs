//! 应用位置解析
//!
//! app → space → organization 三步查询，任一步失败只清空对应字段。

use crate::client::CfClient;
use crate::transport::Transport;
use crate::types::AppLocation;
use std::collections::HashMap;

/// 单次运行内的查询缓存，键为资源 URL
#[derive(Debug, Default)]
struct LookupCache {
    spaces: HashMap<String, (String, String)>,
    orgs: HashMap<String, String>,
}

/// 位置解析器
pub struct LocationResolver<'a, T> {
    client: &'a CfClient<T>,
    cache: Option<LookupCache>,
}

impl<'a, T: Transport> LocationResolver<'a, T> {
    /// 每个应用都重新查询 space 与 organization
    pub fn new(client: &'a CfClient<T>) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// 按 URL 缓存 space 与 organization 的查询结果
    pub fn with_cache(client: &'a CfClient<T>) -> Self {
        Self {
            client,
            cache: Some(LookupCache::default()),
        }
    }

    /// 解析应用所在的 organization 与 space
    pub async fn resolve(&mut self, guid: &str) -> AppLocation {
        let space_url = match self.client.app(guid).await {
            Ok(app) => app.entity.space_url,
            Err(e) => {
                log::warn!("cannot resolve location of app {}: {}", guid, e);
                return AppLocation::default();
            }
        };

        let (space, org_url) = self.space_info(&space_url).await;
        let org = self.org_name(&org_url).await;

        AppLocation { org, space }
    }

    /// 返回 (space 名称, organization URL)
    async fn space_info(&mut self, space_url: &str) -> (String, String) {
        if space_url.is_empty() {
            return (String::new(), String::new());
        }
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.spaces.get(space_url)) {
            return hit.clone();
        }

        match self.client.space(space_url).await {
            Ok(space) => {
                let info = (space.entity.name, space.entity.organization_url);
                if let Some(cache) = self.cache.as_mut() {
                    cache.spaces.insert(space_url.to_string(), info.clone());
                }
                info
            }
            Err(e) => {
                log::warn!("cannot fetch space {}: {}", space_url, e);
                (String::new(), String::new())
            }
        }
    }

    async fn org_name(&mut self, org_url: &str) -> String {
        if org_url.is_empty() {
            return String::new();
        }
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.orgs.get(org_url)) {
            return hit.clone();
        }

        match self.client.organization(org_url).await {
            Ok(org) => {
                let name = org.entity.name;
                if let Some(cache) = self.cache.as_mut() {
                    cache.orgs.insert(org_url.to_string(), name.clone());
                }
                name
            }
            Err(e) => {
                log::warn!("cannot fetch organization {}: {}", org_url, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;
    use serde_json::json;

    fn app(space_url: &str) -> serde_json::Value {
        json!({"metadata": {"guid": "ignored"}, "entity": {"name": "web", "space_url": space_url}})
    }

    fn full_fixture() -> FakeTransport {
        FakeTransport::new()
            .with("/v2/apps/a1", app("/v2/spaces/s1"))
            .with("/v2/apps/a2", app("/v2/spaces/s1"))
            .with(
                "/v2/spaces/s1",
                json!({"entity": {"name": "development", "organization_url": "/v2/organizations/o1"}}),
            )
            .with("/v2/organizations/o1", json!({"entity": {"name": "acme"}}))
    }

    #[tokio::test]
    async fn test_resolve_location() {
        let client = CfClient::new(full_fixture());
        let mut resolver = LocationResolver::new(&client);

        let location = resolver.resolve("a1").await;
        assert_eq!(
            location,
            AppLocation {
                org: "acme".to_string(),
                space: "development".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_app_failure_yields_empty_location() {
        let client = CfClient::new(FakeTransport::new());
        let mut resolver = LocationResolver::new(&client);

        assert_eq!(resolver.resolve("a1").await, AppLocation::default());
        assert_eq!(client.transport().calls(), vec!["/v2/apps/a1"]);
    }

    #[tokio::test]
    async fn test_org_failure_keeps_space() {
        let client = CfClient::new(
            FakeTransport::new().with("/v2/apps/a1", app("/v2/spaces/s1")).with(
                "/v2/spaces/s1",
                json!({"entity": {"name": "development", "organization_url": "/v2/organizations/gone"}}),
            ),
        );
        let mut resolver = LocationResolver::new(&client);

        let location = resolver.resolve("a1").await;
        assert_eq!(location.space, "development");
        assert_eq!(location.org, "");
    }

    #[tokio::test]
    async fn test_space_failure_skips_org_lookup() {
        let client = CfClient::new(FakeTransport::new().with("/v2/apps/a1", app("/v2/spaces/gone")));
        let mut resolver = LocationResolver::new(&client);

        assert_eq!(resolver.resolve("a1").await, AppLocation::default());
        assert_eq!(client.transport().calls(), vec!["/v2/apps/a1", "/v2/spaces/gone"]);
    }

    #[tokio::test]
    async fn test_no_cache_refetches() {
        let client = CfClient::new(full_fixture());
        let mut resolver = LocationResolver::new(&client);

        resolver.resolve("a1").await;
        resolver.resolve("a2").await;
        assert_eq!(client.transport().call_count("/v2/spaces/s1"), 2);
        assert_eq!(client.transport().call_count("/v2/organizations/o1"), 2);
    }

    #[tokio::test]
    async fn test_cache_reuses_lookups() {
        let client = CfClient::new(full_fixture());
        let mut resolver = LocationResolver::with_cache(&client);

        let first = resolver.resolve("a1").await;
        let second = resolver.resolve("a2").await;
        assert_eq!(first, second);
        assert_eq!(client.transport().call_count("/v2/apps/a2"), 1);
        assert_eq!(client.transport().call_count("/v2/spaces/s1"), 1);
        assert_eq!(client.transport().call_count("/v2/organizations/o1"), 1);
    }
}
