//! 应用分页遍历
//!
//! 沿 `next_url` 链遍历 `/v2/apps`，收集所有应用 GUID。

use crate::client::CfClient;
use crate::transport::Transport;
use std::collections::HashSet;

/// 遍历全部分页，返回去重后的应用 GUID（保持首次出现顺序）
///
/// 遇到已访问过的 `next_url` 或超过 `max_pages` 时停止；
/// 某一页请求失败时记录日志并返回已收集的结果。
pub async fn collect_app_guids<T: Transport>(
    client: &CfClient<T>,
    start: &str,
    max_pages: usize,
) -> Vec<String> {
    let mut guids = Vec::new();
    let mut seen_guids = HashSet::new();
    let mut visited = HashSet::new();
    let mut next = Some(start.to_string());

    while let Some(endpoint) = next.take() {
        if visited.len() >= max_pages {
            log::warn!(
                "stopping after {} pages, {} is not fetched",
                max_pages,
                endpoint
            );
            break;
        }
        if !visited.insert(endpoint.clone()) {
            log::warn!("page {} was already visited, stopping", endpoint);
            break;
        }

        let page = match client.apps_page(&endpoint).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("error in call to {}: {}", endpoint, e);
                break;
            }
        };

        log::debug!(
            "page {}/{}: {} apps",
            visited.len(),
            page.total_pages,
            page.resources.len()
        );

        for resource in page.resources {
            let guid = resource.metadata.guid;
            if guid.is_empty() {
                continue;
            }
            if seen_guids.insert(guid.clone()) {
                guids.push(guid);
            }
        }

        next = page.next_url.filter(|url| !url.is_empty());
    }

    guids
}
