//! 实例统计收集
//!
//! 获取应用各实例的运行统计，并按所在主机筛选。

use crate::client::CfClient;
use crate::transport::Transport;
use crate::types::{AppStat, AppStatsResponse};

/// 获取应用的实例统计，只保留 host 与 `host_selector` 完全相等的实例
///
/// 请求失败时记录日志并返回空结果。
pub async fn collect_stats<T: Transport>(
    client: &CfClient<T>,
    guid: &str,
    host_selector: &str,
) -> Vec<AppStat> {
    match client.app_stats(guid).await {
        Ok(response) => filter_by_host(guid, response, host_selector),
        Err(e) => {
            log::warn!("skipping stats for app {}: {}", guid, e);
            Vec::new()
        }
    }
}

/// 按主机筛选实例并附上应用 GUID 与实例索引
///
/// 结果按实例索引排序：能解析为整数的按数值，其余按字典序排在后面。
pub fn filter_by_host(guid: &str, response: AppStatsResponse, host_selector: &str) -> Vec<AppStat> {
    let mut matched: Vec<AppStat> = response
        .into_iter()
        .filter(|(_, instance)| instance.stats.host == host_selector)
        .map(|(index, instance)| AppStat {
            app_guid: guid.to_string(),
            instance_index: index,
            state: instance.state,
            stats: instance.stats,
        })
        .collect();

    matched.sort_by(|a, b| index_key(&a.instance_index).cmp(&index_key(&b.instance_index)));
    matched
}

fn index_key(index: &str) -> (u64, &str) {
    (index.parse().unwrap_or(u64::MAX), index)
}
