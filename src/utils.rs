//! 工具函数模块
//!
//! 报表格式化与 URL 处理的辅助函数。

/// URL 工具函数
pub mod url_utils {
    use crate::error::{BlameError, Result};
    use url::Url;

    /// 验证 URL 格式
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::utils::url_utils::validate_url;
    ///
    /// assert!(validate_url("https://api.sys.example.com").is_ok());
    /// assert!(validate_url("invalid-url").is_err());
    /// ```
    pub fn validate_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(BlameError::UrlParse)
    }

    /// 把 API 路径解析为完整 URL，绝对地址原样返回
    pub fn resolve_api_url(base: &Url, path: &str) -> Result<Url> {
        base.join(path)
            .map_err(|e| BlameError::invalid_parameter(format!("Invalid API path {}: {}", path, e)))
    }
}

/// 数据格式化工具
pub mod format_utils {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    /// 乘法结果的浮点误差容限
    const FLOOR_EPSILON: f64 = 1e-9;

    /// 向下取整到指定小数位
    pub fn floor_to(value: f64, places: i32) -> f64 {
        let mult = 10f64.powi(places);
        (value * mult + FLOOR_EPSILON).floor() / mult
    }

    /// 格式化字节大小，取使数值不小于 1 的最大单位，向下保留三位小数
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::utils::format_utils::format_bytes;
    ///
    /// assert_eq!(format_bytes(0), "0 B");
    /// assert_eq!(format_bytes(1536), "1.5 KB");
    /// assert_eq!(format_bytes(1073741824), "1 GB");
    /// ```
    pub fn format_bytes(bytes: u64) -> String {
        if bytes == 0 {
            return "0 B".to_string();
        }

        let mut unit_index = 0;
        while unit_index < UNITS.len() - 1 && bytes >= 1024u64.pow(unit_index as u32 + 1) {
            unit_index += 1;
        }

        let value = bytes as f64 / 1024f64.powi(unit_index as i32);
        format!("{} {}", floor_to(value, 3), UNITS[unit_index])
    }

    /// 格式化 CPU 占用比例，向下保留两位小数
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::utils::format_utils::format_percent;
    ///
    /// assert_eq!(format_percent(0.4567), "45.67%");
    /// ```
    pub fn format_percent(ratio: f64) -> String {
        format!("{}%", floor_to(ratio * 100.0, 2))
    }

    /// 格式化运行时长为 `天:时:分:秒`
    pub fn format_uptime(seconds: u64) -> String {
        let days = seconds / 86400;
        let hours = (seconds % 86400) / 3600;
        let minutes = (seconds % 3600) / 60;
        let seconds = seconds % 60;

        format!("{}:{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    }
}
