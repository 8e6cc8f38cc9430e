//! 报表渲染
//!
//! 把匹配到的实例渲染为表格。

use crate::error::Result;
use crate::types::ReportRow;
use crate::utils::format_utils::{format_bytes, format_percent, format_uptime};
use prettytable::{format, Cell, Row, Table};
use std::io::Write;

/// 报表列
pub const HEADERS: [&str; 12] = [
    "App Name/Instance",
    "State",
    "Host:Port",
    "Org",
    "Space",
    "Disk-Usage",
    "Disk-Quota",
    "Mem-Usage",
    "Mem-Quota",
    "CPU-Usage",
    "Uptime",
    "URIs",
];

/// 一行报表的各列文本，与 [`HEADERS`] 一一对应
pub fn row_cells(row: &ReportRow) -> Vec<String> {
    let stat = &row.stat;
    let stats = &stat.stats;

    vec![
        stat.label(),
        stat.state.clone(),
        stat.host_port(),
        row.location.org.clone(),
        row.location.space.clone(),
        format_bytes(stats.usage.disk),
        format_bytes(stats.disk_quota),
        format_bytes(stats.usage.mem),
        format_bytes(stats.mem_quota),
        format_percent(stats.usage.cpu),
        format_uptime(stats.uptime),
        stats.uris.join(", "),
    ]
}

/// 构建表格
pub fn build_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(HEADERS.iter().map(|h| Cell::new(h)).collect()));

    for row in rows {
        table.add_row(Row::new(
            row_cells(row).iter().map(|cell| Cell::new(cell)).collect(),
        ));
    }

    table
}

/// 渲染表格到输出
pub fn render<W: Write + ?Sized>(rows: &[ReportRow], out: &mut W) -> Result<()> {
    build_table(rows).print(out)?;
    out.flush()?;
    Ok(())
}
