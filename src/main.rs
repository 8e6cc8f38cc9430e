//! Diego Blame 命令行工具
//!
//! 以独立命令的形式运行 `cf diego-blame` 插件。

use clap::{Parser, Subcommand, ValueEnum};
use diego_blame_rs::{
    init_logger, plugin::HELP_TEXT, CfClient, CfCurlTransport, Config, DiegoBlame,
    HttpTransport, Overrides, Result, PLUGIN_NAME, VERSION,
};
use std::io;
use std::time::Duration;

/// Diego Blame 命令行工具
#[derive(Parser)]
#[command(name = "diego-blame-rs")]
#[command(about = "Find the app instances running on a Diego cell")]
#[command(version)]
struct Cli {
    /// 访问 API 的方式
    #[arg(long, value_enum, default_value_t = TransportKind::CfCurl)]
    transport: TransportKind,

    /// API 地址（http 模式，默认读取 cf 会话）
    #[arg(long)]
    api: Option<String>,

    /// 访问令牌（http 模式，默认读取 cf 会话）
    #[arg(long)]
    token: Option<String>,

    /// 跳过 TLS 证书校验
    #[arg(long)]
    skip_ssl_validation: bool,

    /// HTTP 请求超时（秒）
    #[arg(long)]
    timeout: Option<u64>,

    /// 最多遍历的应用分页数
    #[arg(long)]
    max_pages: Option<usize>,

    /// 同一次运行内复用 space/org 查询结果
    #[arg(long)]
    cache_lookups: bool,

    /// cf 可执行文件
    #[arg(long)]
    cf_binary: Option<String>,

    /// 启用详细日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// 传输方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    /// 通过 `cf curl` 调用，由 cf CLI 负责认证
    CfCurl,
    /// 直接发送 HTTP 请求
    Http,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 扫描指定 cell 上的应用实例
    #[command(name = "diego-blame", about = HELP_TEXT)]
    DiegoBlame {
        /// cell 的主机地址
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// 输出插件元数据（JSON）
    Metadata,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        if let Some(suggestion) = e.suggestion() {
            eprintln!("{}", suggestion);
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let plugin = DiegoBlame::new(VERSION);

    let args = match cli.command {
        Commands::Metadata => {
            let metadata = plugin.metadata()?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            return Ok(());
        }
        Commands::DiegoBlame { args } => {
            let mut full = vec![PLUGIN_NAME.to_string()];
            full.extend(args);
            full
        }
    };

    // 在读取配置或访问网络之前校验参数
    DiegoBlame::host_selector(&args)?;

    let overrides = Overrides {
        api_endpoint: cli.api,
        access_token: cli.token,
        skip_ssl_validation: cli.skip_ssl_validation,
        request_timeout: cli.timeout.map(Duration::from_secs),
        max_pages: cli.max_pages,
        cache_lookups: cli.cache_lookups,
        cf_binary: cli.cf_binary,
    };
    let session_path = match cli.transport {
        TransportKind::Http => Config::default_session_path(),
        TransportKind::CfCurl => None,
    };
    let config = Config::resolve(session_path.as_deref(), overrides)?;
    let plugin = plugin.with_config(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rows = match cli.transport {
        TransportKind::CfCurl => {
            let client = CfClient::new(CfCurlTransport::new(plugin.config().cf_binary.clone()));
            plugin.run(&client, &args, &mut out).await?
        }
        TransportKind::Http => {
            let client = CfClient::new(HttpTransport::from_config(plugin.config())?);
            plugin.run(&client, &args, &mut out).await?
        }
    };

    log::debug!("rendered {} rows", rows);
    Ok(())
}
