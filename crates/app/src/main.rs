mod logging;
mod settings;

use std::path::Path;
use std::sync::Arc;

use kabu_api::server::{AppState, start_server};
use kabu_core::llm::entity::CompletionOptions;
use kabu_feed::alpha_vantage::AlphaVantageProvider;
use kabu_llm::openai::OpenAiProvider;
use kabu_market::analysis::AnalysisService;
use kabu_market::service::MarketService;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到领域服务。
///
/// # Logic
/// 1. 加载 .env 与全局配置，缺少密钥时立即退出。
/// 2. 初始化全局日志。
/// 3. 实例化基础设施层（行情数据源、LLM）。
/// 4. 构造领域服务层（MarketService、AnalysisService）。
/// 5. 启动 HTTP 服务直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let dotenv = dotenvy::dotenv();
    let config = match settings::load_config(
        Path::new(settings::DEFAULT_CONFIG_FILE),
        None,
        |name| std::env::var(name).ok(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start Kabu: {}", e);
            return Err(e.into());
        }
    };

    // 2. 初始化日志
    let _log_guard = logging::init_logging(&config.logging);
    info!("Kabu starting...");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // 3. 实例化基础设施层
    let feed = Arc::new(AlphaVantageProvider::new(&config.market)?);
    let llm = Arc::new(OpenAiProvider::new(&config.llm)?);

    // 4. 构造领域服务层（注入 Core Trait 抽象）
    let state = AppState {
        market: Arc::new(MarketService::new(feed)),
        analysis: Arc::new(AnalysisService::new(
            llm,
            CompletionOptions::from(&config.llm),
        )),
    };

    // 5. 启动 API 服务
    start_server(state, &config.bind_addr(), &config.server.static_dir).await?;

    info!("Kabu stopped.");
    Ok(())
}
