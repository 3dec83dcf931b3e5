//! 考试管理控制台 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：连接浏览器、安装页面事件桥
//! 2. **首屏加载**：检查后端健康状态、渲染考试列表
//! 3. **事件循环**：在页面事件和防抖到期之间 `select!`
//! 4. **资源管理**：唯一持有 Browser 的模块

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::Browser;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{info, warn};

use crate::browser;
use crate::clients::ExamClient;
use crate::config::Config;
use crate::infrastructure::{bridge, DomSurface, JsExecutor};
use crate::orchestrator::dispatcher::EventDispatcher;
use crate::services::wait_deadline;
use crate::utils::logging::{log_startup, print_session_stats};
use crate::workflow::ExamFlow;

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    surface: DomSurface,
    events: BoxStream<'static, String>,
    client: Arc<ExamClient>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config);

        // 连接浏览器
        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            &config.target_url,
            config.target_title.as_deref(),
            Duration::from_millis(config.cdp_request_timeout_ms),
        )
        .await?;

        // 创建 JsExecutor（持有 page）并安装事件桥
        let executor = JsExecutor::new(page);
        let events = bridge::install(&executor).await?;
        let surface = DomSurface::new(executor, config.banner_timeout_ms);
        let client = Arc::new(ExamClient::new(&config));

        Ok(Self {
            config,
            _browser: browser,
            surface,
            events,
            client,
        })
    }

    /// 运行应用主逻辑，直到页面事件流结束
    pub async fn run(mut self) -> Result<()> {
        match self.client.health().await {
            Ok(health) => info!("✓ 后端状态: {}", health.status),
            Err(e) => warn!("⚠️ 后端健康检查失败: {}", e),
        }

        let mut dispatcher = EventDispatcher::new(
            ExamFlow::new(Box::new(self.client.clone())),
            Duration::from_millis(self.config.search_debounce_ms),
        );

        dispatcher.exams().load_exams(&self.surface).await?;
        info!("👂 等待页面操作...");

        loop {
            let deadline = dispatcher.deadline();
            tokio::select! {
                payload = self.events.next() => match payload {
                    Some(payload) => dispatcher.handle_payload(&self.surface, &payload).await,
                    None => {
                        info!("页面事件流已结束");
                        break;
                    }
                },
                _ = wait_deadline(deadline) => dispatcher.flush_due(&self.surface).await,
            }
        }

        let stats = dispatcher.stats();
        print_session_stats(stats.handled, stats.failed);
        Ok(())
    }
}
