use std::time::Duration;

use anyhow::Result;
use chromiumoxide::handler::HandlerConfig;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::AppError;

/// 连接到浏览器并获取考试管理页面
///
/// 优先复用标题包含 `target_title` 的已打开页面，否则新开页面并导航到 `target_url`。
/// `request_timeout` 是单条 CDP 命令的超时，阻塞式确认框也计在内。
pub async fn connect_to_browser_and_page(
    port: u16,
    target_url: &str,
    target_title: Option<&str>,
    request_timeout: Duration,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标 URL: {}, 目标标题: {:?}", target_url, target_title);

    let handler_config = HandlerConfig {
        request_timeout,
        ..HandlerConfig::default()
    };
    let (browser, mut handler) = Browser::connect_with_config(&browser_url, handler_config)
        .await
        .map_err(|e| {
            error!("连接浏览器失败: {}", e);
            AppError::browser_connection_failed(port, e)
        })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    if let Some(title) = target_title {
        let pages = browser.pages().await?;
        debug!("获取到 {} 个页面，查找标题包含 '{}' 的页面", pages.len(), title);
        for p in pages.iter() {
            if let Ok(Some(page_title)) = p.get_title().await {
                if page_title.contains(title) {
                    info!("✓ 找到目标页面: {}", page_title);
                    return Ok((browser, p.clone()));
                }
            }
        }
        debug!("未找到匹配的页面，将创建新页面");
    }

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        e
    })?;
    page.goto(target_url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", target_url, e);
        AppError::navigation_failed(target_url, e)
    })?;
    info!("已导航到: {}", target_url);

    Ok((browser, page))
}
