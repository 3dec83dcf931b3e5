//! 搜索流程 - 流程层
//!
//! 读取列表项 → 过滤 → 写回可见性和"无结果"提示

use anyhow::Result;
use tracing::debug;

use crate::infrastructure::PageSurface;
use crate::services::{no_results_notice, FilterOutcome, SearchFilter};
use crate::utils::truncate_text;

/// 搜索流程
///
/// 点击、回车和防抖后的按键都走同一个 `run`
#[derive(Debug, Default)]
pub struct SearchFlow {
    filter: SearchFilter,
}

impl SearchFlow {
    pub fn new() -> Self {
        Self {
            filter: SearchFilter::new(),
        }
    }

    pub async fn run(&self, surface: &dyn PageSurface, query: &str) -> Result<FilterOutcome> {
        let items = surface.read_items().await?;
        let outcome = self.filter.apply(&items, query);

        debug!(
            "搜索 \"{}\": 命中 {}/{}",
            truncate_text(query, 40),
            outcome.matched,
            items.len()
        );

        surface.apply_visibility(&outcome.visibility).await?;
        let notice = outcome.no_results_query.as_deref().map(no_results_notice);
        surface.set_search_notice(notice.as_deref()).await?;

        Ok(outcome)
    }
}
