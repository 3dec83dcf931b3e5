//! 搜索过滤服务 - 业务能力层
//!
//! 只负责"判断哪些列表项可见"，不接触页面

use crate::models::RenderedItem;

/// 一次过滤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 与输入列表一一对应的可见性
    pub visibility: Vec<bool>,
    /// 命中的数量
    pub matched: usize,
    /// 需要展示"无结果"提示时，保存用户输入的原始查询
    pub no_results_query: Option<String>,
}

impl FilterOutcome {
    pub fn all_visible(&self) -> bool {
        self.visibility.iter().all(|v| *v)
    }
}

/// 搜索过滤服务
///
/// 规则：
/// - 查询与可搜索文本都折叠连续空白、转小写
/// - 标题、描述、标签拼接后做子串匹配
/// - 空查询匹配全部
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchFilter;

impl SearchFilter {
    pub fn new() -> Self {
        Self
    }

    /// 对页面上的列表项执行过滤
    pub fn apply(&self, items: &[RenderedItem], query: &str) -> FilterOutcome {
        let trimmed = query.trim();
        let needle = collapse_whitespace(trimmed).to_lowercase();

        let visibility: Vec<bool> = items
            .iter()
            .map(|item| needle.is_empty() || Self::haystack(item).contains(&needle))
            .collect();
        let matched = visibility.iter().filter(|v| **v).count();

        let no_results_query = if matched == 0 && !needle.is_empty() {
            Some(trimmed.to_string())
        } else {
            None
        };

        FilterOutcome {
            visibility,
            matched,
            no_results_query,
        }
    }

    /// 拼接可搜索文本，连续空白折叠为单个空格
    fn haystack(item: &RenderedItem) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(item.tags.len() + 2);
        parts.push(&item.title);
        parts.push(&item.description);
        parts.extend(item.tags.iter().map(String::as_str));

        collapse_whitespace(&parts.join(" ")).to_lowercase()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
