use serde::Deserialize;

/// 页面上已渲染的一个列表项（题目或考试）
///
/// 字段直接读自页面标记，不是业务数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderedItem {
    /// 在页面列表中的位置
    pub index: usize,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RenderedItem {
    pub fn new(
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            description: description.into(),
            tags,
        }
    }
}
