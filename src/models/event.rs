//! 页面事件
//!
//! 页面通过 CDP binding 发送 JSON 字符串，这里是对应的类型

use serde::Deserialize;

use crate::error::AppError;
use crate::models::form::ExamForm;

/// 页面发来的用户操作
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// 点击搜索按钮
    SearchClick { query: String },
    /// 搜索框回车
    SearchEnter { query: String },
    /// 搜索框按键（需要防抖）
    SearchInput { query: String },
    /// 提交创建表单
    CreateSubmit { form: ExamForm },
    /// 点击某个考试的编辑按钮
    EditClick { id: String },
    /// 提交编辑弹窗
    EditSubmit { id: String, form: ExamForm },
    /// 点击某个考试的删除按钮
    DeleteClick { id: String },
}

impl UiEvent {
    /// 解析 binding 载荷
    pub fn parse(payload: &str) -> Result<Self, AppError> {
        serde_json::from_str(payload).map_err(|e| AppError::invalid_event_payload(payload, e))
    }
}
