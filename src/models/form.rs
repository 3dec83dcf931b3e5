use serde::{Deserialize, Serialize};

use crate::models::exam::Exam;

/// 页面上考试表单的原始状态
///
/// 时长保留为用户输入的文本，由校验服务解析
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    /// 已勾选的题目 ID
    #[serde(default)]
    pub questions: Vec<String>,
}

impl ExamForm {
    /// 用已有考试填充表单（编辑弹窗）
    pub fn from_exam(exam: &Exam) -> Self {
        Self {
            name: exam.name.clone(),
            description: exam.description.clone(),
            duration: exam.duration.to_string(),
            questions: exam.questions.clone(),
        }
    }
}
