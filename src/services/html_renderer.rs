//! HTML 渲染服务 - 业务能力层
//!
//! 负责生成考试列表、提示横幅、"无结果"提示的标记。
//! 所有插入的文本都经过 `escape_html`。

use chrono::{DateTime, NaiveDateTime};

use crate::models::Exam;

/// 横幅样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Danger,
}

impl BannerKind {
    fn css_class(self) -> &'static str {
        match self {
            BannerKind::Success => "alert-success",
            BannerKind::Warning => "alert-warning",
            BannerKind::Danger => "alert-danger",
        }
    }
}

/// 一条提示横幅
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Danger,
            message: message.into(),
        }
    }

    /// 生成横幅标记
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="alert {} alert-dismissible fade show" role="alert">{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
            self.kind.css_class(),
            escape_html(&self.message)
        )
    }
}

/// 转义 HTML 保留字符
///
/// 只处理 `& < > " '` 五个字符，其余原样保留
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// "无结果"提示
pub fn no_results_notice(query: &str) -> String {
    format!(
        r#"<div class="no-results alert alert-info">未找到与 "{}" 相关的结果</div>"#,
        escape_html(query)
    )
}

/// 重新生成整个考试列表
///
/// 编辑/删除按钮通过 `data-exam-id` 标识，渲染后由页面桥接层重新绑定
pub fn render_exam_list(exams: &[Exam]) -> String {
    if exams.is_empty() {
        return r#"<p class="text-muted empty-exams">暂无考试</p>"#.to_string();
    }

    exams.iter().map(render_exam_item).collect::<Vec<_>>().join("\n")
}

fn render_exam_item(exam: &Exam) -> String {
    let id = escape_html(&exam.id);
    let created = exam
        .created_at
        .as_deref()
        .map(format_created_at)
        .unwrap_or_default();

    format!(
        r#"<div class="exam-item card mb-2" data-exam-id="{id}">
  <div class="card-body">
    <div class="d-flex justify-content-between">
      <h5 class="exam-title">{name}</h5>
      <span class="badge bg-secondary">{duration} 分钟</span>
    </div>
    <p class="exam-description">{description}</p>
    <small class="text-muted">题目数: {count} | 创建时间: {created}</small>
    <div class="exam-actions mt-2">
      <button type="button" class="btn btn-sm btn-outline-primary edit-exam-btn" data-exam-id="{id}">编辑</button>
      <button type="button" class="btn btn-sm btn-outline-danger delete-exam-btn" data-exam-id="{id}">删除</button>
    </div>
  </div>
</div>"#,
        id = id,
        name = escape_html(&exam.name),
        duration = exam.duration,
        description = escape_html(&exam.description),
        count = exam.questions.len(),
        created = escape_html(&created),
    )
}

/// 创建时间展示为 `YYYY-MM-DD HH:MM`，无法解析时原样展示
fn format_created_at(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}
