//! 页面读写能力 - 基础设施层
//!
//! `PageSurface` 描述流程层需要的全部 DOM 操作；
//! `DomSurface` 通过 `JsExecutor` 在真实页面上实现它。

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::infrastructure::JsExecutor;
use crate::models::{ExamForm, RenderedItem};
use crate::services::Banner;

/// 页面元素选择器
pub mod selectors {
    pub const ITEM: &str = ".question-item, .exam-item";
    pub const ITEM_TITLE: &str = ".question-title, .exam-title";
    pub const ITEM_DESCRIPTION: &str = ".question-description, .exam-description";
    pub const ITEM_TAG: &str = ".question-tag, .tag";
    pub const SEARCH_INPUT: &str = "#searchInput";
    pub const SEARCH_BUTTON: &str = "#searchBtn";
    pub const SEARCH_NOTICE: &str = "#searchNotice";
    pub const ALERT_CONTAINER: &str = "#alertContainer";
    pub const EXAM_LIST: &str = "#examList";
    pub const CREATE_FORM: &str = "#createExamForm";
    pub const EDIT_FORM: &str = "#editExamForm";
    pub const EDIT_MODAL: &str = "#editExamModal";
}

/// 页面能力
///
/// 流程层只通过这个 trait 操作页面
#[async_trait]
pub trait PageSurface: Send + Sync {
    /// 读取当前已渲染的列表项
    async fn read_items(&self) -> Result<Vec<RenderedItem>>;
    /// 按下标切换列表项可见性
    async fn apply_visibility(&self, visibility: &[bool]) -> Result<()>;
    /// 显示（Some）或移除（None）"无结果"提示
    async fn set_search_notice(&self, notice_html: Option<&str>) -> Result<()>;
    /// 显示一条会自动消失的横幅
    async fn show_banner(&self, banner: &Banner) -> Result<()>;
    /// 替换考试列表并重新绑定编辑/删除按钮
    async fn render_exam_list(&self, html: &str) -> Result<()>;
    /// 重置创建表单
    async fn reset_create_form(&self) -> Result<()>;
    /// 填充编辑表单及题目勾选框
    async fn populate_edit_form(&self, exam_id: &str, form: &ExamForm) -> Result<()>;
    async fn open_edit_modal(&self) -> Result<()>;
    async fn close_edit_modal(&self) -> Result<()>;
    /// 阻塞式确认框，返回用户是否确认
    async fn confirm(&self, message: &str) -> Result<bool>;
}

/// 基于真实页面的实现
pub struct DomSurface {
    executor: JsExecutor,
    banner_timeout_ms: u64,
}

impl DomSurface {
    pub fn new(executor: JsExecutor, banner_timeout_ms: u64) -> Self {
        Self {
            executor,
            banner_timeout_ms,
        }
    }

    /// 执行不关心返回值的脚本
    async fn run(&self, script: String) -> Result<()> {
        self.executor.eval(script).await?;
        Ok(())
    }
}

#[async_trait]
impl PageSurface for DomSurface {
    async fn read_items(&self) -> Result<Vec<RenderedItem>> {
        self.executor.eval_as(read_items_script()?).await
    }

    async fn apply_visibility(&self, visibility: &[bool]) -> Result<()> {
        self.run(visibility_script(visibility)?).await
    }

    async fn set_search_notice(&self, notice_html: Option<&str>) -> Result<()> {
        self.run(notice_script(notice_html)?).await
    }

    async fn show_banner(&self, banner: &Banner) -> Result<()> {
        self.run(banner_script(banner, self.banner_timeout_ms)?).await
    }

    async fn render_exam_list(&self, html: &str) -> Result<()> {
        self.run(exam_list_script(html)?).await
    }

    async fn reset_create_form(&self) -> Result<()> {
        self.run(statement(format!(
            r#"
            const form = document.querySelector({form});
            if (form) form.reset();
            "#,
            form = js(selectors::CREATE_FORM)?,
        )))
        .await
    }

    async fn populate_edit_form(&self, exam_id: &str, form: &ExamForm) -> Result<()> {
        self.run(edit_form_script(exam_id, form)?).await
    }

    async fn open_edit_modal(&self) -> Result<()> {
        self.run(modal_script(true)?).await
    }

    async fn close_edit_modal(&self) -> Result<()> {
        self.run(modal_script(false)?).await
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        self.executor.eval_as(confirm_script(message)?).await
    }
}

fn js(value: impl serde::Serialize) -> Result<String> {
    Ok(serde_json::to_string(&value)?)
}

/// 包成立即执行函数，末尾返回 true（`undefined` 无法转成 JSON）
fn statement(body: String) -> String {
    format!("(() => {{ {} \n return true; }})()", body)
}

fn read_items_script() -> Result<String> {
    Ok(format!(
        r#"
        (() => {{
            const text = (el, sel) => {{
                const found = el.querySelector(sel);
                return found ? found.textContent : "";
            }};
            return Array.from(document.querySelectorAll({item})).map((el, index) => ({{
                index,
                title: text(el, {title}),
                description: text(el, {description}),
                tags: Array.from(el.querySelectorAll({tag})).map(t => t.textContent)
            }}));
        }})()
        "#,
        item = js(selectors::ITEM)?,
        title = js(selectors::ITEM_TITLE)?,
        description = js(selectors::ITEM_DESCRIPTION)?,
        tag = js(selectors::ITEM_TAG)?,
    ))
}

fn visibility_script(visibility: &[bool]) -> Result<String> {
    Ok(statement(format!(
        r#"
        const visible = {visible};
        document.querySelectorAll({item}).forEach((el, i) => {{
            el.style.display = visible[i] === false ? "none" : "";
        }});
        "#,
        visible = js(visibility)?,
        item = js(selectors::ITEM)?,
    )))
}

fn notice_script(notice_html: Option<&str>) -> Result<String> {
    Ok(statement(format!(
        r#"
        let holder = document.querySelector({notice});
        if (!holder) {{
            holder = document.createElement("div");
            holder.id = {notice_id};
            document.body.appendChild(holder);
        }}
        holder.innerHTML = {html};
        "#,
        notice = js(selectors::SEARCH_NOTICE)?,
        notice_id = js(selectors::SEARCH_NOTICE.trim_start_matches('#'))?,
        html = js(notice_html.unwrap_or(""))?,
    )))
}

fn banner_script(banner: &Banner, timeout_ms: u64) -> Result<String> {
    Ok(statement(format!(
        r#"
        const container = document.querySelector({container}) || document.body;
        const wrapper = document.createElement("div");
        wrapper.innerHTML = {html};
        const node = wrapper.firstElementChild;
        container.prepend(node);
        setTimeout(() => node.remove(), {timeout});
        "#,
        container = js(selectors::ALERT_CONTAINER)?,
        html = js(banner.to_html())?,
        timeout = timeout_ms,
    )))
}

fn exam_list_script(html: &str) -> Result<String> {
    Ok(statement(format!(
        r#"
        const list = document.querySelector({list});
        if (list) {{
            list.innerHTML = {html};
        }}
        if (typeof window.__examConsoleBindList === "function") {{
            window.__examConsoleBindList();
        }}
        "#,
        list = js(selectors::EXAM_LIST)?,
        html = js(html)?,
    )))
}

fn edit_form_script(exam_id: &str, form: &ExamForm) -> Result<String> {
    Ok(statement(format!(
        r#"
        const form = document.querySelector({selector});
        if (form) {{
            const data = {data};
            form.dataset.examId = {id};
            const set = (name, value) => {{
                const field = form.querySelector(`[name="${{name}}"]`);
                if (field) field.value = value;
            }};
            set("name", data.name);
            set("description", data.description);
            set("duration", data.duration);
            form.querySelectorAll('input[name="questions"]').forEach(box => {{
                box.checked = data.questions.includes(box.value);
            }});
        }}
        "#,
        selector = js(selectors::EDIT_FORM)?,
        data = js(json!({
            "name": form.name,
            "description": form.description,
            "duration": form.duration,
            "questions": form.questions,
        }))?,
        id = js(exam_id)?,
    )))
}

fn confirm_script(message: &str) -> Result<String> {
    Ok(format!("window.confirm({})", js(message)?))
}

/// 优先使用 Bootstrap Modal，页面没有 Bootstrap 时直接切换样式
fn modal_script(show: bool) -> Result<String> {
    Ok(statement(format!(
        r#"
        const modal = document.querySelector({modal});
        if (modal) {{
            if (window.bootstrap && window.bootstrap.Modal) {{
                const instance = window.bootstrap.Modal.getOrCreateInstance(modal);
                {show} ? instance.show() : instance.hide();
            }} else {{
                modal.style.display = {show} ? "block" : "none";
                modal.classList.toggle("show", {show});
            }}
        }}
        "#,
        modal = js(selectors::EDIT_MODAL)?,
        show = show,
    )))
}
