//! 页面事件桥 - 基础设施层
//!
//! 在页面上挂监听器，把用户操作以 JSON 字符串形式通过 binding 发回

use anyhow::{Context, Result};
use futures::stream::BoxStream;
use tracing::info;

use crate::infrastructure::page_surface::selectors;
use crate::infrastructure::JsExecutor;

/// 页面调用的 binding 名称
pub const BINDING_NAME: &str = "examConsoleEmit";

/// 注册 binding 并安装页面监听器
///
/// 返回页面事件载荷流。监听器同时注册为新文档脚本，页面刷新或跳转后自动重新安装；
/// binding 本身在导航后仍然有效。
pub async fn install(executor: &JsExecutor) -> Result<BoxStream<'static, String>> {
    let events = executor.bind(BINDING_NAME).await?;
    let script = listener_script()?;

    executor
        .eval_on_new_document(script.clone())
        .await
        .context("注册页面监听器失败")?;

    let installed: bool = executor
        .eval_as(script)
        .await
        .context("安装页面监听器失败")?;

    if installed {
        info!("✓ 页面监听器已安装");
    } else {
        info!("页面监听器已存在，跳过安装");
    }

    Ok(events)
}

fn listener_script() -> Result<String> {
    let js = |s: &str| serde_json::to_string(s);
    Ok(format!(
        r#"
        (() => {{
            if (window.__examConsoleInstalled) return false;
            window.__examConsoleInstalled = true;

            const setup = () => {{
                const emit = (payload) => window[{binding}](JSON.stringify(payload));

                const readForm = (form) => {{
                    const value = (name) => {{
                        const field = form.querySelector(`[name="${{name}}"]`);
                        return field ? field.value : "";
                    }};
                    return {{
                        name: value("name"),
                        description: value("description"),
                        duration: value("duration"),
                        questions: Array.from(form.querySelectorAll('input[name="questions"]:checked'))
                            .map(box => box.value)
                    }};
                }};

                const input = document.querySelector({search_input});
                const button = document.querySelector({search_button});
                const query = () => (input ? input.value : "");

                if (button) {{
                    button.addEventListener("click", (e) => {{
                        e.preventDefault();
                        emit({{ type: "search_click", query: query() }});
                    }});
                }}
                if (input) {{
                    input.addEventListener("keydown", (e) => {{
                        if (e.key === "Enter") {{
                            e.preventDefault();
                            emit({{ type: "search_enter", query: query() }});
                        }}
                    }});
                    input.addEventListener("input", () => {{
                        emit({{ type: "search_input", query: query() }});
                    }});
                }}

                const createForm = document.querySelector({create_form});
                if (createForm) {{
                    createForm.addEventListener("submit", (e) => {{
                        e.preventDefault();
                        emit({{ type: "create_submit", form: readForm(createForm) }});
                    }});
                }}

                const editForm = document.querySelector({edit_form});
                if (editForm) {{
                    editForm.addEventListener("submit", (e) => {{
                        e.preventDefault();
                        emit({{ type: "edit_submit", id: editForm.dataset.examId || "", form: readForm(editForm) }});
                    }});
                }}

                // 列表每次重新渲染后旧节点被丢弃，需要重新绑定
                window.__examConsoleBindList = () => {{
                    const list = document.querySelector({exam_list});
                    if (!list) return;
                    list.querySelectorAll(".edit-exam-btn").forEach(btn => {{
                        btn.addEventListener("click", () => emit({{ type: "edit_click", id: btn.dataset.examId }}));
                    }});
                    list.querySelectorAll(".delete-exam-btn").forEach(btn => {{
                        btn.addEventListener("click", () => emit({{ type: "delete_click", id: btn.dataset.examId }}));
                    }});
                }};
                window.__examConsoleBindList();
            }};

            // 新文档脚本在 DOM 解析前执行，需等待 DOMContentLoaded
            if (document.readyState === "loading") {{
                document.addEventListener("DOMContentLoaded", setup, {{ once: true }});
            }} else {{
                setup();
            }}
            return true;
        }})()
        "#,
        binding = js(BINDING_NAME)?,
        search_input = js(selectors::SEARCH_INPUT)?,
        search_button = js(selectors::SEARCH_BUTTON)?,
        create_form = js(selectors::CREATE_FORM)?,
        edit_form = js(selectors::EDIT_FORM)?,
        exam_list = js(selectors::EXAM_LIST)?,
    ))
}
