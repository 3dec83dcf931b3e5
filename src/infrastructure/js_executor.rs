//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"执行 JS"和"接收页面事件"的能力

use anyhow::{Context, Result};
use chromiumoxide::cdp::js_protocol::runtime::{AddBindingParams, EventBindingCalled};
use chromiumoxide::Page;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力
/// - 注册 binding，把页面调用转成事件流
/// - 不认识 Exam / 表单
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    ///
    /// 脚本必须有返回值，`undefined` 无法转成 JSON
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 注册在每个新文档加载前执行的脚本（页面刷新、跳转后依然生效）
    pub async fn eval_on_new_document(&self, js_code: impl Into<String>) -> Result<()> {
        let identifier = self
            .page
            .evaluate_on_new_document(js_code.into())
            .await
            .context("注册新文档脚本失败")?;
        debug!("新文档脚本已注册: {:?}", identifier);
        Ok(())
    }

    /// 注册名为 `name` 的 binding，返回页面调用时传入的字符串
    pub async fn bind(&self, name: &str) -> Result<BoxStream<'static, String>> {
        self.page
            .execute(AddBindingParams::new(name))
            .await
            .with_context(|| format!("注册 binding {} 失败", name))?;

        let events = self.page.event_listener::<EventBindingCalled>().await?;
        let name = name.to_string();
        debug!("binding {} 已注册", name);

        Ok(events.filter_map(move |event| {
            let payload = (event.name == name).then(|| event.payload.clone());
            futures::future::ready(payload)
        })
        .boxed())
    }
}
