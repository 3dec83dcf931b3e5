//! 考试增删改流程 - 流程层
//!
//! 核心职责：定义每个考试操作的完整流程
//!
//! - 创建：校验 → POST → 横幅 → 重置表单 → 刷新列表
//! - 编辑：GET → 填充表单和勾选框 → 打开弹窗
//! - 保存：校验 → PUT → 横幅 → 关闭弹窗 → 刷新列表
//! - 删除：确认 → DELETE → 横幅 → 刷新列表
//!
//! 所有失败只显示横幅，不重试，不改动页面其他状态

use anyhow::Result;
use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::error::{AppError, ValidationError};
use crate::infrastructure::PageSurface;
use crate::models::{ApiResponse, ExamForm};
use crate::services::{render_exam_list, validate_exam_form, Banner};

const DELETE_CONFIRM: &str = "确定要删除这个考试吗？此操作无法撤销。";
const CONFIRM_LOST: &str = "删除确认已失效，请重新操作";

/// 一次操作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 操作成功
    Completed,
    /// 表单校验未通过，没有发起网络请求
    Rejected(ValidationError),
    /// 请求失败或服务端返回失败，附带展示给用户的信息
    Failed(String),
    /// 用户取消
    Cancelled,
}

/// 考试操作流程
///
/// - 只依赖 ExamApi 能力
/// - 不持有页面，页面由调用方传入
pub struct ExamFlow {
    api: Box<dyn ExamApi>,
}

impl ExamFlow {
    pub fn new(api: Box<dyn ExamApi>) -> Self {
        Self { api }
    }

    /// 拉取考试列表并重新渲染
    pub async fn load_exams(&self, surface: &dyn PageSurface) -> Result<ActionOutcome> {
        match self.api.list_exams().await {
            Ok(exams) => {
                info!("📋 加载到 {} 个考试", exams.len());
                surface.render_exam_list(&render_exam_list(&exams)).await?;
                Ok(ActionOutcome::Completed)
            }
            Err(e) => self.fail(surface, &e, "加载考试列表失败").await,
        }
    }

    /// 提交创建表单
    pub async fn create_exam(
        &self,
        surface: &dyn PageSurface,
        form: &ExamForm,
    ) -> Result<ActionOutcome> {
        let draft = match validate_exam_form(form) {
            Ok(draft) => draft,
            Err(e) => return self.reject(surface, e).await,
        };

        info!("📝 创建考试: {} ({} 道题)", draft.name, draft.questions.len());

        let response = self.api.create_exam(&draft).await;
        match self
            .report_write(surface, response, "考试创建成功", "创建考试失败")
            .await?
        {
            ActionOutcome::Completed => {
                surface.reset_create_form().await?;
                self.load_exams(surface).await?;
                Ok(ActionOutcome::Completed)
            }
            other => Ok(other),
        }
    }

    /// 打开编辑弹窗
    pub async fn edit_exam(&self, surface: &dyn PageSurface, id: &str) -> Result<ActionOutcome> {
        let exam = match self.api.get_exam(id).await {
            Ok(exam) => exam,
            Err(e) => return self.fail(surface, &e, "加载考试详情失败").await,
        };

        surface
            .populate_edit_form(&exam.id, &ExamForm::from_exam(&exam))
            .await?;
        surface.open_edit_modal().await?;
        info!("✏️ 编辑考试 #{}: {}", exam.id, exam.name);
        Ok(ActionOutcome::Completed)
    }

    /// 提交编辑弹窗
    pub async fn save_exam(
        &self,
        surface: &dyn PageSurface,
        id: &str,
        form: &ExamForm,
    ) -> Result<ActionOutcome> {
        if id.trim().is_empty() {
            let message = "未找到要编辑的考试".to_string();
            surface.show_banner(&Banner::danger(message.clone())).await?;
            return Ok(ActionOutcome::Failed(message));
        }

        let draft = match validate_exam_form(form) {
            Ok(draft) => draft,
            Err(e) => return self.reject(surface, e).await,
        };

        let response = self.api.update_exam(id, &draft).await;
        match self
            .report_write(surface, response, "考试更新成功", "更新考试失败")
            .await?
        {
            ActionOutcome::Completed => {
                surface.close_edit_modal().await?;
                self.load_exams(surface).await?;
                Ok(ActionOutcome::Completed)
            }
            other => Ok(other),
        }
    }

    /// 删除考试（先确认）
    pub async fn delete_exam(&self, surface: &dyn PageSurface, id: &str) -> Result<ActionOutcome> {
        let confirmed = match surface.confirm(DELETE_CONFIRM).await {
            Ok(confirmed) => confirmed,
            Err(e) => {
                warn!("❌ 删除考试 #{} 的确认框失败: {:#}", id, e);
                surface
                    .show_banner(&Banner::danger(CONFIRM_LOST.to_string()))
                    .await?;
                return Ok(ActionOutcome::Failed(CONFIRM_LOST.to_string()));
            }
        };
        if !confirmed {
            info!("用户取消删除考试 #{}", id);
            return Ok(ActionOutcome::Cancelled);
        }

        let response = self.api.delete_exam(id).await;
        match self
            .report_write(surface, response, "考试已删除", "删除考试失败")
            .await?
        {
            ActionOutcome::Completed => {
                self.load_exams(surface).await?;
                Ok(ActionOutcome::Completed)
            }
            other => Ok(other),
        }
    }

    /// 把写操作的返回转成横幅
    async fn report_write(
        &self,
        surface: &dyn PageSurface,
        response: Result<ApiResponse, AppError>,
        success_text: &str,
        failure_text: &str,
    ) -> Result<ActionOutcome> {
        match response {
            Ok(resp) if resp.success => {
                let message = resp.message.unwrap_or_else(|| success_text.to_string());
                surface.show_banner(&Banner::success(message)).await?;
                Ok(ActionOutcome::Completed)
            }
            Ok(resp) => {
                let message = resp.message.unwrap_or_else(|| failure_text.to_string());
                warn!("⚠️ 服务端返回失败: {}", message);
                surface.show_banner(&Banner::danger(message.clone())).await?;
                Ok(ActionOutcome::Failed(message))
            }
            Err(e) => self.fail(surface, &e, failure_text).await,
        }
    }

    async fn fail(
        &self,
        surface: &dyn PageSurface,
        err: &AppError,
        fallback: &str,
    ) -> Result<ActionOutcome> {
        warn!("❌ {}: {}", fallback, err);
        let message = err.server_message().unwrap_or(fallback).to_string();
        surface.show_banner(&Banner::danger(message.clone())).await?;
        Ok(ActionOutcome::Failed(message))
    }

    async fn reject(&self, surface: &dyn PageSurface, err: ValidationError) -> Result<ActionOutcome> {
        info!("表单未通过校验: {}", err);
        surface.show_banner(&Banner::warning(err.to_string())).await?;
        Ok(ActionOutcome::Rejected(err))
    }
}
