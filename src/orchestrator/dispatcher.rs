//! 页面事件分发器 - 编排层
//!
//! 把页面事件分派到对应流程；搜索输入经过防抖后才执行

use std::time::Duration;

use anyhow::Result;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::infrastructure::PageSurface;
use crate::models::UiEvent;
use crate::services::Debouncer;
use crate::workflow::{ActionOutcome, ExamFlow, SearchFlow};

/// 会话统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub handled: usize,
    pub failed: usize,
}

/// 事件分发器
pub struct EventDispatcher {
    search: SearchFlow,
    exams: ExamFlow,
    debouncer: Debouncer<String>,
    stats: SessionStats,
}

impl EventDispatcher {
    pub fn new(exams: ExamFlow, debounce: Duration) -> Self {
        Self {
            search: SearchFlow::new(),
            exams,
            debouncer: Debouncer::new(debounce),
            stats: SessionStats::default(),
        }
    }

    pub fn exams(&self) -> &ExamFlow {
        &self.exams
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// 防抖中的搜索何时到期
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// 处理 binding 原始载荷；单个事件出错只记录，不中断会话
    pub async fn handle_payload(&mut self, surface: &dyn PageSurface, payload: &str) {
        let result = match UiEvent::parse(payload) {
            Ok(event) => self.handle(surface, event).await,
            Err(e) => Err(e.into()),
        };
        self.record(result);
    }

    /// 防抖到期后执行最后一次输入的搜索
    pub async fn flush_due(&mut self, surface: &dyn PageSurface) {
        if let Some(query) = self.debouncer.take_due(Instant::now()) {
            let result = self.search.run(surface, &query).await.map(|_| ());
            self.record(result);
        }
    }

    /// 分派单个事件
    pub async fn handle(&mut self, surface: &dyn PageSurface, event: UiEvent) -> Result<()> {
        debug!("收到页面事件: {:?}", event);
        match event {
            UiEvent::SearchInput { query } => {
                self.debouncer.push(query);
                Ok(())
            }
            UiEvent::SearchClick { query } | UiEvent::SearchEnter { query } => {
                self.debouncer.cancel();
                self.search.run(surface, &query).await.map(|_| ())
            }
            UiEvent::CreateSubmit { form } => {
                let outcome = self.exams.create_exam(surface, &form).await?;
                log_outcome("创建考试", &outcome);
                Ok(())
            }
            UiEvent::EditClick { id } => {
                let outcome = self.exams.edit_exam(surface, &id).await?;
                log_outcome("编辑考试", &outcome);
                Ok(())
            }
            UiEvent::EditSubmit { id, form } => {
                let outcome = self.exams.save_exam(surface, &id, &form).await?;
                log_outcome("保存考试", &outcome);
                Ok(())
            }
            UiEvent::DeleteClick { id } => {
                let outcome = self.exams.delete_exam(surface, &id).await?;
                log_outcome("删除考试", &outcome);
                Ok(())
            }
        }
    }

    fn record(&mut self, result: Result<()>) {
        self.stats.handled += 1;
        if let Err(e) = result {
            self.stats.failed += 1;
            error!("❌ 处理页面事件失败: {:#}", e);
        }
    }
}

fn log_outcome(action: &str, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Completed => debug!("{}: 完成", action),
        ActionOutcome::Cancelled => debug!("{}: 已取消", action),
        ActionOutcome::Rejected(e) => debug!("{}: 校验未通过 ({})", action, e),
        ActionOutcome::Failed(msg) => warn!("{}: 失败 ({})", action, msg),
    }
}
