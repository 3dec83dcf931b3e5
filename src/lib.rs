//! # Exam Console
//!
//! 驱动考试管理页面的控制台：页面内搜索过滤 + 考试增删改
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 和 binding 事件流
//! - `DomSurface` - 页面读写（列表项、横幅、表单、弹窗、确认框）
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/` - 描述"我能做什么"，不接触页面
//! - `SearchFilter` - 小写子串匹配
//! - `validate_exam_form` - 名称 / 时长 / 题目校验
//! - `html_renderer` - 列表渲染与 HTML 转义
//! - `Debouncer` - 输入防抖
//! - `clients/ExamClient` - 考试 REST API
//!
//! ### ③ 流程层（Workflow）
//! - `SearchFlow` - 读取 → 过滤 → 写回
//! - `ExamFlow` - 创建 / 编辑 / 保存 / 删除的完整流程
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/console` - 应用生命周期与事件循环
//! - `orchestrator/dispatcher` - 页面事件分发与防抖
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use clients::{ExamApi, ExamClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{DomSurface, JsExecutor, PageSurface};
pub use models::{Exam, ExamDraft, ExamForm, RenderedItem, UiEvent};
pub use orchestrator::App;
pub use workflow::{ActionOutcome, ExamFlow, SearchFlow};
