//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用生命周期和页面事件调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `console` - 控制台应用
//! - 管理应用生命周期（初始化、运行）
//! - 持有浏览器资源（Browser、DomSurface）
//! - 驱动事件循环，输出会话统计
//!
//! ### `dispatcher` - 事件分发器
//! - 解析页面事件
//! - 搜索输入防抖，点击/回车立即执行
//! - 把考试操作交给 ExamFlow
//!
//! ## 层次关系
//!
//! ```text
//! console (事件循环)
//!     ↓
//! dispatcher (单个 UiEvent)
//!     ↓
//! workflow::{SearchFlow, ExamFlow} (单个操作)
//!     ↓
//! services / clients (能力层：filter / validate / render / REST)
//!     ↓
//! infrastructure (基础设施：JsExecutor / DomSurface)
//! ```

pub mod console;
pub mod dispatcher;

// 重新导出主要类型
pub use console::App;
pub use dispatcher::{EventDispatcher, SessionStats};
