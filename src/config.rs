use crate::error::{AppError, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件路径（可通过 EXAM_CONSOLE_CONFIG 覆盖）
pub const DEFAULT_CONFIG_FILE: &str = "exam_console.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 考试 REST API 根地址
    pub api_base_url: String,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 考试管理页面 URL（找不到目标标题时打开）
    pub target_url: String,
    /// 目标页面标题（包含即匹配）
    pub target_title: Option<String>,
    /// 搜索框输入防抖延迟（毫秒）
    pub search_debounce_ms: u64,
    /// 提示横幅自动消失时间（毫秒）
    pub banner_timeout_ms: u64,
    /// CDP 命令超时（毫秒），需覆盖用户停留在确认框上的时间
    pub cdp_request_timeout_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            browser_debug_port: 9222,
            target_url: "http://localhost:5000/".to_string(),
            target_title: None,
            search_debounce_ms: 300,
            banner_timeout_ms: 5000,
            cdp_request_timeout_ms: 600_000,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（若存在）→ 环境变量覆盖
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var("EXAM_CONSOLE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 仅从环境变量加载（未设置的字段使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config_file_failed(path.display().to_string(), e))?;
        toml::from_str(&content)
            .map_err(|e| AppError::config_file_failed(path.display().to_string(), e))
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            api_base_url: std::env::var("EXAM_API_BASE_URL").unwrap_or(default.api_base_url),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            target_title: std::env::var("TARGET_TITLE").ok().or(default.target_title),
            search_debounce_ms: std::env::var("SEARCH_DEBOUNCE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.search_debounce_ms),
            banner_timeout_ms: std::env::var("BANNER_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.banner_timeout_ms),
            cdp_request_timeout_ms: std::env::var("CDP_REQUEST_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cdp_request_timeout_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 校验配置中不能为零的数值
    pub fn validate(&self) -> Result<(), AppError> {
        if self.search_debounce_ms == 0 {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "search_debounce_ms".to_string(),
                reason: "必须大于 0".to_string(),
            }));
        }
        if self.cdp_request_timeout_ms == 0 {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "cdp_request_timeout_ms".to_string(),
                reason: "必须大于 0".to_string(),
            }));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                reason: "不能为空".to_string(),
            }));
        }
        Ok(())
    }
}
