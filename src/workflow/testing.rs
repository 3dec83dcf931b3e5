//! 流程层测试用的内存实现

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::clients::ExamApi;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::PageSurface;
use crate::models::{ApiResponse, Exam, ExamDraft, ExamForm, RenderedItem};
use crate::services::Banner;

/// 页面上发生过的操作
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Visibility(Vec<bool>),
    Notice(Option<String>),
    Banner(Banner),
    RenderList(String),
    ResetCreateForm,
    PopulateEditForm(String, ExamForm),
    OpenModal,
    CloseModal,
    Confirm(String),
}

pub struct FakeSurface {
    pub items: Vec<RenderedItem>,
    pub confirm_answer: bool,
    pub confirm_fails: bool,
    pub calls: Mutex<Vec<SurfaceCall>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<RenderedItem>) -> Self {
        Self {
            items,
            confirm_answer: true,
            confirm_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Banner(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PageSurface for FakeSurface {
    async fn read_items(&self) -> Result<Vec<RenderedItem>> {
        Ok(self.items.clone())
    }

    async fn apply_visibility(&self, visibility: &[bool]) -> Result<()> {
        self.record(SurfaceCall::Visibility(visibility.to_vec()));
        Ok(())
    }

    async fn set_search_notice(&self, notice_html: Option<&str>) -> Result<()> {
        self.record(SurfaceCall::Notice(notice_html.map(str::to_string)));
        Ok(())
    }

    async fn show_banner(&self, banner: &Banner) -> Result<()> {
        self.record(SurfaceCall::Banner(banner.clone()));
        Ok(())
    }

    async fn render_exam_list(&self, html: &str) -> Result<()> {
        self.record(SurfaceCall::RenderList(html.to_string()));
        Ok(())
    }

    async fn reset_create_form(&self) -> Result<()> {
        self.record(SurfaceCall::ResetCreateForm);
        Ok(())
    }

    async fn populate_edit_form(&self, exam_id: &str, form: &ExamForm) -> Result<()> {
        self.record(SurfaceCall::PopulateEditForm(exam_id.to_string(), form.clone()));
        Ok(())
    }

    async fn open_edit_modal(&self) -> Result<()> {
        self.record(SurfaceCall::OpenModal);
        Ok(())
    }

    async fn close_edit_modal(&self) -> Result<()> {
        self.record(SurfaceCall::CloseModal);
        Ok(())
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        self.record(SurfaceCall::Confirm(message.to_string()));
        if self.confirm_fails {
            anyhow::bail!("request timed out");
        }
        Ok(self.confirm_answer)
    }
}

/// API 调用记录
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Get(String),
    Create(ExamDraft),
    Update(String, ExamDraft),
    Delete(String),
}

/// 内存 API：按顺序弹出预置的列表/写操作结果
pub struct FakeApi {
    pub exams: Mutex<Vec<Exam>>,
    pub write_results: Mutex<VecDeque<AppResult<ApiResponse>>>,
    pub fail_reads: bool,
    pub calls: Mutex<Vec<ApiCall>>,
}

impl FakeApi {
    pub fn new(exams: Vec<Exam>) -> Self {
        Self {
            exams: Mutex::new(exams),
            write_results: Mutex::new(VecDeque::new()),
            fail_reads: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_reads: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn push_write(&self, result: AppResult<ApiResponse>) {
        self.write_results.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_write(&self) -> AppResult<ApiResponse> {
        self.write_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ApiResponse {
                    success: true,
                    message: None,
                })
            })
    }

    fn read_error(endpoint: &str) -> AppError {
        AppError::api_request_failed(
            endpoint,
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        )
    }
}

#[async_trait]
impl ExamApi for FakeApi {
    async fn list_exams(&self) -> AppResult<Vec<Exam>> {
        self.record(ApiCall::List);
        if self.fail_reads {
            return Err(Self::read_error("/api/exams"));
        }
        Ok(self.exams.lock().unwrap().clone())
    }

    async fn get_exam(&self, id: &str) -> AppResult<Exam> {
        self.record(ApiCall::Get(id.to_string()));
        if self.fail_reads {
            return Err(Self::read_error("/api/exams/:id"));
        }
        self.exams
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::Api(ApiError::BadResponse {
                    endpoint: format!("/api/exams/{}", id),
                    status: 404,
                    message: Some("Exam not found".to_string()),
                })
            })
    }

    async fn create_exam(&self, draft: &ExamDraft) -> AppResult<ApiResponse> {
        self.record(ApiCall::Create(draft.clone()));
        self.next_write()
    }

    async fn update_exam(&self, id: &str, draft: &ExamDraft) -> AppResult<ApiResponse> {
        self.record(ApiCall::Update(id.to_string(), draft.clone()));
        self.next_write()
    }

    async fn delete_exam(&self, id: &str) -> AppResult<ApiResponse> {
        self.record(ApiCall::Delete(id.to_string()));
        self.next_write()
    }
}

pub fn exam(id: &str, name: &str, questions: &[&str]) -> Exam {
    Exam {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        duration: 60,
        questions: questions.iter().map(|q| q.to_string()).collect(),
        created_at: None,
    }
}
