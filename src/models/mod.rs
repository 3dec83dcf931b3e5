pub mod event;
pub mod exam;
pub mod form;
pub mod item;

pub use event::UiEvent;
pub use exam::{ApiResponse, Exam, ExamDraft, ExamList, HealthStatus};
pub use form::ExamForm;
pub use item::RenderedItem;
