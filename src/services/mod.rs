pub mod debouncer;
pub mod exam_validator;
pub mod html_renderer;
pub mod search_filter;

pub use debouncer::{wait_deadline, Debouncer};
pub use exam_validator::validate_exam_form;
pub use html_renderer::{escape_html, no_results_notice, render_exam_list, Banner, BannerKind};
pub use search_filter::{FilterOutcome, SearchFilter};
