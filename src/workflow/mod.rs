pub mod exam_flow;
pub mod search_flow;

#[cfg(test)]
pub(crate) mod testing;

pub use exam_flow::{ActionOutcome, ExamFlow};
pub use search_flow::SearchFlow;
