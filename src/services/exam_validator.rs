//! 考试表单校验服务 - 业务能力层
//!
//! 只做表单级检查：名称非空、时长为正、至少一道题

use chrono::{SecondsFormat, Utc};

use crate::error::ValidationError;
use crate::models::{ExamDraft, ExamForm};

/// 校验表单并生成提交载荷
///
/// 检查顺序与页面提示顺序一致：名称 → 时长 → 题目
pub fn validate_exam_form(form: &ExamForm) -> Result<ExamDraft, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let duration = parse_duration(&form.duration)?;

    if form.questions.is_empty() {
        return Err(ValidationError::NoQuestionsSelected);
    }

    Ok(ExamDraft {
        name: name.to_string(),
        description: form.description.trim().to_string(),
        duration,
        questions: form.questions.clone(),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

fn parse_duration(raw: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ValidationError::InvalidDuration {
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, duration: &str, questions: &[&str]) -> ExamForm {
        ExamForm {
            name: name.to_string(),
            description: " 第一单元 ".to_string(),
            duration: duration.to_string(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
        }
    }

    #[test]
    fn valid_form_becomes_draft() {
        let draft = validate_exam_form(&form("  单元测验 ", "45", &["1", "2"])).unwrap();
        assert_eq!(draft.name, "单元测验");
        assert_eq!(draft.description, "第一单元");
        assert_eq!(draft.duration, 45);
        assert_eq!(draft.questions, vec!["1", "2"]);
        assert!(draft.created_at.ends_with('Z'));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            validate_exam_form(&form("   ", "45", &["1"])),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn non_positive_or_garbage_duration_is_rejected() {
        for raw in ["0", "-5", "", "abc", "1.5"] {
            let err = validate_exam_form(&form("Quiz", raw, &["1"])).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidDuration { .. }),
                "duration {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn no_selected_questions_is_rejected() {
        assert_eq!(
            validate_exam_form(&form("Quiz", "30", &[])),
            Err(ValidationError::NoQuestionsSelected)
        );
    }
}
