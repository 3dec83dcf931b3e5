use serde::{Deserialize, Deserializer, Serialize};

/// 考试（服务端为唯一数据源，客户端只做展示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    /// 时长（分钟）
    #[serde(alias = "duration_minutes", default)]
    pub duration: i64,
    /// 题目 ID 列表
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub questions: Vec<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}

/// 创建/更新考试时提交的载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamDraft {
    pub name: String,
    pub description: String,
    pub duration: i64,
    pub questions: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// `GET /api/exams` 的返回
///
/// 服务端可能附带分页字段，这里只保留 `exams`
#[derive(Debug, Clone, Deserialize)]
pub struct ExamList {
    #[serde(default)]
    pub exams: Vec<Exam>,
}

/// 写操作（创建/更新/删除）的通用返回
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

/// `GET /health` 的返回
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ID 既可能是字符串也可能是整数，统一转为字符串
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdVisitor)
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "deserialize_id")] String);

    let ids: Option<Vec<Id>> = Option::deserialize(deserializer)?;
    Ok(ids.unwrap_or_default().into_iter().map(|Id(id)| id).collect())
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

struct IdVisitor;

impl<'de> serde::de::Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string or integer id")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }
}
