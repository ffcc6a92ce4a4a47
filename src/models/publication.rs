use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// 数据源返回的原始论文条目
///
/// 字段是否存在完全取决于数据源，所以全部是 Option。
/// 进入系统后立即经 [`PublicationRecord::from_raw`] 补齐默认值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPublication {
    #[serde(default)]
    pub bib: RawBib,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_citations: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBib {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// 发表年份：整数，或原样保留的非数字值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Known(i64),
    Raw(String),
}

impl Year {
    /// 解析单个字段值，空值返回 None 以便尝试下一个字段
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if s.bytes().all(|b| b.is_ascii_digit()) {
                    Some(
                        s.parse::<i64>()
                            .map(Year::Known)
                            .unwrap_or_else(|_| Year::Raw(s.to_string())),
                    )
                } else {
                    Some(Year::Raw(s.to_string()))
                }
            }
            Value::Number(n) => match n.as_i64() {
                Some(0) => None,
                Some(y) => Some(Year::Known(y)),
                None => Some(Year::Raw(n.to_string())),
            },
            _ => None,
        }
    }

    /// 排序用：已知年份在前，非数字年份排在所有已知年份（包括 0）之后
    fn rank(&self) -> Option<i64> {
        match self {
            Year::Known(y) => Some(*y),
            Year::Raw(_) => None,
        }
    }
}

impl Default for Year {
    fn default() -> Self {
        Year::Known(0)
    }
}

/// 规范化后的论文记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRecord {
    pub title: String,
    pub journal: String,
    pub year: Year,
    pub citations: u64,
    pub link: String,
}

impl PublicationRecord {
    /// 按字段优先级补齐默认值
    ///
    /// - 年份: `pub_year` → `year` → 0
    /// - 期刊: `venue` → `journal` → `publisher` → ""
    /// - 引用数: 整数或纯数字字符串，否则 0
    pub fn from_raw(raw: &RawPublication, link: &str) -> Self {
        let bib = &raw.bib;

        let year = [&bib.pub_year, &bib.year]
            .into_iter()
            .flatten()
            .find_map(Year::from_value)
            .unwrap_or_default();

        let journal = [&bib.venue, &bib.journal, &bib.publisher]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
            .to_string();

        let title = bib
            .title
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("N/A")
            .to_string();

        Self {
            title,
            journal,
            year,
            citations: raw.num_citations.as_ref().map(citations_from_value).unwrap_or(0),
            link: link.to_string(),
        }
    }

    /// 年份降序比较；相等时返回 Equal，由稳定排序保留抓取顺序
    pub fn cmp_year_desc(&self, other: &Self) -> Ordering {
        other.year.rank().cmp(&self.year.rank())
    }
}

fn citations_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// 输出 JSON 中的一条记录（教师姓名 + 一篇论文）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Faculty Name")]
    pub faculty_name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Journal")]
    pub journal: String,
    #[serde(rename = "Year")]
    pub year: Year,
    #[serde(rename = "Citations")]
    pub citations: u64,
    #[serde(rename = "Link")]
    pub link: String,
}

impl OutputRecord {
    pub fn new(faculty_name: &str, publication: PublicationRecord) -> Self {
        Self {
            faculty_name: faculty_name.to_string(),
            title: publication.title,
            journal: publication.journal,
            year: publication.year,
            citations: publication.citations,
            link: publication.link,
        }
    }
}
