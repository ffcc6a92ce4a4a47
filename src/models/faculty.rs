use std::fmt::Display;

/// 表格中的一行：教师姓名 + Google Scholar 主页链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyRecord {
    pub name: String,
    pub profile_url: String,
}

impl FacultyRecord {
    pub fn new(name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: profile_url.into(),
        }
    }
}

impl Display for FacultyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 读取完成的教师名单
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub records: Vec<FacultyRecord>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 数据源中作者的不透明标识（URL 中的 `user` 参数）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// 空字符串不是合法标识
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 该作者的 Scholar 主页链接，所有输出记录都指向它
    pub fn profile_link(&self) -> String {
        format!("https://scholar.google.com/citations?user={}", self.0)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
