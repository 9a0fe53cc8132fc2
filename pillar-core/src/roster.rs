use crate::tag::TagId;

/// 未识别卡片的占位名。
pub const UNKNOWN_NAME: &str = "Unknown";

/// 花名册条目（规范化标签 -> 学生显示名）。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub tag_id: String,
    pub name: String,
}

/// 固定只读花名册：启动时加载，运行期不增删改。
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<StudentRecord>,
}

impl Roster {
    pub fn new(entries: Vec<StudentRecord>) -> Self {
        Self { entries }
    }

    /// 解析 `tag_id,姓名` 行；空行与 `#` 注释忽略，坏行记日志后跳过。
    pub fn parse(source: &str) -> Self {
        let mut entries = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((tag_id, name)) = line.split_once(',') else {
                log::warn!("Roster line {} malformed, skipping: {:?}", idx + 1, raw);
                continue;
            };
            let tag_id = tag_id.trim();
            let name = name.trim();
            if tag_id.is_empty() || name.is_empty() {
                log::warn!("Roster line {} has empty field, skipping", idx + 1);
                continue;
            }
            entries.push(StudentRecord {
                tag_id: tag_id.to_string(),
                name: name.to_string(),
            });
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 线性扫描精确匹配（大小写敏感）；未命中返回 None。
    /// 确定性且无副作用，表规模为几十条，无需索引。
    pub fn resolve(&self, tag: &TagId) -> Option<&str> {
        self.entries
            .iter()
            .find(|record| record.tag_id == tag.as_str())
            .map(|record| record.name.as_str())
    }

    /// 未命中回落到占位名。
    pub fn display_name(&self, tag: &TagId) -> &str {
        self.resolve(tag).unwrap_or(UNKNOWN_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roster {
        Roster::parse(
            "# quiz pillar roster\n\
             b358f627,Student 01\n\
             \n\
             04a1b2c3,Student 02\n\
             malformed line without comma\n\
             ,Nameless\n",
        )
    }

    #[test]
    fn parse_skips_comments_blanks_and_bad_lines() {
        let roster = sample();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn resolve_exact_match() {
        let roster = sample();
        assert_eq!(roster.resolve(&TagId::from_normalized("b358f627")), Some("Student 01"));
        assert_eq!(roster.resolve(&TagId::from_normalized("04a1b2c3")), Some("Student 02"));
    }

    #[test]
    fn resolve_miss_returns_none_and_sentinel() {
        let roster = sample();
        let unknown = TagId::from_normalized("deadbeef");
        assert_eq!(roster.resolve(&unknown), None);
        assert_eq!(roster.display_name(&unknown), UNKNOWN_NAME);
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let roster = sample();
        assert_eq!(roster.resolve(&TagId::from_normalized("B358F627")), None);
    }
}
