use core::fmt;

/// 站点标签：本设备代表的答题选项（上报时作为 option 参数）。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StationLabel {
    A,
    B,
    C,
    D,
}

impl StationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationLabel::A => "A",
            StationLabel::B => "B",
            StationLabel::C => "C",
            StationLabel::D => "D",
        }
    }

    /// 解析配置值（大小写不敏感）。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(StationLabel::A),
            "B" | "b" => Some(StationLabel::B),
            "C" | "c" => Some(StationLabel::C),
            "D" | "d" => Some(StationLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for StationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上报主体策略（设备变体）：按花名册上报姓名，或直接上报原始卡号。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectPolicy {
    StudentName,
    RawTagId,
}

impl SubjectPolicy {
    /// 上报 URL 中对应的查询参数名。
    pub fn query_key(&self) -> &'static str {
        match self {
            SubjectPolicy::StudentName => "student",
            SubjectPolicy::RawTagId => "tag_id",
        }
    }

    /// 解析配置值（lookup / raw）。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "lookup" => Some(SubjectPolicy::StudentName),
            "raw" => Some(SubjectPolicy::RawTagId),
            _ => None,
        }
    }
}

/// 站点运行参数（可配置项）。
#[derive(Clone, Debug)]
pub struct StationSettings {
    pub station: StationLabel,
    pub subject_policy: SubjectPolicy,
    /// 两次有效刷卡之间的最短间隔。
    pub cooldown_ms: u32,
    /// 成功画面保留时长，超时后回到待机。
    pub display_timeout_ms: u32,
    /// 网络健康检查周期。
    pub net_check_interval_ms: u32,
}

impl StationSettings {
    /// 使用指定站点标签构建默认参数。
    pub fn with_station(station: StationLabel) -> Self {
        Self {
            station,
            subject_policy: SubjectPolicy::StudentName,
            cooldown_ms: 2_000,
            display_timeout_ms: 5_000,
            net_check_interval_ms: 30_000,
        }
    }
}

impl Default for StationSettings {
    fn default() -> Self {
        Self::with_station(StationLabel::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_label_parse_is_case_insensitive() {
        assert_eq!(StationLabel::parse("a"), Some(StationLabel::A));
        assert_eq!(StationLabel::parse(" D "), Some(StationLabel::D));
        assert_eq!(StationLabel::parse("E"), None);
        assert_eq!(StationLabel::parse(""), None);
    }

    #[test]
    fn subject_policy_query_keys() {
        assert_eq!(SubjectPolicy::StudentName.query_key(), "student");
        assert_eq!(SubjectPolicy::RawTagId.query_key(), "tag_id");
        assert_eq!(SubjectPolicy::parse("lookup"), Some(SubjectPolicy::StudentName));
        assert_eq!(SubjectPolicy::parse("raw"), Some(SubjectPolicy::RawTagId));
        assert_eq!(SubjectPolicy::parse("other"), None);
    }
}
