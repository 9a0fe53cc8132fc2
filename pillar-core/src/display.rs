use crate::model::StationLabel;
use crate::report::ReportError;
use crate::tag::TagId;

/// 双行状态显示能力：每次调用整屏覆盖，无队列无局部刷新。
pub trait StatusDisplay {
    /// 清屏后第 0 行写 line1；line2 非空时写入第 1 行。
    fn show(&mut self, line1: &str, line2: &str);
}

/// 一屏内容（两行短文本）。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub line1: String,
    pub line2: String,
}

impl Screen {
    fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// 开机画面。
    pub fn boot(station: StationLabel) -> Self {
        Self::new("Quiz Pillar", format!("Pillar {}", station))
    }

    /// 待机画面。
    pub fn ready(station: StationLabel) -> Self {
        Self::new("Ready", format!("Pillar {}", station))
    }

    /// 上报进行中（同步调用期间的瞬时画面）。
    pub fn processing(subject: &str) -> Self {
        Self::new("Processing...", subject)
    }

    /// 上报成功。
    pub fn success(subject: &str) -> Self {
        Self::new("Success!", subject)
    }

    /// 卡片不在花名册中：显示原始卡号，便于登记。
    pub fn unknown_card(tag: &TagId) -> Self {
        Self::new("Unknown Card", tag.as_str())
    }

    /// 上报失败画面；服务端状态码直接展示。
    pub fn report_error(err: &ReportError) -> Self {
        match err {
            ReportError::Disconnected => Self::new("No Network", "Check WiFi"),
            ReportError::Status(code) => Self::new("Send Failed", format!("HTTP {}", code)),
            ReportError::Transport(_) => Self::new("Send Failed", "Try Again"),
        }
    }

    /// 网络重连提示。
    pub fn reconnecting() -> Self {
        Self::new("Reconnecting", "WiFi...")
    }

    /// 读卡器自检失败（降级运行）。
    pub fn reader_fault() -> Self {
        Self::new("Reader Fault", "Check Wiring")
    }

    /// 推送到显示设备。
    pub fn present<D: StatusDisplay + ?Sized>(&self, display: &mut D) {
        display.show(&self.line1, &self.line2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_names_the_pillar() {
        let screen = Screen::ready(StationLabel::A);
        assert_eq!(screen.line1, "Ready");
        assert_eq!(screen.line2, "Pillar A");
    }

    #[test]
    fn server_failure_shows_status_code() {
        let screen = Screen::report_error(&ReportError::Status(502));
        assert_eq!(screen.line1, "Send Failed");
        assert_eq!(screen.line2, "HTTP 502");
    }

    #[test]
    fn transport_failure_stays_generic() {
        let screen = Screen::report_error(&ReportError::Transport("timeout".into()));
        assert_eq!(screen.line2, "Try Again");
    }

    #[test]
    fn unknown_card_surfaces_raw_id() {
        let screen = Screen::unknown_card(&TagId::from_normalized("deadbeef"));
        assert_eq!(screen.line1, "Unknown Card");
        assert_eq!(screen.line2, "deadbeef");
    }
}
