use core::fmt;
use core::fmt::Write as _;

use crate::model::{StationLabel, SubjectPolicy};

/// 上报失败分类。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// 网络未连接，未发起任何请求。
    Disconnected,
    /// 传输层失败（建连 / 超时 / 读写）。
    Transport(String),
    /// 服务端返回非 200 状态。
    Status(u16),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Disconnected => write!(f, "network disconnected"),
            ReportError::Transport(detail) => write!(f, "transport failure: {}", detail),
            ReportError::Status(code) => write!(f, "server returned HTTP {}", code),
        }
    }
}

/// 上报能力：单次 GET，成功返回 HTTP 状态码（恒为 200）。
/// 前置条件：网络未连接时立即返回 Disconnected，不做网络 IO。
pub trait Reporter {
    fn send(&mut self, subject: &str, station: StationLabel) -> Result<u16, ReportError>;
}

/// RFC 3986 非保留集百分号编码：字母数字与 `-_.~` 原样通过，
/// 其余字节编码为 `%` + 两位大写十六进制（空格 -> %20，不用 +）。
pub fn url_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// 构造上报 URL：`<base>?<student|tag_id>=<subject>&option=<station>`。
pub fn report_url(
    base_url: &str,
    policy: SubjectPolicy,
    subject: &str,
    station: StationLabel,
) -> String {
    format!(
        "{}?{}={}&option={}",
        base_url,
        policy.query_key(),
        url_encode(subject),
        url_encode(station.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 标准百分号解码（仅测试用）。
    fn percent_decode(value: &str) -> String {
        let bytes = value.as_bytes();
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hex = core::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
                out.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unreserved_passes_through() {
        let input = "AZaz09-_.~";
        assert_eq!(url_encode(input), input);
    }

    #[test]
    fn encoding_is_idempotent_on_unreserved() {
        let input = "Student01.name~x_y-z";
        assert_eq!(url_encode(&url_encode(input)), url_encode(input));
    }

    #[test]
    fn space_becomes_percent_20_not_plus() {
        assert_eq!(url_encode("Student 01"), "Student%2001");
    }

    #[test]
    fn reserved_bytes_use_uppercase_hex() {
        assert_eq!(url_encode("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        assert_eq!(url_encode("\x0b"), "%0B");
    }

    #[test]
    fn multibyte_utf8_encodes_per_byte() {
        assert_eq!(url_encode("é"), "%C3%A9");
    }

    #[test]
    fn decode_round_trips() {
        for input in ["Student 01", "a/b&c=d", "100% sûr", "plain"] {
            assert_eq!(percent_decode(&url_encode(input)), input);
        }
    }

    #[test]
    fn report_url_for_name_variant() {
        let url = report_url(
            "https://quiz.example.com/receive_data",
            SubjectPolicy::StudentName,
            "Student 01",
            StationLabel::A,
        );
        assert_eq!(
            url,
            "https://quiz.example.com/receive_data?student=Student%2001&option=A"
        );
    }

    #[test]
    fn report_url_for_raw_variant() {
        let url = report_url(
            "https://quiz.example.com/receive_data",
            SubjectPolicy::RawTagId,
            "b358f627",
            StationLabel::C,
        );
        assert_eq!(
            url,
            "https://quiz.example.com/receive_data?tag_id=b358f627&option=C"
        );
    }
}
