use core::fmt;
use core::fmt::Write as _;

/// 标签 UID 的规范化表示：按扫描顺序逐字节两位小写十六进制。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagId(String);

impl TagId {
    /// 由读卡器返回的字节序列构造（0x05 -> "05"，左侧补零）。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut out = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(out, "{:02x}", byte);
        }
        Self(out)
    }

    /// 直接采用已规范化的字符串（花名册/测试用）。
    pub fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_render_zero_padded_lowercase() {
        assert_eq!(TagId::from_bytes(&[0x05]).as_str(), "05");
        assert_eq!(TagId::from_bytes(&[0x0b]).as_str(), "0b");
        assert_eq!(TagId::from_bytes(&[0xb3, 0x58, 0xf6, 0x27]).as_str(), "b358f627");
        assert_eq!(TagId::from_bytes(&[0x00, 0xff]).as_str(), "00ff");
    }

    #[test]
    fn length_is_twice_the_byte_count() {
        for len in 4..=10usize {
            let bytes: Vec<u8> = (0..len as u8).collect();
            let tag = TagId::from_bytes(&bytes);
            assert_eq!(tag.as_str().len(), len * 2);
            assert!(tag.as_str().chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(tag.as_str(), tag.as_str().to_lowercase());
        }
    }

    #[test]
    fn each_byte_round_trips() {
        let bytes = [0x00u8, 0x0b, 0x7f, 0x80, 0xff];
        let tag = TagId::from_bytes(&bytes);
        let decoded: Vec<u8> = tag
            .as_str()
            .as_bytes()
            .chunks(2)
            .map(|pair| u8::from_str_radix(core::str::from_utf8(pair).unwrap(), 16).unwrap())
            .collect();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn equality_is_exact_string_match() {
        assert_eq!(TagId::from_bytes(&[0xb3]), TagId::from_normalized("b3"));
        assert_ne!(TagId::from_normalized("B3"), TagId::from_normalized("b3"));
    }
}
