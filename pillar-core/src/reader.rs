use core::fmt;

use crate::tag::TagId;

/// 读卡失败分类。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReaderError {
    /// 未确认在位即读取序列号。
    NotPresent,
    /// 底层协议交互失败（SELECT / 通信错误）。
    Protocol(String),
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::NotPresent => write!(f, "no card present"),
            ReaderError::Protocol(detail) => write!(f, "reader protocol error: {}", detail),
        }
    }
}

/// 读卡能力契约：探测在位、读取 UID、释放卡片。
pub trait TagReader {
    /// 非阻塞轮询是否有卡在位。
    fn card_present(&mut self) -> bool;

    /// 读取卡片序列号，仅在刚确认在位后有效。
    fn read_serial(&mut self) -> Result<TagId, ReaderError>;

    /// 释放卡片。每次成功读取后必须调用，否则读卡器保持占用，
    /// 无法探测下一张卡。
    fn release(&mut self);
}
