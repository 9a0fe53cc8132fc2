use core::fmt;

/// 网络链路错误（驱动层细节以字符串形式携带）。
#[derive(Clone, Debug)]
pub enum NetError {
    Driver(String),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Driver(detail) => write!(f, "link driver error: {}", detail),
        }
    }
}

/// 网络健康能力：查询关联状态并触发重连。
pub trait NetLink {
    fn is_connected(&self) -> bool;

    /// 尝试重新关联接入点；阻塞时间由实现自身限定。
    fn reconnect(&mut self) -> Result<(), NetError>;
}
