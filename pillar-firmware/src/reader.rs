use mfrc522::comm::Interface;
use mfrc522::{AtqA, Initialized, Mfrc522};

use pillar_core::reader::{ReaderError, TagReader};
use pillar_core::tag::TagId;

/// MFRC522 读卡器封装（SPI）。初始化失败进入降级模式：
/// 探测恒为否，主循环照常运行。
pub struct PillarReader<COMM: Interface> {
    rfid: Option<Mfrc522<COMM, Initialized>>,
    pending: Option<AtqA>,
}

impl<COMM: Interface> PillarReader<COMM> {
    pub fn new(comm: COMM) -> Self {
        match Mfrc522::new(comm).init() {
            Ok(rfid) => Self {
                rfid: Some(rfid),
                pending: None,
            },
            Err(err) => {
                log::error!("MFRC522 init failed: {:?}", err);
                Self {
                    rfid: None,
                    pending: None,
                }
            }
        }
    }

    /// 自检：读版本寄存器，确认芯片在位且 SPI 通路正常。
    pub fn self_test(&mut self) -> Result<u8, ReaderError> {
        let rfid = self
            .rfid
            .as_mut()
            .ok_or_else(|| ReaderError::Protocol("init failed".to_string()))?;
        rfid.version()
            .map_err(|err| ReaderError::Protocol(format!("{:?}", err)))
    }
}

impl<COMM: Interface> TagReader for PillarReader<COMM> {
    fn card_present(&mut self) -> bool {
        let Some(rfid) = self.rfid.as_mut() else {
            return false;
        };
        // REQA 只唤醒新进场的卡；HLTA 过的卡保持静默
        match rfid.reqa() {
            Ok(atqa) => {
                self.pending = Some(atqa);
                true
            }
            Err(_) => {
                self.pending = None;
                false
            }
        }
    }

    fn read_serial(&mut self) -> Result<TagId, ReaderError> {
        let rfid = self.rfid.as_mut().ok_or(ReaderError::NotPresent)?;
        let atqa = self.pending.take().ok_or(ReaderError::NotPresent)?;
        let uid = rfid
            .select(&atqa)
            .map_err(|err| ReaderError::Protocol(format!("{:?}", err)))?;
        Ok(TagId::from_bytes(uid.as_bytes()))
    }

    fn release(&mut self) {
        self.pending = None;
        if let Some(rfid) = self.rfid.as_mut() {
            if let Err(err) = rfid.hlta() {
                log::debug!("HLTA failed: {:?}", err);
            }
        }
    }
}
