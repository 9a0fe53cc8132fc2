// 答题柱固件的纯逻辑核心：数据模型、花名册、编码、能力契约与站点状态机。
// 硬件实现（MFRC522 / SSD1306 / Wi-Fi / HTTP）在 pillar-firmware 中注入。
pub mod display;
pub mod model;
pub mod net;
pub mod reader;
pub mod report;
pub mod roster;
pub mod station;
pub mod tag;
