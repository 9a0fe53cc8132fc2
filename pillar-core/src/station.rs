use crate::display::{Screen, StatusDisplay};
use crate::model::{StationSettings, SubjectPolicy};
use crate::net::NetLink;
use crate::reader::TagReader;
use crate::report::Reporter;
use crate::roster::Roster;

/// 回绕安全的毫秒差值：计数器溢出后无符号减法仍然正确。
fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// 控制器可变状态：各时间戳与"结果展示中"标志。
/// 仅由单循环线程修改，不跨线程共享。
#[derive(Clone, Debug)]
pub struct ControllerState {
    pub last_read_ms: u32,
    pub last_display_ms: u32,
    pub showing_result: bool,
    pub last_net_check_ms: u32,
}

impl ControllerState {
    /// 初始状态：冷却视为已过（开机后第一次刷卡立即生效），
    /// 网络检查从当前时刻起算。
    fn bootstrap(now_ms: u32, cooldown_ms: u32) -> Self {
        Self {
            last_read_ms: now_ms.wrapping_sub(cooldown_ms),
            last_display_ms: now_ms,
            showing_result: false,
            last_net_check_ms: now_ms,
        }
    }
}

/// 站点控制器：串联 读卡 -> 识别 -> 上报 -> 显示，
/// 并持有全部计时状态与注入的硬件句柄。
pub struct StationController<R, D, P, N> {
    settings: StationSettings,
    roster: Roster,
    reader: R,
    display: D,
    reporter: P,
    net: N,
    state: ControllerState,
}

impl<R, D, P, N> StationController<R, D, P, N>
where
    R: TagReader,
    D: StatusDisplay,
    P: Reporter,
    N: NetLink,
{
    /// 注入全部资源句柄并进入待机画面。
    pub fn new(
        settings: StationSettings,
        roster: Roster,
        reader: R,
        display: D,
        reporter: P,
        net: N,
        now_ms: u32,
    ) -> Self {
        let state = ControllerState::bootstrap(now_ms, settings.cooldown_ms);
        let mut controller = Self {
            settings,
            roster,
            reader,
            display,
            reporter,
            net,
            state,
        };
        Screen::ready(controller.settings.station).present(&mut controller.display);
        controller
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// 单轮循环：刷卡优先，其次显示超时，最后网络健康。
    /// 除同步上报调用外各步骤均不阻塞。
    pub fn tick(&mut self, now_ms: u32) {
        self.service_card(now_ms);
        self.service_display(now_ms);
        self.service_network(now_ms);
    }

    fn service_card(&mut self, now: u32) {
        if !self.reader.card_present() {
            return;
        }
        if elapsed_ms(now, self.state.last_read_ms) < self.settings.cooldown_ms {
            // 冷却期内仅做硬件应答，保证下一张卡仍可被探测
            self.reader.release();
            return;
        }
        let tag = match self.reader.read_serial() {
            Ok(tag) => tag,
            Err(err) => {
                log::warn!("Card read failed: {}", err);
                self.reader.release();
                return;
            }
        };
        self.reader.release();
        self.state.last_read_ms = now;
        log::info!("Card detected: {}", tag);

        let subject = match self.settings.subject_policy {
            SubjectPolicy::StudentName => match self.roster.resolve(&tag) {
                Some(name) => name.to_string(),
                None => {
                    // 公认的终态而非错误：不上报，不切换状态机
                    log::info!("Tag {} not in roster", tag);
                    Screen::unknown_card(&tag).present(&mut self.display);
                    return;
                }
            },
            SubjectPolicy::RawTagId => tag.as_str().to_string(),
        };
        self.submit_report(&subject, now);
    }

    /// 同步上报并根据结果切换显示；失败不武装结果计时器，
    /// 错误画面保留到下一次刷卡或外部触发。
    fn submit_report(&mut self, subject: &str, now: u32) {
        Screen::processing(subject).present(&mut self.display);
        match self.reporter.send(subject, self.settings.station) {
            Ok(status) => {
                log::info!("Report ok ({}): {}", status, subject);
                Screen::success(subject).present(&mut self.display);
                self.state.showing_result = true;
                self.state.last_display_ms = now;
            }
            Err(err) => {
                log::warn!("Report failed for {}: {}", subject, err);
                Screen::report_error(&err).present(&mut self.display);
                self.state.showing_result = false;
            }
        }
    }

    fn service_display(&mut self, now: u32) {
        if !self.state.showing_result {
            return;
        }
        if elapsed_ms(now, self.state.last_display_ms) > self.settings.display_timeout_ms {
            self.state.showing_result = false;
            Screen::ready(self.settings.station).present(&mut self.display);
        }
    }

    fn service_network(&mut self, now: u32) {
        if elapsed_ms(now, self.state.last_net_check_ms) < self.settings.net_check_interval_ms {
            return;
        }
        self.state.last_net_check_ms = now;
        if self.net.is_connected() {
            return;
        }
        log::warn!("Network link down, reconnecting");
        Screen::reconnecting().present(&mut self.display);
        match self.net.reconnect() {
            Ok(()) => {
                log::info!("Network link restored");
                self.state.showing_result = false;
                Screen::ready(self.settings.station).present(&mut self.display);
            }
            Err(err) => {
                log::warn!("Reconnect failed: {}", err);
            }
        }
    }
}
