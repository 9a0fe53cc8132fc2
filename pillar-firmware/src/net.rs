use core::convert::TryInto;
use std::sync::{Arc, Mutex};

use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_hal::modem::Modem;
use esp_idf_hal::sys::EspError;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use pillar_core::net::{NetError, NetLink};

pub type SharedWifi = Arc<Mutex<BlockingWifi<EspWifi<'static>>>>;

/// Wi-Fi 链路句柄：控制器（健康检查）与上报器（连接前置判断）
/// 共享同一驱动。
#[derive(Clone)]
pub struct WifiLink {
    wifi: SharedWifi,
    ssid: String,
}

impl WifiLink {
    /// 构建并启动 Wi-Fi 驱动（尚未关联接入点）。
    pub fn new(modem: Modem, ssid: &str, pass: &str) -> Result<Self, EspError> {
        let sys_loop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take().ok();
        let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), nvs)?, sys_loop)?;

        let auth_method = if pass.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let configuration: Configuration = Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().unwrap(),
            bssid: None,
            auth_method,
            password: pass.try_into().unwrap(),
            channel: None,
            ..Default::default()
        });

        wifi.set_configuration(&configuration)?;
        wifi.start()?;
        log::info!("Wi-Fi started");

        Ok(Self {
            wifi: Arc::new(Mutex::new(wifi)),
            ssid: ssid.to_string(),
        })
    }

    /// 关联接入点并等待网络就绪（esp-idf 内部超时上限，约 30s）。
    pub fn connect(&mut self) -> Result<(), EspError> {
        if let Ok(mut wifi) = self.wifi.lock() {
            wifi.connect()?;
            log::info!("Wi-Fi connected to {}", self.ssid);
            wifi.wait_netif_up()?;
            log::info!("Wi-Fi netif up");
        }
        Ok(())
    }
}

impl NetLink for WifiLink {
    fn is_connected(&self) -> bool {
        self.wifi
            .lock()
            .map(|wifi| wifi.is_connected().unwrap_or(false))
            .unwrap_or(false)
    }

    fn reconnect(&mut self) -> Result<(), NetError> {
        let Ok(mut wifi) = self.wifi.lock() else {
            return Err(NetError::Driver("wifi handle unavailable".to_string()));
        };
        wifi.connect().map_err(driver_err)?;
        wifi.wait_netif_up().map_err(driver_err)?;
        log::info!("Wi-Fi re-associated to {}", self.ssid);
        Ok(())
    }
}

fn driver_err(err: EspError) -> NetError {
    NetError::Driver(format!("{:?}", err))
}
