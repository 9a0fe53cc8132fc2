use std::time::Duration;

use embedded_svc::http::client::Client as HttpClient;
use embedded_svc::http::Method;
use embedded_svc::io::Read as _;
use esp_idf_hal::sys::EspError;
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
use esp_idf_svc::io::EspIOError;

use pillar_core::model::{StationLabel, SubjectPolicy};
use pillar_core::net::NetLink;
use pillar_core::report::{report_url, ReportError, Reporter};

use crate::net::WifiLink;

// 单次上报的传输超时
const REPORT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP 上报器：每次刷卡一条 GET，响应体只记日志不解析。
pub struct HttpReporter {
    wifi: WifiLink,
    base_url: String,
    policy: SubjectPolicy,
    skip_tls_verify: bool,
}

impl HttpReporter {
    pub fn new(
        wifi: WifiLink,
        base_url: impl Into<String>,
        policy: SubjectPolicy,
        skip_tls_verify: bool,
    ) -> Self {
        if skip_tls_verify {
            // 刻意保留的弱化开关（DANGER_SKIP_TLS_VERIFY），部署者必须知情
            log::warn!("TLS certificate validation DISABLED by configuration");
        }
        Self {
            wifi,
            base_url: base_url.into(),
            policy,
            skip_tls_verify,
        }
    }

    fn http_config(&self) -> HttpConfiguration {
        HttpConfiguration {
            timeout: Some(REPORT_TIMEOUT),
            // 不挂证书束即跳过服务端校验（原设备行为）；默认挂系统证书束
            crt_bundle_attach: if self.skip_tls_verify {
                None
            } else {
                Some(esp_idf_svc::sys::esp_crt_bundle_attach)
            },
            ..Default::default()
        }
    }
}

impl Reporter for HttpReporter {
    fn send(&mut self, subject: &str, station: StationLabel) -> Result<u16, ReportError> {
        // 前置条件：链路未连接则立即失败，不做网络 IO
        if !self.wifi.is_connected() {
            return Err(ReportError::Disconnected);
        }

        let url = report_url(&self.base_url, self.policy, subject, station);
        log::info!("Reporting to {}", url);

        let connection = EspHttpConnection::new(&self.http_config()).map_err(esp_transport)?;
        let mut client = HttpClient::wrap(connection);
        let headers = [("accept", "text/plain")];
        let request = client
            .request(Method::Get, &url, &headers)
            .map_err(io_transport)?;
        let mut response = request.submit().map_err(io_transport)?;
        let status = response.status();

        match read_response_body(&mut response) {
            Ok(body) if !body.is_empty() => {
                log::info!(
                    "Report response ({}): {}",
                    status,
                    String::from_utf8_lossy(&body)
                );
            }
            Ok(_) => log::info!("Report response status {}", status),
            Err(err) => log::warn!("Report response read failed: {:?}", err),
        }

        if status != 200 {
            return Err(ReportError::Status(status));
        }
        Ok(status)
    }
}

/// 流式读取响应体。
fn read_response_body(
    response: &mut embedded_svc::http::client::Response<&mut EspHttpConnection>,
) -> Result<Vec<u8>, EspIOError> {
    let mut body = Vec::new();
    let mut buf = [0u8; 256];
    loop {
        let len = response.read(&mut buf)?;
        if len == 0 {
            break;
        }
        body.extend_from_slice(&buf[..len]);
    }
    Ok(body)
}

fn esp_transport(err: EspError) -> ReportError {
    ReportError::Transport(format!("{:?}", err))
}

fn io_transport(err: EspIOError) -> ReportError {
    ReportError::Transport(format!("{:?}", err))
}
