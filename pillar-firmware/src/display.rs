use embedded_graphics::mono_font::ascii::FONT_9X18;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use esp_idf_hal::i2c::I2cDriver;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use pillar_core::display::StatusDisplay;

type Oled<'d> = Ssd1306<
    I2CInterface<I2cDriver<'d>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

// 两行文本的基线位置（FONT_9X18，128x64 上下各一行）
const LINE1_BASELINE: i32 = 24;
const LINE2_BASELINE: i32 = 48;

/// SSD1306 双行状态屏。
pub struct OledStatusDisplay<'d> {
    disp: Oled<'d>,
}

impl<'d> OledStatusDisplay<'d> {
    /// 初始化 I2C OLED 并清屏。初始化失败记日志后降级运行
    /// （后续绘制调用同样只记日志）。
    pub fn new(i2c: I2cDriver<'d>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut disp = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if let Err(err) = disp.init() {
            log::error!("OLED init failed: {:?}", err);
        }
        let _ = disp.clear(BinaryColor::Off);
        if let Err(err) = disp.flush() {
            log::warn!("OLED flush failed: {:?}", err);
        }
        Self { disp }
    }
}

impl StatusDisplay for OledStatusDisplay<'_> {
    /// 整屏覆盖：清屏、写两行、刷新。绘制失败记日志，不向状态机传播。
    fn show(&mut self, line1: &str, line2: &str) {
        let style = MonoTextStyle::new(&FONT_9X18, BinaryColor::On);
        // BufferedGraphicsMode 的绘制错误类型为 Infallible
        let _ = self.disp.clear(BinaryColor::Off);
        let _ = Text::new(line1, Point::new(0, LINE1_BASELINE), style).draw(&mut self.disp);
        if !line2.is_empty() {
            let _ = Text::new(line2, Point::new(0, LINE2_BASELINE), style).draw(&mut self.disp);
        }
        if let Err(err) = self.disp.flush() {
            log::warn!("OLED flush failed: {:?}", err);
        }
    }
}
