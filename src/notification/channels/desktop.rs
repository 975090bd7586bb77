//! 桌面通知渠道 - 向标准输出写 OSC 777 转义序列

use anyhow::Result;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::debug;

use super::{NotificationChannel, SendResult};
use crate::notification::formatter::NotificationContent;

/// 生成 OSC 777 通知序列：ESC ] 777 ; notify ; <title> ; <body> BEL
pub fn osc777_sequence(title: &str, body: &str) -> String {
    format!(
        "\x1b]777;notify;{};{}\x07",
        strip_control(title),
        strip_control(body)
    )
}

/// 去掉控制字符，避免 ESC/BEL 提前结束序列
fn strip_control(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// 桌面通知渠道
pub struct DesktopChannel {
    out: Mutex<Box<dyn Write + Send>>,
}

impl DesktopChannel {
    /// 写到进程标准输出
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Default for DesktopChannel {
    fn default() -> Self {
        Self::stdout()
    }
}

impl NotificationChannel for DesktopChannel {
    fn name(&self) -> &str {
        "desktop"
    }

    fn send(&self, content: &NotificationContent) -> Result<SendResult> {
        let sequence = osc777_sequence(&content.title, &content.body);
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("desktop writer lock poisoned"))?;
        out.write_all(sequence.as_bytes())?;
        out.flush()?;
        debug!(channel = "desktop", title = %content.title, "OSC 777 notification written");
        Ok(SendResult::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_osc777_sequence() {
        assert_eq!(
            osc777_sequence("π", "Done. All tests pass."),
            "\x1b]777;notify;π;Done. All tests pass.\x07"
        );
    }

    #[test]
    fn test_control_chars_are_stripped() {
        assert_eq!(
            osc777_sequence("t\x07", "a\x1b]b"),
            "\x1b]777;notify;t;a]b\x07"
        );
    }

    #[test]
    fn test_send_writes_sequence() {
        let buf = SharedBuf::default();
        let channel = DesktopChannel::with_writer(Box::new(buf.clone()));

        let result = channel
            .send(&NotificationContent::new("Ready for input", ""))
            .unwrap();

        assert_eq!(result, SendResult::Sent);
        assert_eq!(
            String::from_utf8(buf.0.lock().unwrap().clone()).unwrap(),
            "\x1b]777;notify;Ready for input;\x07"
        );
    }
}
