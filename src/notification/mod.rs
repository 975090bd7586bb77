//! 回合结束通知 - 判定渠道、格式化内容并发送
//!
//! # 模块
//! 1. `markdown`：把 markdown 扁平化为纯文本行
//! 2. `transcript`：从回合事件中提取最后一条助手消息
//! 3. `formatter`：生成有长度上限的标题 + 正文
//! 4. `channel`：判定 tmux / 桌面通知，以及是否静默
//! 5. `dispatcher`：串起以上步骤并执行发送
//!
//! # 使用示例
//! ```ignore
//! use pi_notify::config::NotifyConfig;
//! use pi_notify::notification::{NotificationDispatcher, TurnEvent};
//!
//! let event = TurnEvent::parse(&input)?;
//! let dispatcher = NotificationDispatcher::from_config(&NotifyConfig::load());
//! dispatcher.dispatch(&event.messages);
//! ```

pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod formatter;
pub mod markdown;
pub mod transcript;

pub use channel::{ChannelContext, ChannelResolver, ChannelState, Route};
pub use channels::{DesktopChannel, NotificationChannel, SendResult, TmuxChannel};
pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use formatter::{format_notification, MessageFormatter, NotificationContent};
pub use markdown::flatten_markdown;
pub use transcript::{extract_last_assistant_text, AgentMessage, ContentPart, MessageContent, TurnEvent};
