//! The relay core: extract markdown from a service-hook payload and post it
//! to a chat robot.

pub mod message;
pub mod sender;
pub mod service;

pub use message::{MarkdownContent, OutboundChatMessage, extract_markdown};
pub use sender::{ChatSender, DeliveryError, DeliveryReceipt, WeComWebhookSender};
pub use service::{NotificationRelay, RelayOutcome};
