mod content;
mod notification;

pub use content::{Format, GeneratedContent, GenerationRequest, GenerationStatus, Tone};
pub use notification::{Notification, NotificationLevel};
