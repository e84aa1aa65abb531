// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

pub const MSG_INCOMPLETE_FORM: &str = "กรุณากรอกข้อมูลให้ครบถ้วน";
pub const MSG_SAVED: &str = "บันทึกรายการสำเร็จ!";
pub const MSG_SAVE_FAILED: &str = "เกิดข้อผิดพลาดในการบันทึก";
pub const MSG_DELETED: &str = "ลบรายการสำเร็จ";
pub const MSG_CLEARED: &str = "ลบรายการทั้งหมดสำเร็จ";
pub const MSG_DELETE_FAILED: &str = "เกิดข้อผิดพลาดในการลบ";
pub const MSG_LOAD_FAILED: &str = "เกิดข้อผิดพลาดในการโหลดข้อมูล";
pub const MSG_CONFIRM_CLEAR: &str = "คุณต้องการลบรายการทั้งหมดหรือไม่?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationLevel::Success => "✅",
            NotificationLevel::Error => "❌",
            NotificationLevel::Warning => "⚠️",
            NotificationLevel::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// User-visible feedback after an action.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Prints notifications; errors and warnings go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, n: Notification) {
        match n.level {
            NotificationLevel::Error | NotificationLevel::Warning => {
                eprintln!("{} {}", n.level.icon(), n.message)
            }
            _ => println!("{} {}", n.level.icon(), n.message),
        }
    }
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}
