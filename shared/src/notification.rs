use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pagination::PaginationWindow;

/// A notification as delivered by `GET /app/oims/orphanages/notifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub public_id: String,
    pub message: String,
    /// Backend timestamp, kept verbatim; see [`crate::format::format_timestamp`]
    pub created_date: String,
    pub notification_type: NotificationType,
    #[serde(default)]
    pub is_read: bool,
}

/// Category of a notification. Unknown backend values are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    Inventory,
    Fundraising,
    Staff,
    Branch,
    Report,
    System,
    Other(String),
}

impl NotificationType {
    pub fn as_key(&self) -> &str {
        match self {
            NotificationType::Inventory => "INVENTORY",
            NotificationType::Fundraising => "FUNDRAISING",
            NotificationType::Staff => "STAFF",
            NotificationType::Branch => "BRANCH",
            NotificationType::Report => "REPORT",
            NotificationType::System => "SYSTEM",
            NotificationType::Other(raw) => raw,
        }
    }

    /// CSS modifier used by the notification list
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationType::Inventory => "notification-inventory",
            NotificationType::Fundraising => "notification-fundraising",
            NotificationType::Staff => "notification-staff",
            NotificationType::Branch => "notification-branch",
            NotificationType::Report => "notification-report",
            NotificationType::System | NotificationType::Other(_) => "notification-system",
        }
    }
}

impl From<String> for NotificationType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "INVENTORY" | "LOW_STOCK" => NotificationType::Inventory,
            "FUNDRAISING" | "DONATION" => NotificationType::Fundraising,
            "STAFF" => NotificationType::Staff,
            "BRANCH" => NotificationType::Branch,
            "REPORT" => NotificationType::Report,
            "SYSTEM" => NotificationType::System,
            _ => NotificationType::Other(raw),
        }
    }
}

impl From<NotificationType> for String {
    fn from(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Other(raw) => raw,
            known => known.as_key().to_string(),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::labels::translate(self.as_key()))
    }
}

/// In-memory notification list for one page visit.
///
/// The inbox is replaced wholesale on every poll. Read flags only ever move
/// from unread to read; nothing here can mark a notification unread again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
}

impl NotificationInbox {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    /// Replace the whole list with a freshly fetched batch
    pub fn replace(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn get(&self, public_id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.public_id == public_id)
    }

    /// Flip a single notification to read. Returns `true` if its state changed.
    pub fn mark_as_read(&mut self, public_id: &str) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|n| n.public_id == public_id)
        {
            Some(notification) if !notification.is_read => {
                notification.is_read = true;
                true
            }
            _ => false,
        }
    }

    /// Flip every notification to read. Returns how many changed.
    pub fn mark_all_as_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }
        changed
    }

    /// Pagination window over the current list, clamped to a valid page
    pub fn window(&self, current_page: usize, page_size: usize) -> PaginationWindow {
        PaginationWindow::new(1, page_size, self.len()).go_to(current_page)
    }

    pub fn page(&self, window: &PaginationWindow) -> &[Notification] {
        window.slice(&self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            public_id: id.to_string(),
            message: format!("message {}", id),
            created_date: "2025-03-01T10:00:00Z".to_string(),
            notification_type: NotificationType::System,
            is_read,
        }
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"[
            {"publicId":"n-1","message":"Rice is low","createdDate":"2025-03-01T10:00:00","notificationType":"INVENTORY","isRead":false},
            {"publicId":"n-2","message":"Hello","createdDate":"2025-03-02T10:00:00","notificationType":"BIRTHDAY"}
        ]"#;
        let parsed: Vec<Notification> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].notification_type, NotificationType::Inventory);
        assert_eq!(
            parsed[1].notification_type,
            NotificationType::Other("BIRTHDAY".to_string())
        );
        assert!(!parsed[1].is_read);
    }

    #[test]
    fn test_unknown_type_serializes_verbatim() {
        let value = serde_json::to_value(NotificationType::Other("CUSTOM".into())).unwrap();
        assert_eq!(value, serde_json::json!("CUSTOM"));
        let value = serde_json::to_value(NotificationType::Staff).unwrap();
        assert_eq!(value, serde_json::json!("STAFF"));
    }

    #[test]
    fn test_mark_as_read_only_touches_target() {
        let mut inbox = NotificationInbox::new(vec![
            notification("a", false),
            notification("b", false),
            notification("c", true),
        ]);

        assert!(inbox.mark_as_read("b"));
        assert!(!inbox.get("a").unwrap().is_read);
        assert!(inbox.get("b").unwrap().is_read);
        assert!(inbox.get("c").unwrap().is_read);
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn test_mark_as_read_is_idempotent_and_ignores_unknown_ids() {
        let mut inbox = NotificationInbox::new(vec![notification("a", false)]);
        assert!(inbox.mark_as_read("a"));
        assert!(!inbox.mark_as_read("a"));
        assert!(!inbox.mark_as_read("missing"));
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn test_mark_all_as_read() {
        let mut inbox = NotificationInbox::new(vec![
            notification("a", false),
            notification("b", true),
            notification("c", false),
        ]);
        assert_eq!(inbox.mark_all_as_read(), 2);
        assert_eq!(inbox.unread_count(), 0);
        assert!(inbox.notifications().iter().all(|n| n.is_read));
    }

    #[test]
    fn test_replace_discards_previous_batch() {
        let mut inbox = NotificationInbox::new(vec![notification("a", true)]);
        inbox.replace(vec![notification("x", false), notification("y", false)]);
        assert_eq!(inbox.len(), 2);
        assert!(inbox.get("a").is_none());
        assert_eq!(inbox.unread_count(), 2);
    }

    #[test]
    fn test_window_clamps_after_list_shrinks() {
        let inbox = NotificationInbox::new((0..6).map(|i| notification(&i.to_string(), false)).collect());
        let window = inbox.window(4, 5);
        assert_eq!(window.current_page, 2);
        assert_eq!(inbox.page(&window).len(), 1);
    }
}
