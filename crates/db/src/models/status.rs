//! Notification delivery status mapping to the SMALLINT `status_id` column.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Notification delivery lifecycle status.
///
/// Transitions are one-way: `Pending` moves to `Sent` or `Failed`, and both
/// of those are terminal. The discriminants match the values stored in the
/// `notifications.status_id` column.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Pending = 1,
    Sent = 2,
    Failed = 3,
}

impl NotificationStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a raw `status_id` column value back to the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(NotificationStatus::Pending),
            2 => Some(NotificationStatus::Sent),
            3 => Some(NotificationStatus::Failed),
            _ => None,
        }
    }
}

impl From<NotificationStatus> for StatusId {
    fn from(value: NotificationStatus) -> Self {
        value as StatusId
    }
}
