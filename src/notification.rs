#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    FadingOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn class_name(&self) -> String {
        format!("notification-{}", self.severity.as_str())
    }

    /// Render key; a new id always gets a fresh node.
    pub fn key(&self) -> String {
        format!("notification-{}", self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationAction {
    Show { message: String, severity: Severity },
    Dismiss(u64),
    Detach(u64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn stage(&self) -> Option<(u64, NotificationPhase)> {
        self.current
            .as_ref()
            .map(|notification| (notification.id, notification.phase))
    }

    pub fn apply(&mut self, action: NotificationAction) {
        match action {
            NotificationAction::Show { message, severity } => {
                self.next_id += 1;
                self.current = Some(Notification {
                    id: self.next_id,
                    message,
                    severity,
                    phase: NotificationPhase::Visible,
                });
            }
            NotificationAction::Dismiss(id) => {
                if let Some(notification) = self.current.as_mut().filter(|n| n.id == id) {
                    notification.phase = NotificationPhase::FadingOut;
                }
            }
            NotificationAction::Detach(id) => {
                if self.current.as_ref().is_some_and(|n| n.id == id) {
                    self.current = None;
                }
            }
        }
    }
}
