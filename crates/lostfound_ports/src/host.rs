use std::sync::Mutex;

/// The parent screen hosting the form.
pub trait FormHost: Send + Sync {
    fn set_show_upload_form(&self, visible: bool);

    /// Blocking, user-facing alert.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Visibility(bool),
    Alert(String),
}

#[derive(Debug, Default)]
pub struct RecordingFormHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingFormHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.lock().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Alert(message) => Some(message.clone()),
                HostEvent::Visibility(_) => None,
            })
            .collect()
    }

    pub fn visibility_changes(&self) -> Vec<bool> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Visibility(visible) => Some(*visible),
                HostEvent::Alert(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HostEvent>> {
        // A poisoned log is still a readable log.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FormHost for RecordingFormHost {
    fn set_show_upload_form(&self, visible: bool) {
        self.lock().push(HostEvent::Visibility(visible));
    }

    fn alert(&self, message: &str) {
        self.lock().push(HostEvent::Alert(message.to_string()));
    }
}
