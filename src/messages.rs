//! User-facing feedback messages.
//!
//! `Messenger` applies the form settings' show-success/show-error toggles,
//! logs what it shows, and forwards it to an optional sink (a toast widget,
//! a terminal, a test recorder).

use std::fmt;
use std::sync::Arc;

use crate::config::FormSettings;

/// Kind of feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MessageKind::Success => "SUCCESS",
            MessageKind::Error => "ERROR",
            MessageKind::Warning => "WARNING",
            MessageKind::Info => "INFO",
        };
        f.write_str(label)
    }
}

/// Receives messages that passed the toggles.
pub trait MessageSink: Send + Sync {
    fn show(&self, message: &str, kind: MessageKind);
}

#[derive(Clone)]
pub struct Messenger {
    show_success: bool,
    show_error: bool,
    sink: Option<Arc<dyn MessageSink>>,
}

impl Messenger {
    pub fn new(form: &FormSettings) -> Self {
        Self {
            show_success: form.show_success_message,
            show_error: form.show_error_message,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Show a message unless its kind is switched off. Returns whether it
    /// was shown.
    pub fn show(&self, message: &str, kind: MessageKind) -> bool {
        let suppressed = match kind {
            MessageKind::Success => !self.show_success,
            MessageKind::Error => !self.show_error,
            MessageKind::Warning | MessageKind::Info => false,
        };
        if suppressed {
            tracing::trace!(%kind, "Message suppressed by form settings");
            return false;
        }

        tracing::info!("{}: {}", kind, message);
        if let Some(sink) = &self.sink {
            sink.show(message, kind);
        }
        true
    }

    pub fn success(&self, message: &str) -> bool {
        self.show(message, MessageKind::Success)
    }

    pub fn error(&self, message: &str) -> bool {
        self.show(message, MessageKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, MessageKind)>>);

    impl MessageSink for Recorder {
        fn show(&self, message: &str, kind: MessageKind) {
            self.0.lock().unwrap().push((message.to_string(), kind));
        }
    }

    #[test]
    fn test_forwards_to_sink() {
        let recorder = Arc::new(Recorder::default());
        let messenger = Messenger::new(&FormSettings::default()).with_sink(recorder.clone());

        assert!(messenger.success("Appointment booked"));
        assert!(messenger.error("Server unreachable"));

        let shown = recorder.0.lock().unwrap();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0], ("Appointment booked".to_string(), MessageKind::Success));
        assert_eq!(shown[1].1, MessageKind::Error);
    }

    #[test]
    fn test_toggles_suppress() {
        let form = FormSettings {
            show_success_message: false,
            show_error_message: false,
            ..Default::default()
        };
        let recorder = Arc::new(Recorder::default());
        let messenger = Messenger::new(&form).with_sink(recorder.clone());

        assert!(!messenger.success("hidden"));
        assert!(!messenger.error("hidden"));
        assert!(messenger.show("still shown", MessageKind::Info));
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_default_kind_and_labels() {
        assert_eq!(MessageKind::default(), MessageKind::Success);
        assert_eq!(MessageKind::Error.to_string(), "ERROR");
    }
}
