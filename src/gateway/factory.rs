use crate::gateway::NotifyVia;
use crate::gateway::notifier::{LoggingNotifier, MemoryNotifier, Notifier};

pub async fn create_notifier(via: NotifyVia) -> Box<dyn Notifier> {
    match via {
        NotifyVia::Log => {
            Box::new(LoggingNotifier::new())
        }
        NotifyVia::Memory => {
            Box::new(MemoryNotifier::new())
        }
    }
}
