//! Process-wide chat widget. Built once on first use; every later call gets
//! the same handle back. Lives until the process exits.

use crate::chat::ChatController;
use crate::config::Config;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

static WIDGET: OnceCell<ChatWidget> = OnceCell::new();

/// Shared handle to the one chat controller
#[derive(Clone)]
pub struct ChatWidget {
    controller: Arc<Mutex<ChatController>>,
}

impl ChatWidget {
    /// Return the registered widget, building and registering it from `config`
    /// if this is the first call. `config` is ignored once a widget exists.
    pub fn get_or_init(config: &Config) -> Result<ChatWidget> {
        Self::get_or_init_with(|| ChatController::from_config(config))
    }

    /// Same as [`ChatWidget::get_or_init`] with a caller-supplied constructor
    pub fn get_or_init_with<F>(build: F) -> Result<ChatWidget>
    where
        F: FnOnce() -> Result<ChatController>,
    {
        WIDGET
            .get_or_try_init(|| {
                tracing::info!("initializing chat widget");
                build().map(ChatWidget::from_controller)
            })
            .cloned()
    }

    /// The registered widget, if any
    pub fn get() -> Option<ChatWidget> {
        WIDGET.get().cloned()
    }

    /// Unregistered handle around an existing controller
    pub fn from_controller(controller: ChatController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ChatController> {
        self.controller.lock().await
    }

    pub fn same_instance(&self, other: &ChatWidget) -> bool {
        Arc::ptr_eq(&self.controller, &other.controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::error::RemoteError;
    use crate::llm::ChatBackend;
    use crate::normalizer::Normalizer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo;

    #[async_trait]
    impl ChatBackend for Echo {
        async fn ask(&self, content: &str) -> Result<String, RemoteError> {
            Ok(content.to_string())
        }
    }

    fn build() -> Result<ChatController> {
        let normalizer = Normalizer::seeded(&NormalizerConfig::default(), 0);
        Ok(ChatController::new(Arc::new(Echo), normalizer))
    }

    // The only test touching the global so ordering between tests cannot matter
    #[tokio::test]
    async fn test_second_init_returns_existing_instance() {
        let builds = AtomicUsize::new(0);
        let first = ChatWidget::get_or_init_with(|| {
            builds.fetch_add(1, Ordering::SeqCst);
            build()
        })
        .unwrap();
        let second = ChatWidget::get_or_init_with(|| {
            builds.fetch_add(1, Ordering::SeqCst);
            build()
        })
        .unwrap();

        assert!(first.same_instance(&second));
        assert!(ChatWidget::get().unwrap().same_instance(&first));
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        first.lock().await.submit("halo");
        assert_eq!(second.lock().await.conversation().len(), 3);
    }

    #[test]
    fn test_from_controller_is_not_registered_globally() {
        let a = ChatWidget::from_controller(build().unwrap());
        let b = ChatWidget::from_controller(build().unwrap());
        assert!(!a.same_instance(&b));
    }
}
