use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use directory_core::Effect;
use directory_logging::{dir_debug, dir_warn};

use crate::client::{ApiSettings, DirectoryApi, ReqwestDirectoryApi};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Execute(Effect),
}

/// Runs effects on a background tokio runtime and hands completions back
/// over a channel. Dropping the handle stops the worker; late completions
/// are then discarded.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestDirectoryApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn DirectoryApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("directory-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            dir_debug!("engine command channel closed; worker exiting");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            if self.cmd_tx.send(EngineCommand::Execute(effect)).is_err() {
                dir_warn!("engine worker is gone; effect dropped");
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn DirectoryApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Execute(effect) => {
            let event = execute_effect(api, effect).await;
            let request = event.request();
            if event_tx.send(event).is_err() {
                dir_debug!("owner dropped; discarding completion for request {}", request);
            }
        }
    }
}

/// Performs one effect against the API. Always yields exactly one completion.
pub async fn execute_effect(api: &dyn DirectoryApi, effect: Effect) -> EngineEvent {
    match effect {
        Effect::FetchProfessionals {
            request,
            filters,
            window_size,
        } => EngineEvent::PageFetched {
            request,
            result: api.fetch_professionals(&filters, window_size).await,
        },
        Effect::FetchExperiences { request, member_id } => EngineEvent::ExperiencesFetched {
            request,
            result: api.fetch_experiences(member_id.as_str(), None).await,
        },
    }
}
