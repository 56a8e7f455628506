use std::time::Duration;

use directory_core::{Effect, Msg};
use directory_engine::{ApiSettings, EngineError, EngineEvent, EngineHandle};
use directory_logging::{dir_info, dir_warn};

/// Hands effects to the engine and turns its completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        dir_info!("using directory api at {}", settings.base_url);
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in &effects {
            match effect {
                Effect::FetchProfessionals {
                    request,
                    filters,
                    window_size,
                } => {
                    dir_info!(
                        "FetchProfessionals request={} window={} filters={:?}",
                        request,
                        window_size,
                        filters
                    );
                }
                Effect::FetchExperiences { request, member_id } => {
                    dir_info!("FetchExperiences request={} member={}", request, member_id);
                }
            }
        }
        self.engine.execute(effects);
    }

    /// Completions that arrived since the last call, as messages.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            log_failure(&event);
            inbox.push(event.into_msg());
        }
        inbox
    }

    /// Blocks up to `timeout` for the next completion.
    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        log_failure(&event);
        Some(event.into_msg())
    }
}

fn log_failure(event: &EngineEvent) {
    match event {
        EngineEvent::PageFetched {
            request,
            result: Err(err),
        } => dir_warn!("page request {} failed: {}", request, err),
        EngineEvent::ExperiencesFetched {
            request,
            result: Err(err),
        } => dir_warn!("experiences request {} failed: {}", request, err),
        _ => {}
    }
}
