//! Single consumer of [`AppEvent`]s.
//!
//! Owns all user-visible state. The monitor and the translation workers only
//! post events; every storage write and UI call happens here, in order.

use std::ops::ControlFlow;
use std::sync::Arc;

use lc_core::ports::{NoticeLevel, TranslationNotice};
use lc_core::settings::model::Settings;
use lc_core::{EntryOrigin, TranslationRequest};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::deps::AppDeps;
use crate::dispatcher::{TranslationDispatcher, TranslationJob};
use crate::event::{AppEvent, TranslationOutcome};
use crate::usecases::ActivityTrail;

pub struct Orchestrator {
    deps: AppDeps,
    settings: Settings,
    dispatcher: Arc<TranslationDispatcher>,
    trail: Arc<ActivityTrail>,
    events: mpsc::Receiver<AppEvent>,
    shutdown: watch::Sender<bool>,
}

impl Orchestrator {
    pub fn new(
        deps: AppDeps,
        settings: Settings,
        dispatcher: Arc<TranslationDispatcher>,
        events: mpsc::Receiver<AppEvent>,
        shutdown: watch::Sender<bool>,
    ) -> Self {
        let trail = Arc::new(ActivityTrail::new(
            deps.activity_log.clone(),
            deps.clock.clone(),
            settings.storage.max_history_items,
        ));
        Self {
            deps,
            settings,
            dispatcher,
            trail,
            events,
            shutdown,
        }
    }

    /// Activity trail operations for UI front ends.
    pub fn activity_trail(&self) -> Arc<ActivityTrail> {
        self.trail.clone()
    }

    /// Drain the queue until [`AppEvent::Shutdown`] or until every sender
    /// is gone.
    pub async fn run(mut self) {
        let span = info_span!("orchestrator.run");
        async {
            self.announce_security_level().await;
            info!(
                provider = self.deps.translator.provider_name(),
                monitoring = self.deps.monitor.is_monitoring(),
                "orchestrator started"
            );

            while let Some(event) = self.events.recv().await {
                if self.handle(event).await.is_break() {
                    break;
                }
            }

            self.stop();
            info!("orchestrator stopped");
        }
        .instrument(span)
        .await
    }

    pub async fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::ClipboardChanged { text, .. } => {
                let origin = EntryOrigin::Popup;
                let job = TranslationJob::new(
                    TranslationRequest::new(
                        text,
                        self.settings.translation.src_lang.clone(),
                        self.settings.translation.dest_lang.clone(),
                    ),
                    origin,
                );
                if let Err(e) = self.dispatcher.submit(origin.dispatch_key(), job) {
                    debug!(error = %e, "clipboard change ignored");
                }
            }
            AppEvent::Translate {
                key,
                text,
                src_lang,
                dest_lang,
                origin,
            } => {
                if let Err(e) = self
                    .dispatcher
                    .translate_async(key, text, src_lang, dest_lang, origin)
                {
                    debug!(error = %e, "translation request ignored");
                }
            }
            AppEvent::TranslationFinished(outcome) => self.apply_outcome(outcome).await,
            AppEvent::NotificationDismissed => {
                self.deps.monitor.set_notification_visible(false);
            }
            AppEvent::SetMonitoring(enabled) => self.set_monitoring(enabled).await,
            AppEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    async fn apply_outcome(&self, outcome: TranslationOutcome) {
        let TranslationOutcome {
            job_id,
            key,
            origin,
            request,
            translation,
        } = outcome;

        // Superseded or cancelled after the worker posted it.
        if !self.dispatcher.complete(&key, job_id) {
            debug!(job_id, key = %key, "stale translation result dropped");
            return;
        }
        let src_lang = translation
            .effective_src_lang(&request.src_lang)
            .to_string();

        if translation.is_error {
            debug!(job_id, "translation failed, history not written");
        } else if let Err(e) = self
            .trail
            .write_history(&request.text, &src_lang, &request.dest_lang, origin)
            .await
        {
            warn!(job_id, error = %e, "failed to record history");
        }

        let notice = TranslationNotice {
            origin,
            original_text: request.text,
            translated_text: translation.translated_text,
            src_lang,
            dest_lang: request.dest_lang,
            is_error: translation.is_error,
        };
        if let Err(e) = self.deps.ui.show_translation(notice).await {
            warn!(job_id, error = %e, "failed to show translation");
        }

        if origin == EntryOrigin::Popup {
            self.deps.monitor.set_notification_visible(true);
        }
    }

    async fn set_monitoring(&mut self, enabled: bool) {
        self.deps.monitor.set_monitoring(enabled);
        info!(enabled, "clipboard monitoring toggled");

        if self.settings.monitor.enabled != enabled {
            self.settings.monitor.enabled = enabled;
            if let Err(e) = self.deps.settings.save(&self.settings).await {
                warn!(error = %e, "failed to persist monitoring state");
            }
        }
    }

    async fn announce_security_level(&self) {
        let level = self.trail.security_level();
        if !level.is_degraded() {
            return;
        }
        warn!(%level, "activity logs are not encrypted");
        let message = "Encryption is unavailable on this system. History and favorites are \
                       stored with a reversible encoding, not encrypted.";
        if let Err(e) = self.deps.ui.show_notice(NoticeLevel::Warning, message).await {
            warn!(error = %e, "failed to show security notice");
        }
    }

    fn stop(&self) {
        self.dispatcher.shutdown();
        self.shutdown.send_replace(true);
    }
}
