//! Wizard manager for coordinating open registration flows.
//!
//! The WizardManager is the core side of the Op/Event protocol. It keeps a
//! registry of open wizards, applies each incoming `Op` to the right one and
//! wires every wizard's notifier and navigator to the UI event channel.

use rf_protocol::flow_models::StepView;
use rf_protocol::form_models::FormData;
use rf_protocol::ipc::{Event, Op};
use rf_protocol::registration_models::{Registration, RegistrationPatch};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::models::AppConfig;
use crate::flow::{Collaborators, FlowController, FlowError, FlowResult, FlowSettings};
use crate::services::navigation::ChannelNavigator;
use crate::services::notifier::ChannelNotifier;
use crate::services::store::{DataStore, InMemoryStore, StoreResult};
use crate::services::upload::{SimulatedUploader, Uploader};

/// Manages all open wizards.
///
/// At most one wizard is open per flow definition: opening the same flow
/// again returns the existing wizard, reset first if it was showing a
/// different event.
pub struct WizardManager {
    /// Open wizards, indexed by flow id.
    flows: Mutex<HashMap<Uuid, FlowController>>,

    config: AppConfig,
    settings: FlowSettings,
    store: Arc<dyn DataStore>,
    uploader: Arc<dyn Uploader>,

    /// Channel for sending events to the UI.
    events_tx: UnboundedSender<Event>,
}

impl WizardManager {
    /// Create a manager with an in-memory store and the simulated uploader.
    pub fn new(config: AppConfig, events_tx: UnboundedSender<Event>) -> Self {
        let settings = FlowSettings::from(&config.portal);
        Self {
            flows: Mutex::new(HashMap::new()),
            config,
            settings,
            store: Arc::new(InMemoryStore::new()),
            uploader: Arc::new(SimulatedUploader::new()),
            events_tx,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DataStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_uploader(mut self, uploader: Arc<dyn Uploader>) -> Self {
        self.uploader = uploader;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Open a wizard for `event_id` using the flow named `flow_name`.
    ///
    /// Emits [`Event::FlowOpened`] and returns the flow id.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnknownFlow`] if no flow has that name.
    pub async fn open_flow(&self, event_id: &str, flow_name: &str) -> FlowResult<Uuid> {
        let mut flows = self.flows.lock().await;

        let existing = flows
            .iter()
            .find(|(_, controller)| controller.definition().name == flow_name)
            .map(|(id, _)| *id);

        let flow_id = match existing {
            Some(id) => id,
            None => {
                let definition = self
                    .config
                    .flow(flow_name)
                    .cloned()
                    .ok_or_else(|| FlowError::UnknownFlow(flow_name.to_string()))?;
                let controller = FlowController::new(
                    definition,
                    event_id,
                    self.collaborators(),
                    self.settings.clone(),
                )?
                .with_events(self.events_tx.clone());
                let id = controller.id();
                tracing::info!(flow_id = %id, flow = flow_name, event_id, "wizard opened");
                flows.insert(id, controller);
                id
            }
        };

        let controller = flows
            .get_mut(&flow_id)
            .ok_or(FlowError::FlowNotFound(flow_id))?;
        if controller.open_for(event_id) {
            tracing::info!(%flow_id, event_id, "wizard retargeted");
        }

        let _ = self.events_tx.send(Event::FlowOpened {
            flow_id,
            event_id: event_id.to_string(),
            flow_name: flow_name.to_string(),
            steps: controller.definition().labels(),
        });
        Ok(flow_id)
    }

    /// Close a wizard and drop its state.
    ///
    /// A scheduled hand-off keeps running so the accepted submission is
    /// still stored.
    pub async fn close_flow(&self, flow_id: Uuid) -> FlowResult<()> {
        let mut flows = self.flows.lock().await;
        let controller = flows
            .remove(&flow_id)
            .ok_or(FlowError::FlowNotFound(flow_id))?;
        tracing::info!(%flow_id, flow = %controller.definition().name, "wizard closed");
        let _ = self.events_tx.send(Event::FlowClosed { flow_id });
        Ok(())
    }

    /// Apply one operation from the UI.
    ///
    /// `Op::Shutdown` is handled by [`Self::run`] and ignored here.
    pub async fn handle_op(&self, op: Op) -> FlowResult<()> {
        match op {
            Op::OpenFlow {
                event_id,
                flow_name,
            } => self.open_flow(&event_id, &flow_name).await.map(|_| ()),
            Op::SetField {
                flow_id,
                field,
                value,
            } => self.with_flow_mut(flow_id, |c| c.set_field(field, value)).await?,
            Op::SetMember {
                flow_id,
                slot,
                member,
            } => self.with_flow_mut(flow_id, |c| c.set_member(slot, member)).await?,
            Op::SelectFiles { flow_id, files } => {
                self.with_flow_mut(flow_id, |c| c.select_files(files)).await?
            }
            Op::Advance { flow_id } => self
                .with_flow_mut(flow_id, FlowController::advance)
                .await?
                .map(|_| ()),
            Op::Retreat { flow_id } => self
                .with_flow_mut(flow_id, FlowController::retreat)
                .await
                .map(|_| ()),
            Op::CompleteTerminalStep { flow_id } => {
                let mut flows = self.flows.lock().await;
                let controller = flows
                    .get_mut(&flow_id)
                    .ok_or(FlowError::FlowNotFound(flow_id))?;
                controller.complete_terminal_step().await.map(|_| ())
            }
            Op::Reset { flow_id } => self.with_flow_mut(flow_id, FlowController::reset).await,
            Op::CloseFlow { flow_id } => self.close_flow(flow_id).await,
            Op::Shutdown => Ok(()),
        }
    }

    /// Process operations until `Op::Shutdown` or until the sender is dropped.
    ///
    /// Errors the user was already notified about are logged at debug level;
    /// anything else is logged as a warning.
    pub async fn run(&self, mut op_rx: UnboundedReceiver<Op>) {
        while let Some(op) = op_rx.recv().await {
            if matches!(op, Op::Shutdown) {
                break;
            }
            if let Err(err) = self.handle_op(op).await {
                if err.is_user_facing() {
                    tracing::debug!(error = %err, "operation rejected");
                } else {
                    tracing::warn!(error = %err, "operation failed");
                }
            }
        }
        self.shutdown().await;
    }

    /// Drop all wizards, then wait for their pending hand-offs.
    ///
    /// Submissions already accepted still reach the store; use
    /// [`FlowController::cancel_handoff`] to discard one.
    pub async fn shutdown(&self) {
        let handoffs: Vec<_> = {
            let mut flows = self.flows.lock().await;
            let handoffs = flows
                .values_mut()
                .flat_map(FlowController::take_handoffs)
                .collect();
            flows.clear();
            handoffs
        };
        if !handoffs.is_empty() {
            tracing::info!(pending = handoffs.len(), "waiting for pending hand-offs");
        }
        for handle in handoffs {
            handle.wait().await;
        }
        tracing::info!("wizard manager stopped");
    }

    /// Run `f` against an open wizard.
    pub async fn with_flow<R>(
        &self,
        flow_id: Uuid,
        f: impl FnOnce(&FlowController) -> R,
    ) -> FlowResult<R> {
        let flows = self.flows.lock().await;
        flows
            .get(&flow_id)
            .map(f)
            .ok_or(FlowError::FlowNotFound(flow_id))
    }

    async fn with_flow_mut<R>(
        &self,
        flow_id: Uuid,
        f: impl FnOnce(&mut FlowController) -> R,
    ) -> FlowResult<R> {
        let mut flows = self.flows.lock().await;
        flows
            .get_mut(&flow_id)
            .map(f)
            .ok_or(FlowError::FlowNotFound(flow_id))
    }

    pub async fn stepper(&self, flow_id: Uuid) -> FlowResult<Vec<StepView>> {
        self.with_flow(flow_id, FlowController::stepper).await
    }

    pub async fn form_data(&self, flow_id: Uuid) -> FlowResult<FormData> {
        self.with_flow(flow_id, |c| c.form_data().clone()).await
    }

    pub async fn open_flows(&self) -> Vec<Uuid> {
        self.flows.lock().await.keys().copied().collect()
    }

    pub fn registrations_for(&self, event_id: &str) -> Vec<Registration> {
        self.store.list_for_event(event_id)
    }

    /// Apply an admin decision or correction to a stored registration.
    pub fn update_registration(&self, id: Uuid, patch: RegistrationPatch) -> StoreResult<()> {
        self.store.update(id, patch)?;
        tracing::info!(registration_id = %id, "registration updated");
        Ok(())
    }

    fn collaborators(&self) -> Collaborators {
        Collaborators {
            notifier: Arc::new(ChannelNotifier::new(self.events_tx.clone())),
            store: Arc::clone(&self.store),
            navigator: Arc::new(ChannelNavigator::new(self.events_tx.clone())),
            uploader: Arc::clone(&self.uploader),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_protocol::form_models::{fields, FieldValue, FileRef, MemberRecord};
    use tokio::sync::mpsc::unbounded_channel;

    fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_open_flow_emits_labels() {
        let (tx, mut rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);

        let flow_id = manager.open_flow("tech-talk", "solo").await.unwrap();

        match drain(&mut rx).as_slice() {
            [Event::FlowOpened {
                flow_id: opened,
                steps,
                ..
            }] => {
                assert_eq!(*opened, flow_id);
                assert_eq!(steps.len(), 4);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_flow() {
        let (tx, _rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);

        let result = manager.open_flow("tech-talk", "relay").await;
        assert_eq!(result, Err(FlowError::UnknownFlow("relay".to_string())));
        assert!(manager.open_flows().await.is_empty());
    }

    #[tokio::test]
    async fn test_reopen_same_event_keeps_form() {
        let (tx, _rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);

        let first = manager.open_flow("tech-talk", "solo").await.unwrap();
        manager
            .handle_op(Op::SetField {
                flow_id: first,
                field: fields::NAME.to_string(),
                value: FieldValue::from("Jane"),
            })
            .await
            .unwrap();

        let second = manager.open_flow("tech-talk", "solo").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            manager.form_data(first).await.unwrap().text(fields::NAME),
            Some("Jane")
        );

        manager.open_flow("robotics-day", "solo").await.unwrap();
        assert!(manager.form_data(first).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ops_on_closed_flow() {
        let (tx, mut rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);

        let flow_id = manager.open_flow("tech-talk", "team").await.unwrap();
        manager.handle_op(Op::CloseFlow { flow_id }).await.unwrap();
        assert!(matches!(drain(&mut rx).last(), Some(Event::FlowClosed { .. })));

        let result = manager.handle_op(Op::Advance { flow_id }).await;
        assert_eq!(result, Err(FlowError::FlowNotFound(flow_id)));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (tx, _rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);
        let (op_tx, op_rx) = unbounded_channel();

        op_tx
            .send(Op::OpenFlow {
                event_id: "tech-talk".to_string(),
                flow_name: "solo".to_string(),
            })
            .unwrap();
        op_tx.send(Op::Shutdown).unwrap();

        manager.run(op_rx).await;
        assert!(manager.open_flows().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_member_beyond_slots_is_rejected() {
        let (tx, _rx) = unbounded_channel();
        let manager = WizardManager::new(AppConfig::default(), tx);
        let flow_id = manager.open_flow("hackathon", "team").await.unwrap();

        let result = manager
            .handle_op(Op::SetMember {
                flow_id,
                slot: usize::MAX,
                member: MemberRecord::new("Ann", "ann@uni.edu", "R-1"),
            })
            .await;

        assert_eq!(
            result,
            Err(FlowError::MemberSlotOutOfRange {
                slot: usize::MAX,
                slots: 5
            })
        );
        assert!(manager.form_data(flow_id).await.unwrap().members().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_delivers_accepted_submission() {
        let (tx, _rx) = unbounded_channel();
        let store = Arc::new(InMemoryStore::new());
        let manager = WizardManager::new(AppConfig::default(), tx).with_store(store.clone());
        let flow_id = manager.open_flow("tech-talk", "solo").await.unwrap();

        manager.handle_op(Op::Advance { flow_id }).await.unwrap();
        for (field, value) in [
            (fields::NAME, "Jane"),
            (fields::ROLL_NO, "R-1"),
            (fields::EMAIL, "jane@uni.edu"),
        ] {
            manager
                .handle_op(Op::SetField {
                    flow_id,
                    field: field.to_string(),
                    value: FieldValue::from(value),
                })
                .await
                .unwrap();
        }
        manager.handle_op(Op::Advance { flow_id }).await.unwrap();
        manager
            .handle_op(Op::SelectFiles {
                flow_id,
                files: vec![FileRef::new("id.pdf", 10)],
            })
            .await
            .unwrap();
        manager
            .handle_op(Op::CompleteTerminalStep { flow_id })
            .await
            .unwrap();
        assert!(store.is_empty());

        manager.shutdown().await;

        assert_eq!(store.len(), 1);
        assert!(manager.open_flows().await.is_empty());
    }
}
