//! The in-process firing loop.
//!
//! Each registered trigger runs as its own tokio task that sleeps until the
//! schedule's next firing, invokes the dispatcher, and reschedules. Tasks
//! share nothing but the dispatcher itself, so overlapping cadences (the
//! five-minute capture landing in the same minute as the daily refresh)
//! cannot interfere, and no ordering holds across triggers.

use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tradebeat_dispatch::{Dispatcher, InvocationRequest};
use tradebeat_registry::{ScheduleRegistry, TriggerDefinition};
use tracing::{info, warn};

/// Builds the invocation request for one firing of a trigger.
fn request_for(trigger: &TriggerDefinition) -> InvocationRequest {
    InvocationRequest {
        method: trigger.method.clone(),
        params: trigger.params.clone(),
    }
}

async fn run_trigger(trigger: TriggerDefinition, dispatcher: Arc<Dispatcher>) {
    loop {
        let now = Utc::now();
        let Some(next) = trigger.schedule.next_after(now) else {
            warn!(
                rule = %trigger.rule_name,
                schedule = %trigger.schedule,
                "schedule has no future firing, stopping trigger task"
            );
            return;
        };

        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        let report = dispatcher.handle(request_for(&trigger)).await;
        if report.is_success() {
            info!(
                rule = %trigger.rule_name,
                invocation_id = %report.invocation_id,
                "trigger fired"
            );
        } else {
            // The next firing retries nothing; the failure is surfaced here
            // and the cadence simply continues.
            warn!(
                rule = %trigger.rule_name,
                invocation_id = %report.invocation_id,
                error_kind = ?report.error_kind,
                "trigger firing failed"
            );
        }
    }
}

/// Spawns one independent task per registered trigger.
pub fn spawn(registry: &ScheduleRegistry, dispatcher: &Arc<Dispatcher>) -> Vec<JoinHandle<()>> {
    registry
        .iter()
        .cloned()
        .map(|trigger| {
            info!(
                rule = %trigger.rule_name,
                schedule = %trigger.schedule,
                method = %trigger.method,
                "scheduling trigger"
            );
            tokio::spawn(run_trigger(trigger, Arc::clone(dispatcher)))
        })
        .collect()
}
