// Use case: ingest_delivery_results.

use crate::application::context::AppContext;
use crate::application::shared::audit::{self, AuditAction, RELAY_ACTOR};
use crate::application::shared::subscription_errors::SubscriptionUseCaseError;
use crate::domain::entities::delivery_result::DeliveryResult;
use crate::domain::value_objects::ids::SubscriptionId;
use crate::domain::workflows::activation::DeactivationPolicy;
use metrics::counter;
use tracing::{debug, instrument, warn};

/// Records relay-reported delivery results and applies auto-deactivation.
pub struct IngestDeliveryResultsUseCase;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestDeliveryResultsReport {
    pub recorded: usize,
    pub duplicates: usize,
    pub deactivated: Vec<SubscriptionId>,
}

impl IngestDeliveryResultsUseCase {
    /// Ingest a batch. Each result is handled on its own, in input order.
    ///
    /// The duplicate check only looks at the newest `results.len()` history entries
    /// of the result's subscription. An id that sits deeper in the history is caught
    /// by the store's unique index on (subscription, id) and counted as a duplicate.
    #[instrument(skip(ctx, results), fields(batch = results.len()))]
    pub async fn execute(
        ctx: &AppContext,
        results: Vec<DeliveryResult>,
    ) -> Result<IngestDeliveryResultsReport, SubscriptionUseCaseError> {
        let mut report = IngestDeliveryResultsReport::default();
        if results.is_empty() {
            warn!("delivery_results_empty_batch");
            return Ok(report);
        }

        let page = u32::try_from(results.len()).unwrap_or(u32::MAX);
        for result in &results {
            // Step 1: Skip ids already present in the recent history.
            if Self::is_duplicate(ctx, result, page).await? {
                Self::count_duplicate(result, &mut report);
                continue;
            }

            // Step 2: Record the result; the store drops ids older than the page.
            if !ctx.repos.delivery_result.insert(result).await? {
                Self::count_duplicate(result, &mut report);
                continue;
            }
            audit::record(
                RELAY_ACTOR,
                AuditAction::DeliveryResultRecorded,
                result.subscription_id,
            );
            counter!("delivery_results_recorded_total").increment(1);
            report.recorded += 1;

            // Step 3: A client error disables the subscription.
            if Self::apply_failure_policy(ctx, result).await? {
                report.deactivated.push(result.subscription_id);
            }
        }

        Ok(report)
    }

    fn count_duplicate(result: &DeliveryResult, report: &mut IngestDeliveryResultsReport) {
        debug!(
            subscription_id = %result.subscription_id,
            result_id = %result.id,
            "delivery_result_duplicate"
        );
        counter!("delivery_results_duplicate_total").increment(1);
        report.duplicates += 1;
    }

    async fn is_duplicate(
        ctx: &AppContext,
        result: &DeliveryResult,
        page: u32,
    ) -> Result<bool, SubscriptionUseCaseError> {
        let recent = ctx
            .repos
            .delivery_result
            .search_history(result.subscription_id, page)
            .await?;
        Ok(recent.iter().any(|stored| stored.id.matches(&result.id)))
    }

    async fn apply_failure_policy(
        ctx: &AppContext,
        result: &DeliveryResult,
    ) -> Result<bool, SubscriptionUseCaseError> {
        if !result.is_client_error() {
            return Ok(false);
        }

        let Some(mut subscription) = ctx.repos.subscription.get(result.subscription_id).await?
        else {
            return Ok(false);
        };
        if !DeactivationPolicy::should_deactivate(result, subscription.activation_state()) {
            return Ok(false);
        }

        subscription.deactivate();
        ctx.repos.subscription.update(&subscription).await?;
        audit::record(
            RELAY_ACTOR,
            AuditAction::SubscriptionDeactivated,
            subscription.id,
        );
        counter!("subscriptions_deactivated_total").increment(1);
        Ok(true)
    }
}
