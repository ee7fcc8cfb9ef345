use crate::domain::entities::delivery_result::DeliveryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyInState,
}

impl ActivationState {
    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            ActivationState::Active
        } else {
            ActivationState::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == ActivationState::Active
    }

    pub fn deactivate(self) -> Result<ActivationState, TransitionError> {
        match self {
            ActivationState::Active => Ok(ActivationState::Inactive),
            ActivationState::Inactive => Err(TransitionError::AlreadyInState),
        }
    }

    pub fn activate(self) -> Result<ActivationState, TransitionError> {
        match self {
            ActivationState::Inactive => Ok(ActivationState::Active),
            ActivationState::Active => Err(TransitionError::AlreadyInState),
        }
    }
}

/// Auto-deactivation rule applied to every newly recorded delivery result.
///
/// A single client-error response disables an active subscription. Server errors,
/// redirects and successes never do.
pub struct DeactivationPolicy;

impl DeactivationPolicy {
    pub fn should_deactivate(result: &DeliveryResult, state: ActivationState) -> bool {
        result.is_client_error() && state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ids::{DeliveryResultId, SubscriptionId};
    use crate::domain::value_objects::timestamps::Timestamp;

    fn result(status_code: u16) -> DeliveryResult {
        DeliveryResult {
            id: DeliveryResultId::from("r"),
            subscription_id: SubscriptionId::new(),
            status_code,
            attempted_at: Timestamp::now_utc(),
        }
    }

    #[test]
    fn given_states_when_transitioning_should_only_allow_flips() {
        assert_eq!(
            ActivationState::Active.deactivate(),
            Ok(ActivationState::Inactive)
        );
        assert_eq!(
            ActivationState::Inactive.activate(),
            Ok(ActivationState::Active)
        );
        assert_eq!(
            ActivationState::Inactive.deactivate(),
            Err(TransitionError::AlreadyInState)
        );
        assert_eq!(
            ActivationState::Active.activate(),
            Err(TransitionError::AlreadyInState)
        );
    }

    #[test]
    fn given_client_error_for_active_subscription_when_checked_should_deactivate() {
        assert!(DeactivationPolicy::should_deactivate(
            &result(404),
            ActivationState::Active
        ));
    }

    #[test]
    fn given_client_error_for_inactive_subscription_when_checked_should_not_deactivate() {
        assert!(!DeactivationPolicy::should_deactivate(
            &result(404),
            ActivationState::Inactive
        ));
    }

    #[test]
    fn given_server_error_or_success_when_checked_should_not_deactivate() {
        for code in [200, 302, 500, 502] {
            assert!(!DeactivationPolicy::should_deactivate(
                &result(code),
                ActivationState::Active
            ));
        }
    }
}
