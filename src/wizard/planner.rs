//! Pure step planning for the connection wizard
//!
//! The original flow assembled the step list imperatively while rendering.
//! Here the plan is data computed up front: a pure function of the fetched
//! wizard data and the permissions feature flag, so the sequencing rules are
//! unit-testable without any rendering harness.

use super::{Step, StepName, WizardData};

/// Compute the ordered step list for one wizard run.
///
/// - `authentication` is present iff the app requests authentication scopes.
/// - `authorizations` is always present.
/// - `permissions` is present iff this is a new connection and the
///   permissions feature is enabled. Already-connected apps keep their
///   existing permissions, so the step is skipped regardless of the flag.
///
/// Steps are conditionally included, never reordered.
pub fn plan(wizard_data: &WizardData, permissions_enabled: bool) -> Vec<Step> {
    let mut steps = Vec::with_capacity(3);

    if wizard_data.requires_authentication() {
        steps.push(Step {
            name: StepName::Authentication,
            requires_explicit_approval: true,
        });
    }

    steps.push(Step {
        name: StepName::Authorizations,
        requires_explicit_approval: true,
    });

    if !wizard_data.is_already_connected() && permissions_enabled {
        steps.push(Step {
            name: StepName::Permissions,
            requires_explicit_approval: false,
        });
    }

    steps
}

/// Whether a previous connection already granted authentication consent.
/// Seeds [`super::ConsentState::authentication_consent_given`].
pub fn has_already_consented(wizard_data: &WizardData) -> bool {
    wizard_data
        .old_authentication_scopes
        .as_ref()
        .map(|scopes| !scopes.is_empty())
        .unwrap_or(false)
}

/// Compute the step beyond which navigation is locked.
///
/// Returns `Some(Authentication)` while the app requests authentication
/// scopes and consent has been given neither in this run nor on a previous
/// connection; `None` means all planned steps are freely navigable.
pub fn lock_boundary(
    wizard_data: &WizardData,
    consent_given: bool,
    has_already_consented: bool,
) -> Option<StepName> {
    if wizard_data.requires_authentication() && !consent_given && !has_already_consented {
        Some(StepName::Authentication)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::wizard_data;

    fn names(steps: &[Step]) -> Vec<StepName> {
        steps.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_plan_new_connection_without_authentication() {
        let steps = plan(&wizard_data(&[], None, false), true);
        assert_eq!(
            names(&steps),
            vec![StepName::Authorizations, StepName::Permissions]
        );
    }

    #[test]
    fn test_plan_already_connected_skips_permissions_despite_flag() {
        let steps = plan(&wizard_data(&["openid"], None, true), true);
        assert_eq!(
            names(&steps),
            vec![StepName::Authentication, StepName::Authorizations]
        );
    }

    #[test]
    fn test_plan_flag_off_skips_permissions() {
        let steps = plan(&wizard_data(&["openid"], None, false), false);
        assert_eq!(
            names(&steps),
            vec![StepName::Authentication, StepName::Authorizations]
        );
    }

    #[test]
    fn test_plan_full_sequence() {
        let steps = plan(&wizard_data(&["openid", "email"], None, false), true);
        assert_eq!(
            names(&steps),
            vec![
                StepName::Authentication,
                StepName::Authorizations,
                StepName::Permissions
            ]
        );
    }

    #[test]
    fn test_approval_flags_per_step() {
        let steps = plan(&wizard_data(&["openid"], None, false), true);
        assert!(steps[0].requires_explicit_approval); // authentication
        assert!(steps[1].requires_explicit_approval); // authorizations
        assert!(!steps[2].requires_explicit_approval); // permissions
    }

    #[test]
    fn test_has_already_consented() {
        assert!(has_already_consented(&wizard_data(
            &["openid"],
            Some(&["openid"]),
            true
        )));
        // Present but empty does not count as prior consent
        assert!(!has_already_consented(&wizard_data(
            &["openid"],
            Some(&[]),
            true
        )));
        assert!(!has_already_consented(&wizard_data(&["openid"], None, false)));
    }

    #[test]
    fn test_lock_boundary_until_consent() {
        let data = wizard_data(&["openid"], None, false);
        assert_eq!(
            lock_boundary(&data, false, false),
            Some(StepName::Authentication)
        );
        assert_eq!(lock_boundary(&data, true, false), None);
        assert_eq!(lock_boundary(&data, false, true), None);
    }

    #[test]
    fn test_no_lock_without_authentication_scopes() {
        let data = wizard_data(&[], None, false);
        assert_eq!(lock_boundary(&data, false, false), None);
    }
}
