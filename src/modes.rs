//! Authz and feegrant mode slices

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthzState {
    pub authz_mode_enabled: bool,
    pub authz_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeegrantState {
    pub feegrant_mode_enabled: bool,
    pub feegrant_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzAction {
    EnableAuthzMode { address: String },
    ExitAuthzMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeegrantAction {
    EnableFeegrantMode { address: String },
    ExitFeegrantMode,
}

pub fn reduce_authz(_state: AuthzState, action: AuthzAction) -> AuthzState {
    match action {
        AuthzAction::EnableAuthzMode { address } => AuthzState {
            authz_mode_enabled: true,
            authz_address: address,
        },
        AuthzAction::ExitAuthzMode => AuthzState::default(),
    }
}

pub fn reduce_feegrant(_state: FeegrantState, action: FeegrantAction) -> FeegrantState {
    match action {
        FeegrantAction::EnableFeegrantMode { address } => FeegrantState {
            feegrant_mode_enabled: true,
            feegrant_address: address,
        },
        FeegrantAction::ExitFeegrantMode => FeegrantState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authz_toggle() {
        let state = reduce_authz(
            AuthzState::default(),
            AuthzAction::EnableAuthzMode {
                address: "cosmos1granter".to_string(),
            },
        );
        assert!(state.authz_mode_enabled);
        assert_eq!(state.authz_address, "cosmos1granter");
        assert_eq!(reduce_authz(state, AuthzAction::ExitAuthzMode), AuthzState::default());
    }

    #[test]
    fn test_feegrant_toggle() {
        let state = reduce_feegrant(
            FeegrantState::default(),
            FeegrantAction::EnableFeegrantMode {
                address: "cosmos1payer".to_string(),
            },
        );
        assert!(state.feegrant_mode_enabled);
        assert_eq!(
            reduce_feegrant(state, FeegrantAction::ExitFeegrantMode),
            FeegrantState::default()
        );
    }
}
