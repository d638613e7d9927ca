//! Role onboarding
//!
//! Picking a role opens a user session on the ledger, which the operator
//! uses to onboard the user into that role. A user with a session already
//! just navigates to the role's dashboard.

use serde_json::json;
use tracing::{debug, info};
use types::errors::DataError;
use types::ids::Party;
use types::role::MarketRole;

use crate::ledger::{templates, LedgerCommand};

/// Outcome of selecting a role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSelection {
    pub role: MarketRole,
    /// Dashboard route to navigate to.
    pub route: String,
    /// Session to create first; `None` when the user already has one.
    pub create_session: Option<LedgerCommand>,
}

/// Select `role` for `user`, given the number of user sessions already
/// visible to them.
pub fn select_role(
    role: MarketRole,
    user: &Party,
    operator: &Party,
    existing_sessions: usize,
) -> Result<RoleSelection, DataError> {
    if !role.is_selectable() {
        return Err(DataError::RoleUnavailable {
            role: role.to_string(),
        });
    }

    let create_session = if existing_sessions == 0 {
        info!(%user, %role, "opening user session");
        Some(user_session(role, user, operator))
    } else {
        debug!(%user, %role, existing_sessions, "user session exists");
        None
    };

    Ok(RoleSelection {
        role,
        route: role.route(),
        create_session,
    })
}

/// Create command for a `UserSession { user, role, operator }` contract.
pub fn user_session(role: MarketRole, user: &Party, operator: &Party) -> LedgerCommand {
    LedgerCommand::Create {
        template_id: templates::USER_SESSION.to_string(),
        payload: json!({
            "user": user,
            "role": role,
            "operator": operator,
        }),
    }
}
