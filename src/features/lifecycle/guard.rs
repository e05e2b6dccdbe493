//! Actor rules for reading, updating and withdrawing lifecycle entities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Actor, Lifecycle, LifecycleError, Scoped, ScopedQuery};
use crate::features::users::models::{User, UserRole};

/// Requested change: a new status, an assignee, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRequest<S> {
    pub status: Option<S>,
    pub assigned_to: Option<Uuid>,
}

/// Field-set write produced by a successful guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan<S> {
    pub status: Option<S>,
    pub assigned_to: Option<Uuid>,
    /// Completion/resolution timestamp to stamp
    pub finished_at: Option<DateTime<Utc>>,
    /// Collector whose lifetime pickup counter must be incremented
    pub credit_collector: Option<Uuid>,
}

impl<S> UpdatePlan<S> {
    pub fn status_only(status: S) -> Self {
        Self {
            status: Some(status),
            assigned_to: None,
            finished_at: None,
            credit_collector: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none()
    }
}

/// Fails with `Forbidden` unless `actor` can see `entity`.
pub fn ensure_visible<E: Scoped>(actor: &Actor, entity: &E) -> Result<(), LifecycleError> {
    let scope = ScopedQuery::<E::Status>::visible_to(actor)?;
    if scope.matches(entity) {
        Ok(())
    } else {
        Err(LifecycleError::Forbidden(format!(
            "You do not have permission to access this {}",
            E::Status::KIND
        )))
    }
}

/// Fails with `InvalidTransition` unless `from -> to` is in the table.
pub fn ensure_transition<S: Lifecycle>(from: S, to: S) -> Result<(), LifecycleError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(LifecycleError::InvalidTransition(format!(
            "Cannot transition from {} to {}",
            from, to
        )))
    }
}

/// Owner-or-admin check for cancel/close, then the source-state check.
pub fn plan_withdrawal<E: Scoped>(
    actor: &Actor,
    entity: &E,
) -> Result<UpdatePlan<E::Status>, LifecycleError> {
    let kind = E::Status::KIND;

    match actor.role {
        Some(UserRole::Admin) => {}
        Some(UserRole::Citizen) if entity.owner_id() == actor.id => {}
        Some(UserRole::Citizen) => {
            return Err(LifecycleError::Forbidden(format!(
                "You can only {} your own {}s",
                kind.withdraw_verb(),
                kind
            )))
        }
        _ => {
            return Err(LifecycleError::Forbidden(format!(
                "Only the owner or an admin can {} a {}",
                kind.withdraw_verb(),
                kind
            )))
        }
    }

    let current = entity.status();
    if !current.is_withdrawable() {
        return Err(LifecycleError::InvalidTransition(format!(
            "Cannot {} {} with status {}",
            kind.withdraw_verb(),
            kind,
            current
        )));
    }

    Ok(UpdatePlan::status_only(E::Status::WITHDRAWN))
}

/// Validate a status change and/or assignment and work out what to write.
///
/// `candidate` is the user found for `request.assigned_to`, if any; it is
/// ignored when no assignment was requested.
pub fn plan_update<E: Scoped>(
    actor: &Actor,
    entity: &E,
    request: &UpdateRequest<E::Status>,
    candidate: Option<&User>,
    now: DateTime<Utc>,
) -> Result<UpdatePlan<E::Status>, LifecycleError> {
    let kind = E::Status::KIND;

    ensure_visible(actor, entity)?;

    if actor.role == Some(UserRole::Citizen) && request.assigned_to.is_none() {
        // Citizens can only withdraw their own entity through an update.
        return match request.status {
            None => Ok(UpdatePlan {
                status: None,
                assigned_to: None,
                finished_at: None,
                credit_collector: None,
            }),
            Some(status) if status == E::Status::WITHDRAWN => plan_withdrawal(actor, entity),
            Some(_) => Err(LifecycleError::Forbidden(format!(
                "Citizens can only {} a {}",
                kind.withdraw_verb(),
                kind
            ))),
        };
    }

    let mut status = None;
    if let Some(next) = request.status {
        ensure_transition(entity.status(), next)?;
        status = Some(next);
    }

    let mut assigned_to = None;
    if let Some(target) = request.assigned_to {
        if !matches!(actor.role, Some(UserRole::Admin | UserRole::Collector)) {
            return Err(LifecycleError::Forbidden(format!(
                "Only admins and collectors can assign {}s",
                kind
            )));
        }

        match candidate {
            Some(user) if user.id == target && user.is_collector() => {}
            _ => {
                return Err(LifecycleError::InvalidCollector(
                    "Invalid collector ID".to_string(),
                ))
            }
        }

        if actor.role == Some(UserRole::Collector)
            && actor.assigned_city.as_deref() != Some(entity.city())
        {
            return Err(LifecycleError::Forbidden(
                "Cannot assign to collector outside your area".to_string(),
            ));
        }

        assigned_to = Some(target);
        status = status.or(Some(E::Status::ASSIGNED));
    }

    let finishing = status == Some(E::Status::FINISHED);
    let credit_collector = if finishing && E::Status::CREDITS_COLLECTOR {
        assigned_to.or(entity.assigned_to())
    } else {
        None
    };

    Ok(UpdatePlan {
        status,
        assigned_to,
        finished_at: finishing.then_some(now),
        credit_collector,
    })
}
