//! Role-scoped visibility of pickups and litter reports.
//!
//! [`ScopedQuery::for_actor`] turns the caller and the optional list filters
//! into a predicate. The same predicate is rendered into SQL for listing and
//! evaluated in memory to decide whether a single entity is visible.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Actor, Lifecycle, LifecycleError};
use crate::features::litter_reports::models::Severity;
use crate::features::users::models::UserRole;

/// Fields of a stored entity the scope predicate looks at
pub trait Scoped {
    type Status: Lifecycle;

    fn owner_id(&self) -> Uuid;
    fn assigned_to(&self) -> Option<Uuid>;
    fn status(&self) -> Self::Status;
    fn city(&self) -> &str;

    fn severity(&self) -> Option<Severity> {
        None
    }
}

/// Who may see what, before optional filters are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Admins see everything
    All,
    /// Citizens see what they own
    Owner(Uuid),
    /// Collectors see their assignments plus the open pool of their city
    Collector {
        collector_id: Uuid,
        city: Option<String>,
    },
}

/// Optional narrowing requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<S> {
    pub status: Option<S>,
    pub severity: Option<Severity>,
    pub city: Option<String>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            status: None,
            severity: None,
            city: None,
        }
    }
}

/// Column names used when rendering a [`ScopedQuery`] into SQL
#[derive(Debug, Clone, Copy)]
pub struct ScopeColumns {
    pub owner: &'static str,
    pub city: &'static str,
    /// `None` for tables without a severity column
    pub severity: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery<S> {
    pub visibility: Visibility,
    pub status: Option<S>,
    pub severity: Option<Severity>,
    pub city: Option<String>,
}

impl<S: Lifecycle> ScopedQuery<S> {
    /// Build the predicate for `actor`.
    ///
    /// The city filter is honoured for admins only; collectors are already
    /// pinned to their own city and citizens to their own entities.
    pub fn for_actor(actor: &Actor, filter: ListFilter<S>) -> Result<Self, LifecycleError> {
        let ListFilter {
            status,
            severity,
            city,
        } = filter;

        let query = match actor.role {
            Some(UserRole::Admin) => Self {
                visibility: Visibility::All,
                status,
                severity,
                city: city.filter(|c| !c.trim().is_empty()),
            },
            Some(UserRole::Collector) => Self {
                visibility: Visibility::Collector {
                    collector_id: actor.id,
                    city: actor.assigned_city.clone(),
                },
                status,
                severity,
                city: None,
            },
            Some(UserRole::Citizen) => Self {
                visibility: Visibility::Owner(actor.id),
                status,
                severity,
                city: None,
            },
            None => return Err(LifecycleError::Forbidden("Invalid user role".to_string())),
        };

        Ok(query)
    }

    /// Unfiltered visibility for `actor`, used for single-entity checks
    pub fn visible_to(actor: &Actor) -> Result<Self, LifecycleError> {
        Self::for_actor(actor, ListFilter::default())
    }

    pub fn matches<E>(&self, entity: &E) -> bool
    where
        E: Scoped<Status = S>,
    {
        let visible = match &self.visibility {
            Visibility::All => true,
            Visibility::Owner(owner) => entity.owner_id() == *owner,
            Visibility::Collector { collector_id, city } => {
                entity.assigned_to() == Some(*collector_id)
                    || city.as_deref().is_some_and(|city| {
                        S::OPEN_POOL.contains(&entity.status()) && entity.city() == city
                    })
            }
        };

        visible
            && self.status.is_none_or(|s| entity.status() == s)
            && self.severity.is_none_or(|s| entity.severity() == Some(s))
            && self.city.as_deref().is_none_or(|c| entity.city() == c)
    }

    /// Append ` WHERE ...` for this predicate.
    pub fn push_where<'q>(&self, qb: &mut QueryBuilder<'q, Postgres>, columns: &ScopeColumns)
    where
        S: sqlx::Type<Postgres> + sqlx::Encode<'q, Postgres> + 'q,
    {
        qb.push(" WHERE TRUE");

        match &self.visibility {
            Visibility::All => {}
            Visibility::Owner(owner) => {
                qb.push(format!(" AND {} = ", columns.owner));
                qb.push_bind(*owner);
            }
            Visibility::Collector { collector_id, city } => {
                qb.push(" AND (assigned_to = ");
                qb.push_bind(*collector_id);
                if let Some(city) = city {
                    qb.push(" OR (status IN (");
                    let mut pool = qb.separated(", ");
                    for status in S::OPEN_POOL {
                        pool.push_bind(*status);
                    }
                    qb.push(format!(") AND {} = ", columns.city));
                    qb.push_bind(city.clone());
                    qb.push(")");
                }
                qb.push(")");
            }
        }

        if let Some(status) = self.status {
            qb.push(" AND status = ");
            qb.push_bind(status);
        }
        if let (Some(severity), Some(column)) = (self.severity, columns.severity) {
            qb.push(format!(" AND {} = ", column));
            qb.push_bind(severity);
        }
        if let Some(city) = &self.city {
            qb.push(format!(" AND {} = ", columns.city));
            qb.push_bind(city.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::litter_reports::models::LitterReportStatus;
    use crate::features::waste_pickups::models::PickupStatus;

    struct Item {
        owner: Uuid,
        assigned: Option<Uuid>,
        status: LitterReportStatus,
        city: &'static str,
        severity: Severity,
    }

    impl Scoped for Item {
        type Status = LitterReportStatus;

        fn owner_id(&self) -> Uuid {
            self.owner
        }
        fn assigned_to(&self) -> Option<Uuid> {
            self.assigned
        }
        fn status(&self) -> LitterReportStatus {
            self.status
        }
        fn city(&self) -> &str {
            self.city
        }
        fn severity(&self) -> Option<Severity> {
            Some(self.severity)
        }
    }

    fn item(owner: Uuid, status: LitterReportStatus, city: &'static str) -> Item {
        Item {
            owner,
            assigned: None,
            status,
            city,
            severity: Severity::Medium,
        }
    }

    fn actor(role: Option<UserRole>, city: Option<&str>) -> Actor {
        Actor {
            id: Uuid::now_v7(),
            role,
            assigned_city: city.map(String::from),
        }
    }

    const COLUMNS: ScopeColumns = ScopeColumns {
        owner: "reported_by",
        city: "city",
        severity: Some("severity"),
    };

    #[test]
    fn test_unknown_role_is_forbidden() {
        let err = ScopedQuery::<LitterReportStatus>::visible_to(&actor(None, None)).unwrap_err();
        assert!(matches!(err, LifecycleError::Forbidden(_)));
    }

    #[test]
    fn test_citizen_never_sees_other_citizens_entities() {
        let me = actor(Some(UserRole::Citizen), None);
        let other = Uuid::now_v7();

        let filters = [
            ListFilter::default(),
            ListFilter {
                status: Some(LitterReportStatus::Pending),
                ..Default::default()
            },
            ListFilter {
                severity: Some(Severity::Medium),
                city: Some("Pune".into()),
                ..Default::default()
            },
        ];

        for filter in filters {
            let query = ScopedQuery::for_actor(&me, filter).unwrap();
            assert!(query.city.is_none());
            for status in LitterReportStatus::ALL {
                assert!(!query.matches(&item(other, status, "Pune")));
            }
        }

        let mine = item(me.id, LitterReportStatus::Pending, "Pune");
        assert!(ScopedQuery::visible_to(&me).unwrap().matches(&mine));
    }

    #[test]
    fn test_collector_sees_assigned_and_open_pool_in_city() {
        let me = actor(Some(UserRole::Collector), Some("Pune"));
        let query = ScopedQuery::<LitterReportStatus>::visible_to(&me).unwrap();
        let citizen = Uuid::now_v7();

        assert!(query.matches(&item(citizen, LitterReportStatus::Pending, "Pune")));
        assert!(query.matches(&item(citizen, LitterReportStatus::Verified, "Pune")));
        assert!(!query.matches(&item(citizen, LitterReportStatus::InProgress, "Pune")));
        assert!(!query.matches(&item(citizen, LitterReportStatus::Pending, "Mumbai")));

        let mut assigned = item(citizen, LitterReportStatus::InProgress, "Mumbai");
        assigned.assigned = Some(me.id);
        assert!(query.matches(&assigned));
    }

    #[test]
    fn test_collector_without_area_sees_only_assignments() {
        let me = actor(Some(UserRole::Collector), None);
        let query = ScopedQuery::<LitterReportStatus>::visible_to(&me).unwrap();

        assert!(!query.matches(&item(Uuid::now_v7(), LitterReportStatus::Pending, "Pune")));
    }

    #[test]
    fn test_filters_narrow_visibility() {
        let admin = actor(Some(UserRole::Admin), None);
        let query = ScopedQuery::for_actor(
            &admin,
            ListFilter {
                status: Some(LitterReportStatus::Verified),
                severity: Some(Severity::High),
                city: Some("Pune".into()),
            },
        )
        .unwrap();

        let mut hit = item(Uuid::now_v7(), LitterReportStatus::Verified, "Pune");
        hit.severity = Severity::High;
        assert!(query.matches(&hit));

        hit.severity = Severity::Low;
        assert!(!query.matches(&hit));
        assert!(!query.matches(&item(Uuid::now_v7(), LitterReportStatus::Verified, "Delhi")));
    }

    #[test]
    fn test_pickup_pool_is_pending_only() {
        assert_eq!(PickupStatus::OPEN_POOL, &[PickupStatus::Pending]);
    }

    #[test]
    fn test_collector_sql_shape() {
        let me = actor(Some(UserRole::Collector), Some("Pune"));
        let query = ScopedQuery::for_actor(
            &me,
            ListFilter {
                status: Some(LitterReportStatus::Pending),
                severity: None,
                city: Some("ignored".into()),
            },
        )
        .unwrap();

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM litter_reports");
        query.push_where(&mut qb, &COLUMNS);

        assert_eq!(
            qb.sql(),
            "SELECT * FROM litter_reports WHERE TRUE AND (assigned_to = $1 OR (status IN ($2, $3) AND city = $4)) AND status = $5"
        );
    }

    #[test]
    fn test_owner_sql_skips_missing_severity_column() {
        let me = actor(Some(UserRole::Citizen), None);
        let query = ScopedQuery::<PickupStatus> {
            visibility: Visibility::Owner(me.id),
            status: None,
            severity: Some(Severity::High),
            city: None,
        };
        let columns = ScopeColumns {
            owner: "user_id",
            city: "city",
            severity: None,
        };

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM waste_pickups");
        query.push_where(&mut qb, &columns);

        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM waste_pickups WHERE TRUE AND user_id = $1"
        );
    }
}
