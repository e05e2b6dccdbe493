#![cfg(test)]
//! In-memory collaborators, fixtures and auth injection for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::lifecycle::{ScopedQuery, UpdatePlan};
use crate::features::litter_reports::models::{LitterReport, LitterReportStatus, NewLitterReport};
use crate::features::litter_reports::repositories::LitterReportRepository;
use crate::features::users::models::User;
use crate::features::users::services::UserDirectory;
use crate::features::waste_pickups::models::{NewWastePickup, PickupStatus, WastePickup};
use crate::features::waste_pickups::repositories::WastePickupRepository;
use crate::shared::types::PaginationQuery;

/// Inject `user` into every request, standing in for the JWT middleware
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

fn page<T: Clone>(rows: Vec<T>, pagination: &PaginationQuery) -> Vec<T> {
    rows.into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect()
}

// =============================================================================
// USERS
// =============================================================================

pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.name = name.to_string();
            user.email = email.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn list_collectors(&self, city: Option<&str>) -> Result<Vec<User>> {
        let mut collectors: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.is_collector())
            .filter(|u| city.is_none() || u.assigned_city.as_deref() == city)
            .cloned()
            .collect();
        collectors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(collectors)
    }

    async fn increment_total_pickups(&self, collector_id: Uuid) -> Result<()> {
        if let Some(user) = self
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.id == collector_id)
        {
            user.total_pickups += 1;
        }
        Ok(())
    }

    async fn count_by_role(&self) -> Result<Vec<(String, i64)>> {
        let mut counts: Vec<(String, i64)> = Vec::new();
        for user in self.users.lock().unwrap().iter() {
            match counts.iter_mut().find(|(role, _)| *role == user.role) {
                Some((_, n)) => *n += 1,
                None => counts.push((user.role.clone(), 1)),
            }
        }
        counts.sort();
        Ok(counts)
    }
}

// =============================================================================
// WASTE PICKUPS
// =============================================================================

#[derive(Default)]
pub struct InMemoryWastePickupRepository {
    rows: Mutex<Vec<WastePickup>>,
}

impl InMemoryWastePickupRepository {
    pub fn insert(&self, pickup: WastePickup) -> WastePickup {
        self.rows.lock().unwrap().push(pickup.clone());
        pickup
    }

    pub fn get(&self, id: Uuid) -> Option<WastePickup> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl WastePickupRepository for InMemoryWastePickupRepository {
    async fn create(&self, new: NewWastePickup) -> Result<WastePickup> {
        let now = Utc::now();
        Ok(self.insert(WastePickup {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            street: new.street,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            landmark: new.landmark,
            waste_type: new.waste_type,
            quantity: new.quantity,
            unit: new.unit,
            preferred_date: new.preferred_date,
            preferred_time_slot: new.preferred_time_slot,
            status: PickupStatus::Pending,
            notes: new.notes,
            assigned_to: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WastePickup>> {
        Ok(self.get(id))
    }

    async fn list(
        &self,
        scope: &ScopedQuery<PickupStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<WastePickup>, i64)> {
        let mut rows: Vec<WastePickup> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| scope.matches(*p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as i64;

        Ok((page(rows, pagination), total))
    }

    async fn apply(
        &self,
        id: Uuid,
        plan: &UpdatePlan<PickupStatus>,
    ) -> Result<Option<WastePickup>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(status) = plan.status {
            row.status = status;
        }
        if let Some(assignee) = plan.assigned_to {
            row.assigned_to = Some(assignee);
        }
        if let Some(at) = plan.finished_at {
            row.completed_at = Some(at);
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn count_by_status(&self) -> Result<Vec<(PickupStatus, i64)>> {
        let rows = self.rows.lock().unwrap();
        Ok(PickupStatus::ALL
            .into_iter()
            .map(|s| (s, rows.iter().filter(|p| p.status == s).count() as i64))
            .filter(|(_, n)| *n > 0)
            .collect())
    }
}

// =============================================================================
// LITTER REPORTS
// =============================================================================

#[derive(Default)]
pub struct InMemoryLitterReportRepository {
    rows: Mutex<Vec<LitterReport>>,
}

impl InMemoryLitterReportRepository {
    pub fn insert(&self, report: LitterReport) -> LitterReport {
        self.rows.lock().unwrap().push(report.clone());
        report
    }

    pub fn get(&self, id: Uuid) -> Option<LitterReport> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

#[async_trait]
impl LitterReportRepository for InMemoryLitterReportRepository {
    async fn create(&self, new: NewLitterReport) -> Result<LitterReport> {
        let now = Utc::now();
        Ok(self.insert(LitterReport {
            id: Uuid::now_v7(),
            reported_by: new.reported_by,
            address: new.address,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            latitude: new.latitude,
            longitude: new.longitude,
            description: new.description,
            waste_type: new.waste_type,
            severity: new.severity,
            status: LitterReportStatus::Pending,
            images: new.images,
            assigned_to: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LitterReport>> {
        Ok(self.get(id))
    }

    async fn list(
        &self,
        scope: &ScopedQuery<LitterReportStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<LitterReport>, i64)> {
        let mut rows: Vec<LitterReport> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| scope.matches(*r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as i64;

        Ok((page(rows, pagination), total))
    }

    async fn apply(
        &self,
        id: Uuid,
        plan: &UpdatePlan<LitterReportStatus>,
    ) -> Result<Option<LitterReport>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(status) = plan.status {
            row.status = status;
        }
        if let Some(assignee) = plan.assigned_to {
            row.assigned_to = Some(assignee);
        }
        if let Some(at) = plan.finished_at {
            row.resolved_at = Some(at);
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn count_by_status(&self) -> Result<Vec<(LitterReportStatus, i64)>> {
        let rows = self.rows.lock().unwrap();
        Ok(LitterReportStatus::ALL
            .into_iter()
            .map(|s| (s, rows.iter().filter(|r| r.status == s).count() as i64))
            .filter(|(_, n)| *n > 0)
            .collect())
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub mod fixtures {
    use chrono::{Duration, Utc};
    use fake::faker::address::en::{StateName, StreetName, ZipCode};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::faker::phone_number::en::PhoneNumber;
    use fake::Fake;
    use uuid::Uuid;

    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::litter_reports::dtos::{CreateLitterReportDto, ReportLocationDto};
    use crate::features::litter_reports::models::{LitterReport, LitterReportStatus, Severity};
    use crate::features::users::models::User;
    use crate::features::waste_pickups::dtos::{CreateWastePickupDto, PickupAddressDto};
    use crate::features::waste_pickups::models::{
        PickupStatus, QuantityUnit, TimeSlot, WastePickup,
    };
    use crate::shared::constants::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_COLLECTOR};
    use crate::shared::waste::WasteType;

    fn user(role: &str, city: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: Some(PhoneNumber().fake()),
            role: role.to_string(),
            assigned_city: city.map(String::from),
            assigned_state: city.map(|_| StateName().fake()),
            total_pickups: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn citizen() -> User {
        user(ROLE_CITIZEN, None)
    }

    pub fn collector(city: &str) -> User {
        user(ROLE_COLLECTOR, Some(city))
    }

    pub fn admin() -> User {
        user(ROLE_ADMIN, None)
    }

    pub fn auth(user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user.id,
            email: Some(user.email.clone()),
        }
    }

    /// Stored pending pickup owned by `owner`
    pub fn pickup(owner: Uuid, city: &str) -> WastePickup {
        let now = Utc::now();
        WastePickup {
            id: Uuid::now_v7(),
            user_id: owner,
            street: StreetName().fake(),
            city: city.to_string(),
            state: StateName().fake(),
            pincode: ZipCode().fake(),
            landmark: None,
            waste_type: WasteType::Plastic,
            quantity: (1.0..50.0).fake(),
            unit: QuantityUnit::Kg,
            preferred_date: (now + Duration::days(3)).date_naive(),
            preferred_time_slot: TimeSlot::Morning,
            status: PickupStatus::Pending,
            notes: None,
            assigned_to: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored pending report filed by `reporter`
    pub fn report(reporter: Uuid, city: &str) -> LitterReport {
        let now = Utc::now();
        LitterReport {
            id: Uuid::now_v7(),
            reported_by: reporter,
            address: StreetName().fake(),
            city: city.to_string(),
            state: StateName().fake(),
            pincode: ZipCode().fake(),
            latitude: None,
            longitude: None,
            description: Sentence(6..10).fake(),
            waste_type: WasteType::Organic,
            severity: Severity::Medium,
            status: LitterReportStatus::Pending,
            images: vec![],
            assigned_to: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn pickup_body(city: &str) -> CreateWastePickupDto {
        CreateWastePickupDto {
            address: Some(PickupAddressDto {
                street: Some(StreetName().fake()),
                city: Some(city.to_string()),
                state: Some(StateName().fake()),
                pincode: Some(ZipCode().fake()),
                landmark: None,
            }),
            waste_type: Some(WasteType::Metal),
            quantity: Some(2.5),
            unit: Some(QuantityUnit::Kg),
            preferred_date: Some((Utc::now() + Duration::days(2)).date_naive()),
            preferred_time_slot: Some(TimeSlot::Afternoon),
            notes: None,
        }
    }

    pub fn report_body(city: &str) -> CreateLitterReportDto {
        CreateLitterReportDto {
            location: Some(ReportLocationDto {
                address: Some(StreetName().fake()),
                city: Some(city.to_string()),
                state: Some(StateName().fake()),
                pincode: Some(ZipCode().fake()),
                coordinates: None,
            }),
            description: Some(Sentence(6..10).fake()),
            waste_type: Some(WasteType::Plastic),
            severity: Some(Severity::Low),
            images: vec![],
        }
    }
}
