//! Shared fixture for the service tests.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use farmhub_auth::{Actor, AuthorizationEngine};
use farmhub_core::types::{ActivityId, CowId, FarmId, FarmerProfileId, MilkRecordId, UserId};
use farmhub_database::{MemoryStore, Repositories};
use farmhub_entity::farm::{NewFarm, NewFarmerProfile};
use farmhub_entity::livestock::{ActivityType, NewActivity, NewCow};
use farmhub_entity::production::NewMilkRecord;
use farmhub_entity::user::{NewUser, Role, User};

use crate::context::RequestContext;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

pub fn liters(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Two agents with one farm each, an unassigned farm, and farmers with
/// cows on both assigned farms.
pub struct World {
    pub engine: Arc<AuthorizationEngine>,
    pub repos: Repositories,
    pub admin: RequestContext,
    pub agent: RequestContext,
    pub other_agent: RequestContext,
    pub idle_agent: RequestContext,
    pub farmer: RequestContext,
    pub neighbour: RequestContext,
    pub lone_farmer: RequestContext,
    pub nobody: RequestContext,
    pub farm: FarmId,
    pub other_farm: FarmId,
    pub unassigned_farm: FarmId,
    pub profile: FarmerProfileId,
    pub neighbour_profile: FarmerProfileId,
    pub other_profile: FarmerProfileId,
    pub cow: CowId,
    pub neighbour_cow: CowId,
    pub other_cow: CowId,
    pub activity: ActivityId,
    pub milk_record: MilkRecordId,
}

async fn user(repos: &Repositories, username: &str, role: Role) -> User {
    repos
        .users
        .insert(&NewUser {
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            password_hash: "hash".into(),
            is_staff: false,
            is_superuser: false,
        })
        .await
        .unwrap()
}

fn ctx(user: &User) -> RequestContext {
    RequestContext::new(Actor::from_user(user))
}

impl World {
    pub async fn build() -> Self {
        let repos = Repositories::memory(MemoryStore::new());

        let admin = user(&repos, "superadmin", Role::Superadmin).await;
        let agent = user(&repos, "agent", Role::Agent).await;
        let other_agent = user(&repos, "agent_other", Role::Agent).await;
        let idle_agent = user(&repos, "agent_idle", Role::Agent).await;
        let farmer = user(&repos, "farmer", Role::Farmer).await;
        let neighbour = user(&repos, "farmer_neighbour", Role::Farmer).await;
        let other_farmer = user(&repos, "farmer_other", Role::Farmer).await;
        let lone_farmer = user(&repos, "farmer_lone", Role::Farmer).await;

        let farm = |name: &str, agent_id: Option<UserId>| NewFarm {
            name: name.into(),
            location: "Bangladesh".into(),
            agent_id,
        };
        let padma = repos.farms.insert(&farm("Padma", Some(agent.id))).await.unwrap();
        let jamuna = repos
            .farms
            .insert(&farm("Jamuna", Some(other_agent.id)))
            .await
            .unwrap();
        let meghna = repos.farms.insert(&farm("Meghna", None)).await.unwrap();

        let profile = |user_id: UserId, farm_id: FarmId| NewFarmerProfile { user_id, farm_id };
        let own = repos.profiles.insert(&profile(farmer.id, padma.id)).await.unwrap();
        let next_door = repos
            .profiles
            .insert(&profile(neighbour.id, padma.id))
            .await
            .unwrap();
        let foreign = repos
            .profiles
            .insert(&profile(other_farmer.id, jamuna.id))
            .await
            .unwrap();

        let cow = |tag: &str, farm_id: FarmId, owner_id: FarmerProfileId| NewCow {
            tag: tag.into(),
            breed: "Sahiwal".into(),
            dob: None,
            farm_id,
            owner_id,
        };
        let own_cow = repos.cows.insert(&cow("BD-RJ-001", padma.id, own.id)).await.unwrap();
        let next_door_cow = repos
            .cows
            .insert(&cow("BD-RJ-002", padma.id, next_door.id))
            .await
            .unwrap();
        let foreign_cow = repos
            .cows
            .insert(&cow("BD-SG-001", jamuna.id, foreign.id))
            .await
            .unwrap();

        let activity = repos
            .activities
            .insert(&NewActivity {
                cow_id: own_cow.id,
                activity_type: ActivityType::Vaccination,
                notes: "FMD vaccine".into(),
                date: day(1),
            })
            .await
            .unwrap();
        let milk_record = repos
            .milk_records
            .insert(&NewMilkRecord {
                cow_id: own_cow.id,
                date: day(1),
                liters: liters("7.50"),
            })
            .await
            .unwrap();

        let nobody = RequestContext::new(Actor {
            user_id: UserId(9_999),
            is_superuser: false,
            is_staff: false,
            role: None,
        });

        Self {
            engine: Arc::new(AuthorizationEngine::new(repos.clone())),
            repos,
            admin: ctx(&admin),
            agent: ctx(&agent),
            other_agent: ctx(&other_agent),
            idle_agent: ctx(&idle_agent),
            farmer: ctx(&farmer),
            neighbour: ctx(&neighbour),
            lone_farmer: ctx(&lone_farmer),
            nobody,
            farm: padma.id,
            other_farm: jamuna.id,
            unassigned_farm: meghna.id,
            profile: own.id,
            neighbour_profile: next_door.id,
            other_profile: foreign.id,
            cow: own_cow.id,
            neighbour_cow: next_door_cow.id,
            other_cow: foreign_cow.id,
            activity: activity.id,
            milk_record: milk_record.id,
        }
    }
}
