//! Idempotent demo data: one agent, one farm, one farmer with two cows.
//!
//! Every row is looked up by its natural key first, so running the seed
//! against an already-seeded store changes nothing.

use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use farmhub_auth::PasswordHasher;
use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::types::{CowId, Predicate, Scope};
use farmhub_database::Repositories;
use farmhub_entity::farm::{
    Farm, FarmChanges, FarmFilter, FarmerProfile, FarmerProfileChanges, FarmerProfileFilter,
    NewFarm, NewFarmerProfile,
};
use farmhub_entity::livestock::{
    ActivityFilter, ActivityType, Cow, CowFilter, NewActivity, NewCow,
};
use farmhub_entity::production::{MilkRecordFilter, NewMilkRecord};
use farmhub_entity::user::{NewUser, Role, User, UserFilter};

const FARM_NAME: &str = "Padma Dairy Farm";

/// Creates whatever part of the demo data set is missing.
pub async fn seed(repos: &Repositories, hasher: &PasswordHasher) -> AppResult<()> {
    let _superadmin = ensure_user(
        repos,
        hasher,
        SeedUser {
            username: "superadmin",
            email: "superadmin@farmhub.bd",
            first_name: "",
            last_name: "",
            role: Role::Superadmin,
            password: "SuperAdmin@123",
            platform_admin: true,
        },
    )
    .await?;

    let agent = ensure_user(
        repos,
        hasher,
        SeedUser {
            username: "agent_rajshahi",
            email: "agent.rajshahi@farmhub.bd",
            first_name: "Rajshahi",
            last_name: "Agent",
            role: Role::Agent,
            password: "Agent@123",
            platform_admin: false,
        },
    )
    .await?;

    let farm = ensure_farm(repos, &agent).await?;

    let farmer = ensure_user(
        repos,
        hasher,
        SeedUser {
            username: "farmer_sunamganj",
            email: "farmer.sunamganj@farmhub.bd",
            first_name: "Abdul",
            last_name: "Karim",
            role: Role::Farmer,
            password: "Farmer@123",
            platform_admin: false,
        },
    )
    .await?;

    let profile = ensure_profile(repos, &farmer, &farm).await?;

    let cow1 = ensure_cow(repos, &farm, &profile, "BD-RJ-001", "Red Chittagong").await?;
    let cow2 = ensure_cow(repos, &farm, &profile, "BD-RJ-002", "Sahiwal").await?;

    let today = Utc::now().date_naive();
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| AppError::internal("Date out of range"))?;

    ensure_activity(
        repos,
        cow1.id,
        ActivityType::Vaccination,
        today,
        "FMD vaccine at Union Parishad clinic",
    )
    .await?;
    ensure_activity(
        repos,
        cow2.id,
        ActivityType::Health,
        today,
        "Routine health check by local vet",
    )
    .await?;

    for (cow, date, liters) in [
        (cow1.id, yesterday, "7.50"),
        (cow1.id, today, "7.80"),
        (cow2.id, yesterday, "6.20"),
        (cow2.id, today, "6.45"),
    ] {
        ensure_milk_record(repos, cow, date, liters).await?;
    }

    info!(farm_id = %farm.id, agent_id = %agent.id, "Seed data in place");
    Ok(())
}

struct SeedUser {
    username: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    role: Role,
    password: &'static str,
    platform_admin: bool,
}

async fn ensure_user(
    repos: &Repositories,
    hasher: &PasswordHasher,
    seed: SeedUser,
) -> AppResult<User> {
    let predicate = Predicate::new(
        Scope::Unrestricted,
        UserFilter {
            username: Some(seed.username.to_string()),
            ..Default::default()
        },
    );
    if let Some(user) = repos.users.find(&predicate).await?.into_iter().next() {
        return Ok(user);
    }

    let user = repos
        .users
        .insert(&NewUser {
            username: seed.username.to_string(),
            email: seed.email.to_string(),
            first_name: seed.first_name.to_string(),
            last_name: seed.last_name.to_string(),
            role: seed.role,
            password_hash: hasher.hash(seed.password)?,
            is_staff: seed.platform_admin,
            is_superuser: seed.platform_admin,
        })
        .await?;
    info!(user_id = %user.id, username = %user.username, "Seeded user");
    Ok(user)
}

async fn ensure_farm(repos: &Repositories, agent: &User) -> AppResult<Farm> {
    let existing = repos
        .farms
        .find(&Predicate::new(Scope::Unrestricted, FarmFilter::default()))
        .await?
        .into_iter()
        .find(|f| f.name == FARM_NAME);

    match existing {
        Some(farm) if farm.agent_id == Some(agent.id) => Ok(farm),
        Some(farm) => {
            let changes = FarmChanges {
                agent_id: Some(Some(agent.id)),
                ..Default::default()
            };
            repos.farms.update(farm.id, &changes).await
        }
        None => {
            repos
                .farms
                .insert(&NewFarm {
                    name: FARM_NAME.to_string(),
                    location: "Rajshahi, Bangladesh".to_string(),
                    agent_id: Some(agent.id),
                })
                .await
        }
    }
}

async fn ensure_profile(repos: &Repositories, farmer: &User, farm: &Farm) -> AppResult<FarmerProfile> {
    let predicate = Predicate::new(
        Scope::Unrestricted,
        FarmerProfileFilter {
            user_id: Some(farmer.id),
            ..Default::default()
        },
    );
    match repos.profiles.find(&predicate).await?.into_iter().next() {
        Some(profile) if profile.farm_id == farm.id => Ok(profile),
        Some(profile) => {
            let changes = FarmerProfileChanges {
                farm_id: Some(farm.id),
                ..Default::default()
            };
            repos.profiles.update(profile.id, &changes).await
        }
        None => {
            repos
                .profiles
                .insert(&NewFarmerProfile {
                    user_id: farmer.id,
                    farm_id: farm.id,
                })
                .await
        }
    }
}

async fn ensure_cow(
    repos: &Repositories,
    farm: &Farm,
    owner: &FarmerProfile,
    tag: &str,
    breed: &str,
) -> AppResult<Cow> {
    let predicate = Predicate::new(
        Scope::Unrestricted,
        CowFilter {
            farm_id: Some(farm.id),
            ..Default::default()
        },
    );
    if let Some(cow) = repos
        .cows
        .find(&predicate)
        .await?
        .into_iter()
        .find(|c| c.tag == tag)
    {
        return Ok(cow);
    }

    repos
        .cows
        .insert(&NewCow {
            tag: tag.to_string(),
            breed: breed.to_string(),
            dob: None,
            farm_id: farm.id,
            owner_id: owner.id,
        })
        .await
}

async fn ensure_activity(
    repos: &Repositories,
    cow_id: CowId,
    activity_type: ActivityType,
    date: NaiveDate,
    notes: &str,
) -> AppResult<()> {
    let predicate = Predicate::new(
        Scope::Unrestricted,
        ActivityFilter {
            cow_id: Some(cow_id),
            activity_type: Some(activity_type),
            ..Default::default()
        },
    );
    let exists = repos
        .activities
        .find(&predicate)
        .await?
        .iter()
        .any(|a| a.date == date);
    if !exists {
        repos
            .activities
            .insert(&NewActivity {
                cow_id,
                activity_type,
                notes: notes.to_string(),
                date,
            })
            .await?;
    }
    Ok(())
}

async fn ensure_milk_record(
    repos: &Repositories,
    cow_id: CowId,
    date: NaiveDate,
    liters: &str,
) -> AppResult<()> {
    let predicate = Predicate::new(
        Scope::Unrestricted,
        MilkRecordFilter {
            cow_id: Some(cow_id),
            date_from: Some(date),
            date_to: Some(date),
            ..Default::default()
        },
    );
    if !repos.milk_records.exists(&predicate).await? {
        let liters = Decimal::from_str(liters)
            .map_err(|e| AppError::internal(format!("Bad seed quantity: {e}")))?;
        repos
            .milk_records
            .insert(&NewMilkRecord {
                cow_id,
                date,
                liters,
            })
            .await?;
    }
    Ok(())
}
