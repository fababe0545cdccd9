//! Storage rules for each entity in the in-process store.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Utc;

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::types::{
    ActivityId, CowId, FarmId, FarmerProfileId, MilkRecordId, Scope, UserId,
};
use farmhub_entity::farm::{
    Farm, FarmChanges, FarmFilter, FarmerProfile, FarmerProfileChanges, FarmerProfileFilter,
    NewFarm, NewFarmerProfile,
};
use farmhub_entity::livestock::{
    Activity, ActivityChanges, ActivityFilter, Cow, CowChanges, CowFilter, NewActivity, NewCow,
};
use farmhub_entity::production::{MilkRecord, MilkRecordChanges, MilkRecordFilter, NewMilkRecord};
use farmhub_entity::user::{NewUser, Role, User, UserChanges, UserFilter};

use super::{Table, Tables};

impl Tables {
    fn farm_managed_by(&self, farm_id: FarmId, agent: UserId) -> bool {
        self.farms
            .get(&farm_id)
            .is_some_and(|farm| farm.agent_id == Some(agent))
    }

    fn profile_owned_by(&self, profile_id: FarmerProfileId, user: UserId) -> bool {
        self.profiles
            .get(&profile_id)
            .is_some_and(|profile| profile.user_id == user)
    }

    fn cow_visible(&self, cow_id: CowId, scope: &Scope) -> bool {
        self.cows
            .get(&cow_id)
            .is_some_and(|cow| cow.visible(self, scope))
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        for farm in self.farms.values_mut() {
            if farm.agent_id == Some(id) {
                farm.agent_id = None;
            }
        }
        let profiles: Vec<_> = self
            .profiles
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for profile in profiles {
            self.remove_profile(profile);
        }
        true
    }

    fn remove_farm(&mut self, id: FarmId) -> bool {
        if self.farms.remove(&id).is_none() {
            return false;
        }
        let cows: Vec<_> = self
            .cows
            .values()
            .filter(|c| c.farm_id == id)
            .map(|c| c.id)
            .collect();
        for cow in cows {
            self.remove_cow(cow);
        }
        let profiles: Vec<_> = self
            .profiles
            .values()
            .filter(|p| p.farm_id == id)
            .map(|p| p.id)
            .collect();
        for profile in profiles {
            self.remove_profile(profile);
        }
        true
    }

    fn remove_profile(&mut self, id: FarmerProfileId) -> bool {
        if self.profiles.remove(&id).is_none() {
            return false;
        }
        let cows: Vec<_> = self
            .cows
            .values()
            .filter(|c| c.owner_id == id)
            .map(|c| c.id)
            .collect();
        for cow in cows {
            self.remove_cow(cow);
        }
        true
    }

    fn remove_cow(&mut self, id: CowId) -> bool {
        if self.cows.remove(&id).is_none() {
            return false;
        }
        self.activities.retain(|_, a| a.cow_id != id);
        self.milk_records.retain(|_, m| m.cow_id != id);
        true
    }
}

impl Table for User {
    fn rows(tables: &Tables) -> &BTreeMap<UserId, Self> {
        &tables.users
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<UserId, Self> {
        &mut tables.users
    }

    fn make_id(raw: i64) -> UserId {
        UserId(raw)
    }

    fn create(id: UserId, new: &NewUser) -> Self {
        Self {
            id,
            username: new.username.clone(),
            email: new.email.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            role: new.role,
            is_active: true,
            is_staff: new.is_staff,
            is_superuser: new.is_superuser,
            password_hash: new.password_hash.clone(),
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn apply(&self, changes: &UserChanges) -> Self {
        let mut user = self.clone();
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(last_login) = changes.last_login {
            user.last_login = Some(last_login);
        }
        user
    }

    fn visible(&self, _tables: &Tables, scope: &Scope) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::ManagedBy(agent) => self.id == *agent || self.role == Role::Farmer,
            Scope::OwnedBy(user) => self.id == *user,
            Scope::Nothing => false,
        }
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        b.date_joined.cmp(&a.date_joined).then(b.id.cmp(&a.id))
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        let taken = tables
            .users
            .values()
            .any(|u| u.id != self.id && u.username == self.username);
        if taken {
            return Err(AppError::constraint(
                "A user with that username already exists.",
            ));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: UserId) -> bool {
        tables.remove_user(id)
    }
}

impl Table for Farm {
    fn rows(tables: &Tables) -> &BTreeMap<FarmId, Self> {
        &tables.farms
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<FarmId, Self> {
        &mut tables.farms
    }

    fn make_id(raw: i64) -> FarmId {
        FarmId(raw)
    }

    fn create(id: FarmId, new: &NewFarm) -> Self {
        Self {
            id,
            name: new.name.clone(),
            location: new.location.clone(),
            agent_id: new.agent_id,
        }
    }

    fn apply(&self, changes: &FarmChanges) -> Self {
        let mut farm = self.clone();
        if let Some(name) = &changes.name {
            farm.name = name.clone();
        }
        if let Some(location) = &changes.location {
            farm.location = location.clone();
        }
        if let Some(agent_id) = changes.agent_id {
            farm.agent_id = agent_id;
        }
        farm
    }

    fn visible(&self, _tables: &Tables, scope: &Scope) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::ManagedBy(agent) => self.agent_id == Some(*agent),
            Scope::OwnedBy(_) | Scope::Nothing => false,
        }
    }

    fn matches(&self, filter: &FarmFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name).then(a.id.cmp(&b.id))
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        if let Some(agent) = self.agent_id {
            if !tables.users.contains_key(&agent) {
                return Err(AppError::constraint("Agent not found."));
            }
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: FarmId) -> bool {
        tables.remove_farm(id)
    }
}

impl Table for FarmerProfile {
    fn rows(tables: &Tables) -> &BTreeMap<FarmerProfileId, Self> {
        &tables.profiles
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<FarmerProfileId, Self> {
        &mut tables.profiles
    }

    fn make_id(raw: i64) -> FarmerProfileId {
        FarmerProfileId(raw)
    }

    fn create(id: FarmerProfileId, new: &NewFarmerProfile) -> Self {
        Self {
            id,
            user_id: new.user_id,
            farm_id: new.farm_id,
        }
    }

    fn apply(&self, changes: &FarmerProfileChanges) -> Self {
        Self {
            id: self.id,
            user_id: changes.user_id.unwrap_or(self.user_id),
            farm_id: changes.farm_id.unwrap_or(self.farm_id),
        }
    }

    fn visible(&self, tables: &Tables, scope: &Scope) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::ManagedBy(agent) => tables.farm_managed_by(self.farm_id, *agent),
            Scope::OwnedBy(user) => self.user_id == *user,
            Scope::Nothing => false,
        }
    }

    fn matches(&self, filter: &FarmerProfileFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.id.cmp(&b.id)
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        if !tables.users.contains_key(&self.user_id) {
            return Err(AppError::constraint("User not found."));
        }
        if !tables.farms.contains_key(&self.farm_id) {
            return Err(AppError::constraint("Farm not found."));
        }
        let taken = tables
            .profiles
            .values()
            .any(|p| p.id != self.id && p.user_id == self.user_id);
        if taken {
            return Err(AppError::constraint(
                "This user already has a farmer profile.",
            ));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: FarmerProfileId) -> bool {
        tables.remove_profile(id)
    }
}

impl Table for Cow {
    fn rows(tables: &Tables) -> &BTreeMap<CowId, Self> {
        &tables.cows
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<CowId, Self> {
        &mut tables.cows
    }

    fn make_id(raw: i64) -> CowId {
        CowId(raw)
    }

    fn create(id: CowId, new: &NewCow) -> Self {
        Self {
            id,
            tag: new.tag.clone(),
            breed: new.breed.clone(),
            dob: new.dob,
            farm_id: new.farm_id,
            owner_id: new.owner_id,
        }
    }

    fn apply(&self, changes: &CowChanges) -> Self {
        let mut cow = self.clone();
        if let Some(tag) = &changes.tag {
            cow.tag = tag.clone();
        }
        if let Some(breed) = &changes.breed {
            cow.breed = breed.clone();
        }
        if let Some(dob) = changes.dob {
            cow.dob = dob;
        }
        if let Some(farm_id) = changes.farm_id {
            cow.farm_id = farm_id;
        }
        if let Some(owner_id) = changes.owner_id {
            cow.owner_id = owner_id;
        }
        cow
    }

    fn visible(&self, tables: &Tables, scope: &Scope) -> bool {
        match scope {
            Scope::Unrestricted => true,
            Scope::ManagedBy(agent) => tables.farm_managed_by(self.farm_id, *agent),
            Scope::OwnedBy(user) => tables.profile_owned_by(self.owner_id, *user),
            Scope::Nothing => false,
        }
    }

    fn matches(&self, filter: &CowFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.id.cmp(&b.id)
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        if !tables.farms.contains_key(&self.farm_id) {
            return Err(AppError::constraint("Farm not found."));
        }
        if !tables.profiles.contains_key(&self.owner_id) {
            return Err(AppError::constraint("FarmerProfile not found."));
        }
        let taken = tables
            .cows
            .values()
            .any(|c| c.id != self.id && c.farm_id == self.farm_id && c.tag == self.tag);
        if taken {
            return Err(AppError::constraint(
                "A cow with this tag already exists on this farm.",
            ));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: CowId) -> bool {
        tables.remove_cow(id)
    }
}

impl Table for Activity {
    fn rows(tables: &Tables) -> &BTreeMap<ActivityId, Self> {
        &tables.activities
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<ActivityId, Self> {
        &mut tables.activities
    }

    fn make_id(raw: i64) -> ActivityId {
        ActivityId(raw)
    }

    fn create(id: ActivityId, new: &NewActivity) -> Self {
        Self {
            id,
            cow_id: new.cow_id,
            activity_type: new.activity_type,
            notes: new.notes.clone(),
            date: new.date,
        }
    }

    fn apply(&self, changes: &ActivityChanges) -> Self {
        Self {
            id: self.id,
            cow_id: changes.cow_id.unwrap_or(self.cow_id),
            activity_type: changes.activity_type.unwrap_or(self.activity_type),
            notes: changes.notes.clone().unwrap_or_else(|| self.notes.clone()),
            date: changes.date.unwrap_or(self.date),
        }
    }

    fn visible(&self, tables: &Tables, scope: &Scope) -> bool {
        tables.cow_visible(self.cow_id, scope)
    }

    fn matches(&self, filter: &ActivityFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date).then(b.id.cmp(&a.id))
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        if !tables.cows.contains_key(&self.cow_id) {
            return Err(AppError::constraint("Cow not found."));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: ActivityId) -> bool {
        tables.activities.remove(&id).is_some()
    }
}

impl Table for MilkRecord {
    fn rows(tables: &Tables) -> &BTreeMap<MilkRecordId, Self> {
        &tables.milk_records
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<MilkRecordId, Self> {
        &mut tables.milk_records
    }

    fn make_id(raw: i64) -> MilkRecordId {
        MilkRecordId(raw)
    }

    fn create(id: MilkRecordId, new: &NewMilkRecord) -> Self {
        Self {
            id,
            cow_id: new.cow_id,
            date: new.date,
            liters: new.liters,
        }
    }

    fn apply(&self, changes: &MilkRecordChanges) -> Self {
        Self {
            id: self.id,
            cow_id: changes.cow_id.unwrap_or(self.cow_id),
            date: changes.date.unwrap_or(self.date),
            liters: changes.liters.unwrap_or(self.liters),
        }
    }

    fn visible(&self, tables: &Tables, scope: &Scope) -> bool {
        tables.cow_visible(self.cow_id, scope)
    }

    fn matches(&self, filter: &MilkRecordFilter) -> bool {
        filter.matches(self)
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date).then(b.id.cmp(&a.id))
    }

    fn check(&self, tables: &Tables) -> AppResult<()> {
        if !tables.cows.contains_key(&self.cow_id) {
            return Err(AppError::constraint("Cow not found."));
        }
        if self.liters.is_sign_negative() && !self.liters.is_zero() {
            return Err(AppError::constraint("liters: must not be negative"));
        }
        let taken = tables
            .milk_records
            .values()
            .any(|m| m.id != self.id && m.cow_id == self.cow_id && m.date == self.date);
        if taken {
            return Err(AppError::constraint(
                "A milk record for this cow and date already exists.",
            ));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: MilkRecordId) -> bool {
        tables.milk_records.remove(&id).is_some()
    }
}
