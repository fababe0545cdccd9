//! The authorization engine.
//!
//! Every service call goes through here before touching the data store.
//! The engine answers three questions:
//!
//! 1. may this actor perform this operation on this kind of resource at
//!    all, and within which [`Scope`];
//! 2. is a concrete target row inside that scope (targets outside it are
//!    reported as not found, never as forbidden);
//! 3. which ownership fields of a write payload must be checked against the
//!    actor's farms or overwritten with the actor's own profile.
//!
//! Nothing here writes. A denial leaves the store untouched.

use tracing::{debug, warn};

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::{Repository, Resource};
use farmhub_core::types::{CowId, FarmId, Predicate, ResourceKind, Scope, UserId};
use farmhub_database::Repositories;
use farmhub_entity::farm::{
    CreateFarmerProfile, Farm, FarmChanges, FarmerProfile, FarmerProfileChanges,
    FarmerProfileFilter, NewFarm, NewFarmerProfile,
};
use farmhub_entity::livestock::{Cow, CowChanges, CreateCow, NewCow};
use farmhub_entity::user::{CreateUser, Role, UpdateUser, User};

use crate::actor::{Actor, Principal};

use super::policies::{Decision, Operation, RbacPolicies};

/// Applies [`RbacPolicies`] to concrete actors, targets and payloads.
#[derive(Clone)]
pub struct AuthorizationEngine {
    repos: Repositories,
    policies: RbacPolicies,
}

impl std::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationEngine")
            .field("policies", &self.policies)
            .finish()
    }
}

impl AuthorizationEngine {
    /// Creates an engine with the default rule table.
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            policies: RbacPolicies::new(),
        }
    }

    /// The repositories the engine resolves targets and parents against.
    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// The row scope for an operation, or `Forbidden` if the rule table
    /// denies it outright.
    pub fn scope(&self, actor: &Actor, kind: ResourceKind, op: Operation) -> AppResult<Scope> {
        match self.policies.decide(actor.principal(), kind, op) {
            Decision::Allow(scope) => Ok(scope),
            Decision::Deny(reason) => Err(deny(actor, kind, op, reason)),
        }
    }

    /// The predicate for a list call: the actor's scope plus the caller's
    /// attribute filter.
    pub fn list_predicate<R: Resource>(
        &self,
        actor: &Actor,
        filter: R::Filter,
    ) -> AppResult<Predicate<R::Filter>> {
        let scope = self.scope(actor, R::KIND, Operation::List)?;
        Ok(Predicate::new(scope, filter))
    }

    /// Load a target for retrieve, update or delete.
    ///
    /// Missing rows and rows outside the actor's scope both produce the same
    /// `NotFound`; the real cause is only logged.
    pub async fn authorize_target<R: Resource>(
        &self,
        actor: &Actor,
        repo: &dyn Repository<R>,
        op: Operation,
        id: R::Id,
    ) -> AppResult<R> {
        let scope = self.scope(actor, R::KIND, op)?;

        let Some(row) = repo.find_one(id).await? else {
            debug!(
                actor_id = %actor.user_id,
                resource = %R::KIND,
                operation = %op,
                target_id = %id,
                "Target does not exist"
            );
            return Err(AppError::not_found(R::KIND.not_found_message()));
        };

        if scope != Scope::Unrestricted && !repo.exists(&Predicate::new(scope, R::by_id(id))).await? {
            debug!(
                actor_id = %actor.user_id,
                resource = %R::KIND,
                operation = %op,
                target_id = %id,
                "Target exists outside the actor's scope"
            );
            return Err(AppError::not_found(R::KIND.not_found_message()));
        }

        Ok(row)
    }

    // ── Farms ────────────────────────────────────────────────────────

    /// Agents may only create farms for themselves; a missing agent is
    /// filled in with the caller.
    pub fn prepare_farm_create(&self, actor: &Actor, mut new: NewFarm) -> AppResult<NewFarm> {
        let op = Operation::Create;
        self.scope(actor, ResourceKind::Farm, op)?;

        if let Principal::Agent(agent) = actor.principal() {
            if new.agent_id.is_some_and(|requested| requested != agent) {
                return Err(deny(
                    actor,
                    ResourceKind::Farm,
                    op,
                    "Agents can only create farms assigned to themselves.",
                ));
            }
            new.agent_id = Some(agent);
        }
        Ok(new)
    }

    /// Agents cannot move a farm to another agent or unassign it.
    pub fn check_farm_update(&self, actor: &Actor, changes: &FarmChanges) -> AppResult<()> {
        if let Principal::Agent(agent) = actor.principal() {
            if changes.agent_id.is_some_and(|requested| requested != Some(agent)) {
                return Err(deny(
                    actor,
                    ResourceKind::Farm,
                    Operation::Update,
                    "Agents cannot reassign farms to other agents.",
                ));
            }
        }
        Ok(())
    }

    // ── Farmer profiles ──────────────────────────────────────────────

    /// Resolve the user and farm of a new profile. The farm must lie within
    /// the actor's scope.
    pub async fn prepare_profile_create(
        &self,
        actor: &Actor,
        payload: CreateFarmerProfile,
    ) -> AppResult<NewFarmerProfile> {
        let op = Operation::Create;
        let scope = self.scope(actor, ResourceKind::FarmerProfile, op)?;

        let farm_id = payload
            .farm_id
            .ok_or_else(|| AppError::validation("farm_id: This field is required."))?;
        let user_id = payload
            .user_id
            .ok_or_else(|| AppError::validation("user_id: This field is required."))?;

        self.require_farm(
            actor,
            ResourceKind::FarmerProfile,
            op,
            scope,
            farm_id,
            "You can only manage profiles for your own farms.",
        )
        .await?;

        Ok(NewFarmerProfile { user_id, farm_id })
    }

    /// Agents may only move profiles between their own farms. Farmers
    /// cannot move their profile at all.
    pub async fn check_profile_update(
        &self,
        actor: &Actor,
        target: &FarmerProfile,
        changes: &FarmerProfileChanges,
    ) -> AppResult<()> {
        let op = Operation::Update;
        let kind = ResourceKind::FarmerProfile;
        match actor.principal() {
            Principal::Agent(_) => {
                if let Some(farm_id) = changes.farm_id {
                    let scope = self.scope(actor, kind, op)?;
                    self.require_farm(
                        actor,
                        kind,
                        op,
                        scope,
                        farm_id,
                        "You can only manage profiles for your own farms.",
                    )
                    .await?;
                }
            }
            Principal::Farmer(_) => {
                let moves_user = changes.user_id.is_some_and(|u| u != target.user_id);
                let moves_farm = changes.farm_id.is_some_and(|f| f != target.farm_id);
                if moves_user || moves_farm {
                    return Err(deny(
                        actor,
                        kind,
                        op,
                        "Farmers cannot move their profile to another user or farm.",
                    ));
                }
            }
            Principal::PlatformAdmin | Principal::Other => {}
        }
        Ok(())
    }

    // ── Cows ─────────────────────────────────────────────────────────

    /// Resolve the farm and owner of a new cow.
    ///
    /// Farmers always get their own farm and profile, whatever the payload
    /// says. Everyone else must name a farm inside their scope and an owner.
    pub async fn prepare_cow_create(&self, actor: &Actor, payload: CreateCow) -> AppResult<NewCow> {
        let op = Operation::Create;
        let scope = self.scope(actor, ResourceKind::Cow, op)?;

        let (farm_id, owner_id) = match actor.principal() {
            Principal::Farmer(user) => {
                let profile = self.own_profile(actor, user, op).await?;
                (profile.farm_id, profile.id)
            }
            _ => {
                let farm_id = payload
                    .farm_id
                    .ok_or_else(|| AppError::validation("farm_id: This field is required."))?;
                self.require_farm(
                    actor,
                    ResourceKind::Cow,
                    op,
                    scope,
                    farm_id,
                    "You can only add cows to your own farms.",
                )
                .await?;
                let owner_id = payload
                    .owner_id
                    .ok_or_else(|| AppError::validation("owner_id: This field is required."))?;
                (farm_id, owner_id)
            }
        };

        Ok(NewCow {
            tag: payload.tag,
            breed: payload.breed,
            dob: payload.dob,
            farm_id,
            owner_id,
        })
    }

    /// Farmers' farm and owner changes are overwritten with their own
    /// profile; agents may only move cows between their own farms.
    pub async fn prepare_cow_update(
        &self,
        actor: &Actor,
        mut changes: CowChanges,
    ) -> AppResult<CowChanges> {
        let op = Operation::Update;
        match actor.principal() {
            Principal::Farmer(user) => {
                if changes.farm_id.is_some() || changes.owner_id.is_some() {
                    let profile = self.own_profile(actor, user, op).await?;
                    changes.farm_id = changes.farm_id.map(|_| profile.farm_id);
                    changes.owner_id = changes.owner_id.map(|_| profile.id);
                }
            }
            Principal::Agent(_) => {
                if let Some(farm_id) = changes.farm_id {
                    let scope = self.scope(actor, ResourceKind::Cow, op)?;
                    self.require_farm(
                        actor,
                        ResourceKind::Cow,
                        op,
                        scope,
                        farm_id,
                        "You can only move cows between your own farms.",
                    )
                    .await?;
                }
            }
            Principal::PlatformAdmin | Principal::Other => {}
        }
        Ok(changes)
    }

    // ── Cow children (activities, milk records) ──────────────────────

    /// The cow a new or moved activity or milk record hangs off must be
    /// inside the actor's scope for that kind of record.
    pub async fn require_cow(
        &self,
        actor: &Actor,
        kind: ResourceKind,
        op: Operation,
        cow_id: CowId,
    ) -> AppResult<Cow> {
        let scope = self.scope(actor, kind, op)?;

        let cow = self
            .repos
            .cows
            .find_one(cow_id)
            .await?
            .ok_or_else(|| AppError::validation("cow_id: Cow not found."))?;

        if scope != Scope::Unrestricted
            && !self
                .repos
                .cows
                .exists(&Predicate::new(scope, Cow::by_id(cow_id)))
                .await?
        {
            return Err(deny(
                actor,
                kind,
                op,
                "You do not have permission to manage records for this cow.",
            ));
        }
        Ok(cow)
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Agents may only create FARMER accounts. Platform flags are never
    /// taken from the payload.
    pub fn check_user_create(&self, actor: &Actor, payload: &CreateUser) -> AppResult<()> {
        let op = Operation::Create;
        self.scope(actor, ResourceKind::User, op)?;

        if matches!(actor.principal(), Principal::Agent(_)) && payload.role != Role::Farmer {
            return Err(deny(
                actor,
                ResourceKind::User,
                op,
                "Agents can only create farmer accounts.",
            ));
        }
        Ok(())
    }

    /// Only platform admins may change a role or the active flag.
    pub fn check_user_update(
        &self,
        actor: &Actor,
        target: &User,
        payload: &UpdateUser,
    ) -> AppResult<()> {
        if actor.is_platform_admin() {
            return Ok(());
        }
        let op = Operation::Update;
        if payload.role.is_some_and(|role| role != target.role) {
            return Err(deny(
                actor,
                ResourceKind::User,
                op,
                "Only administrators can change a user's role.",
            ));
        }
        if payload.is_active.is_some_and(|active| active != target.is_active) {
            return Err(deny(
                actor,
                ResourceKind::User,
                op,
                "Only administrators can activate or deactivate accounts.",
            ));
        }
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// The caller's own farmer profile, or `Forbidden` if it has none.
    async fn own_profile(
        &self,
        actor: &Actor,
        user: UserId,
        op: Operation,
    ) -> AppResult<FarmerProfile> {
        let predicate = Predicate::new(
            Scope::Unrestricted,
            FarmerProfileFilter {
                user_id: Some(user),
                ..Default::default()
            },
        );
        self.repos
            .profiles
            .find(&predicate)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                deny(
                    actor,
                    ResourceKind::Cow,
                    op,
                    "You do not have a farmer profile.",
                )
            })
    }

    /// A referenced farm must exist (validation) and lie within the scope
    /// (forbidden).
    async fn require_farm(
        &self,
        actor: &Actor,
        kind: ResourceKind,
        op: Operation,
        scope: Scope,
        farm_id: FarmId,
        reason: &'static str,
    ) -> AppResult<Farm> {
        let farm = self
            .repos
            .farms
            .find_one(farm_id)
            .await?
            .ok_or_else(|| AppError::validation("farm_id: Farm not found."))?;

        if scope != Scope::Unrestricted
            && !self
                .repos
                .farms
                .exists(&Predicate::new(scope, Farm::by_id(farm_id)))
                .await?
        {
            return Err(deny(actor, kind, op, reason));
        }
        Ok(farm)
    }
}

/// Build a `Forbidden` error and record it in the audit log.
fn deny(actor: &Actor, kind: ResourceKind, op: Operation, reason: &str) -> AppError {
    warn!(
        actor_id = %actor.user_id,
        resource = %kind,
        operation = %op,
        reason,
        "Authorization denied"
    );
    AppError::forbidden(reason)
}
