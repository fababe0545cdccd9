//! Shared test helpers for integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use farmhub_auth::JwtEncoder;
use farmhub_core::config::AppConfig;
use farmhub_core::types::{CowId, FarmId, FarmerProfileId};
use farmhub_database::{MemoryStore, Repositories};
use farmhub_entity::farm::{NewFarm, NewFarmerProfile};
use farmhub_entity::livestock::NewCow;
use farmhub_entity::user::{NewUser, Role, User};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct access to the backing store
    pub repos: Repositories,
    /// Issues bearer tokens for seeded users
    pub encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let repos = Repositories::memory(MemoryStore::new());
        let encoder = JwtEncoder::new(&config.auth);
        let state = farmhub_api::build_state(config, repos.clone());
        let router = farmhub_api::build_app(state);

        Self {
            router,
            repos,
            encoder,
        }
    }

    /// Insert a user directly, bypassing the API
    pub async fn create_user(&self, username: &str, role: Role) -> User {
        self.insert_user(username, role, false).await
    }

    /// Insert a superuser
    pub async fn create_superadmin(&self, username: &str) -> User {
        self.insert_user(username, Role::Superadmin, true).await
    }

    async fn insert_user(&self, username: &str, role: Role, platform: bool) -> User {
        self.repos
            .users
            .insert(&NewUser {
                username: username.to_string(),
                email: format!("{username}@farmhub.test"),
                first_name: String::new(),
                last_name: String::new(),
                role,
                password_hash: "!unusable".to_string(),
                is_staff: platform,
                is_superuser: platform,
            })
            .await
            .expect("Failed to insert user")
    }

    /// Insert a farm
    pub async fn create_farm(&self, name: &str, agent: Option<&User>) -> FarmId {
        self.repos
            .farms
            .insert(&NewFarm {
                name: name.to_string(),
                location: "Rajshahi".to_string(),
                agent_id: agent.map(|a| a.id),
            })
            .await
            .expect("Failed to insert farm")
            .id
    }

    /// Insert a farmer profile
    pub async fn create_profile(&self, user: &User, farm_id: FarmId) -> FarmerProfileId {
        self.repos
            .profiles
            .insert(&NewFarmerProfile {
                user_id: user.id,
                farm_id,
            })
            .await
            .expect("Failed to insert profile")
            .id
    }

    /// Insert a cow
    pub async fn create_cow(&self, tag: &str, farm_id: FarmId, owner_id: FarmerProfileId) -> CowId {
        self.repos
            .cows
            .insert(&NewCow {
                tag: tag.to_string(),
                breed: "Sahiwal".to_string(),
                dob: None,
                farm_id,
                owner_id,
            })
            .await
            .expect("Failed to insert cow")
            .id
    }

    /// Issue a bearer token for a user
    pub fn token(&self, user: &User) -> String {
        self.encoder.issue(user).expect("Failed to issue token").0
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Ids of the entities in a list response, in response order
    pub fn ids(&self) -> Vec<i64> {
        self.body["data"]
            .as_array()
            .expect("Expected a list response")
            .iter()
            .map(|item| item["id"].as_i64().expect("Entity without id"))
            .collect()
    }
}

/// Two agents with one farm each and farmers with cows on both farms.
pub struct World {
    pub app: TestApp,
    pub admin: User,
    pub agent: User,
    pub other_agent: User,
    pub farmer: User,
    pub neighbour: User,
    pub other_farmer: User,
    pub lone_farmer: User,
    pub farm: FarmId,
    pub other_farm: FarmId,
    pub profile: FarmerProfileId,
    pub neighbour_profile: FarmerProfileId,
    pub other_profile: FarmerProfileId,
    pub cow: CowId,
    pub neighbour_cow: CowId,
    pub other_cow: CowId,
}

impl World {
    pub async fn build() -> Self {
        let app = TestApp::new();

        let admin = app.create_superadmin("superadmin").await;
        let agent = app.create_user("agent_rajshahi", Role::Agent).await;
        let other_agent = app.create_user("agent_sylhet", Role::Agent).await;
        let farmer = app.create_user("farmer_karim", Role::Farmer).await;
        let neighbour = app.create_user("farmer_rahim", Role::Farmer).await;
        let other_farmer = app.create_user("farmer_salma", Role::Farmer).await;
        let lone_farmer = app.create_user("farmer_lone", Role::Farmer).await;

        let farm = app.create_farm("Padma Dairy Farm", Some(&agent)).await;
        let other_farm = app.create_farm("Surma Dairy Farm", Some(&other_agent)).await;

        let profile = app.create_profile(&farmer, farm).await;
        let neighbour_profile = app.create_profile(&neighbour, farm).await;
        let other_profile = app.create_profile(&other_farmer, other_farm).await;

        let cow = app.create_cow("BD-RJ-001", farm, profile).await;
        let neighbour_cow = app.create_cow("BD-RJ-002", farm, neighbour_profile).await;
        let other_cow = app.create_cow("BD-SY-001", other_farm, other_profile).await;

        Self {
            app,
            admin,
            agent,
            other_agent,
            farmer,
            neighbour,
            other_farmer,
            lone_farmer,
            farm,
            other_farm,
            profile,
            neighbour_profile,
            other_profile,
            cow,
            neighbour_cow,
            other_cow,
        }
    }

    /// Bearer token for one of the world's users
    pub fn token(&self, user: &User) -> String {
        self.app.token(user)
    }
}
