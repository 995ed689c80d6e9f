//! Shared fixture types and factories for the integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use data_factory::prelude::*;
use serde::{Deserialize, Serialize};

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Vehicles

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
}

define_factory! {
    pub struct VehicleFactory;
}

impl Factory for VehicleFactory {
    type Output = Vehicle;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "make" => fake.company(),
            "model" => fake.word(),
        }
    }
}

impl VehicleFactory {
    pub fn mercedes(&mut self) -> &mut Self {
        self.state_using(|_| state! { "make" => "Mercedes" })
    }

    pub fn with_model(&mut self, model: &str) -> &mut Self {
        self.state(state! { "model" => model })
    }
}

impl HasFactory for Vehicle {
    type Factory = VehicleFactory;
}

data_object!(Vehicle);

define_factory! {
    /// Vehicles as plain records
    pub struct VehicleRecordFactory;
}

impl Factory for VehicleRecordFactory {
    type Output = Attributes;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "make" => fake.company(),
            "model" => fake.word(),
        }
    }
}

impl VehicleRecordFactory {
    pub fn mercedes(&mut self) -> &mut Self {
        self.state_using(|_| state! { "make" => "Mercedes" })
    }
}

// Customers, addresses and orders

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

define_factory! {
    pub struct AddressFactory;
}

impl Factory for AddressFactory {
    type Output = Address;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "street" => fake.street_address(),
            "city" => fake.city(),
            "zip_code" => fake.postcode(),
        }
    }
}

impl AddressFactory {
    pub fn london(&mut self) -> &mut Self {
        self.state_using(|_| state! { "city" => "London" })
    }
}

impl HasFactory for Address {
    type Factory = AddressFactory;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: String,
}

define_factory! {
    pub struct OrderFactory;
}

impl Factory for OrderFactory {
    type Output = Order;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "id" => fake.uuid(),
            "status" => json!(fake.random_element(&OrderStatus::ALL)),
            "total" => fake.random_float(2, 10.0, 1000.0),
            "created_at" => fake.date_time().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl OrderFactory {
    fn with_status(&mut self, status: OrderStatus) -> &mut Self {
        self.state(state! { "status" => json!(status) })
    }

    pub fn pending(&mut self) -> &mut Self {
        self.with_status(OrderStatus::Pending)
    }

    pub fn processing(&mut self) -> &mut Self {
        self.with_status(OrderStatus::Processing)
    }

    pub fn shipped(&mut self) -> &mut Self {
        self.with_status(OrderStatus::Shipped)
    }

    pub fn delivered(&mut self) -> &mut Self {
        self.with_status(OrderStatus::Delivered)
    }

    pub fn cancelled(&mut self) -> &mut Self {
        self.with_status(OrderStatus::Cancelled)
    }
}

impl HasFactory for Order {
    type Factory = OrderFactory;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub address: Address,
    #[serde(default)]
    pub orders: Vec<Order>,
}

define_factory! {
    pub struct CustomerFactory;
}

impl Factory for CustomerFactory {
    type Output = Customer;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "name" => fake.name(),
            "email" => fake.email(),
            "address" => StateValue::nested(Address::factory()),
            "orders" => StateValue::deferred(|| Order::factory().count(3).make()),
        }
    }
}

impl CustomerFactory {
    pub fn with_london_address(&mut self) -> &mut Self {
        self.state_using(|_| {
            state! { "address" => StateValue::nested(Address::factory().london().clone()) }
        })
    }
}

impl HasFactory for Customer {
    type Factory = CustomerFactory;
}

data_object!(Address, Order, Customer);

// Cloud platform: organizations, repositories, environments, deployments, applications

pub const REGIONS: [&str; 4] = ["us-east-1", "us-east-2", "us-west-2", "eu-west-1"];

const FAILURE_REASONS: [&str; 4] = [
    "Build failed: npm install exited with code 1",
    "Deployment timeout: exceeded 15 minute limit",
    "Health check failed: application not responding",
    "Database migration failed",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

define_factory! {
    pub struct OrganizationFactory;
}

impl Factory for OrganizationFactory {
    type Output = Organization;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "id" => fake.uuid(),
            "name" => fake.company(),
        }
    }
}

impl HasFactory for Organization {
    type Factory = OrganizationFactory;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub default_branch: String,
}

define_factory! {
    pub struct RepositoryFactory;
}

impl Factory for RepositoryFactory {
    type Output = Repository;

    fn definition(&self, fake: &Faker) -> State {
        let owner = fake.user_name();
        let name = fake.slug();

        state! {
            "id" => fake.uuid(),
            "full_name" => format!("{}/{}", owner, name),
            "name" => name,
            "default_branch" => "main",
        }
    }
}

impl RepositoryFactory {
    pub fn legacy(&mut self) -> &mut Self {
        self.state(state! { "default_branch" => "master" })
    }
}

impl HasFactory for Repository {
    type Factory = RepositoryFactory;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "deployment.running")]
    Running,
    #[serde(rename = "deployment.succeeded")]
    Succeeded,
    #[serde(rename = "deployment.failed")]
    Failed,
}

impl DeploymentStatus {
    pub const ALL: [DeploymentStatus; 4] = [
        DeploymentStatus::Pending,
        DeploymentStatus::Running,
        DeploymentStatus::Succeeded,
        DeploymentStatus::Failed,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub status: DeploymentStatus,
    pub branch_name: String,
    pub commit_hash: String,
    pub commit_message: String,
    pub failure_reason: Option<String>,
    pub runtime_version: String,
    pub uses_workers: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

define_factory! {
    pub struct DeploymentFactory;
}

impl Factory for DeploymentFactory {
    type Output = Deployment;

    fn definition(&self, fake: &Faker) -> State {
        state! {
            "id" => fake.uuid(),
            "status" => json!(fake.random_element(&DeploymentStatus::ALL)),
            "branch_name" => "main",
            "commit_hash" => fake.sha1(),
            "commit_message" => fake.sentence(),
            "failure_reason" => JsonValue::Null,
            "runtime_version" => "8.4",
            "uses_workers" => false,
            "started_at" => JsonValue::Null,
            "finished_at" => JsonValue::Null,
        }
    }
}

impl DeploymentFactory {
    /// Start and finish timestamps for a completed deployment
    fn completed_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        let started_at = self
            .fake()
            .date_time_between(now - Duration::hours(1), now - Duration::minutes(30));
        let finished_at = self.fake().date_time_between(started_at, now);
        (started_at, finished_at)
    }

    pub fn running(&mut self) -> &mut Self {
        let now = Utc::now();
        let started_at = self
            .fake()
            .date_time_between(now - Duration::minutes(10), now);

        self.state(state! {
            "status" => json!(DeploymentStatus::Running),
            "started_at" => started_at,
        })
    }

    pub fn succeeded(&mut self) -> &mut Self {
        let (started_at, finished_at) = self.completed_window();

        self.state(state! {
            "status" => json!(DeploymentStatus::Succeeded),
            "started_at" => started_at,
            "finished_at" => finished_at,
        })
    }

    pub fn failed(&mut self) -> &mut Self {
        let (started_at, finished_at) = self.completed_window();
        let reason = self.fake().random_element(&FAILURE_REASONS).copied();

        self.state(state! {
            "status" => json!(DeploymentStatus::Failed),
            "failure_reason" => reason,
            "started_at" => started_at,
            "finished_at" => finished_at,
        })
    }

    pub fn pending(&mut self) -> &mut Self {
        self.state(state! { "status" => json!(DeploymentStatus::Pending) })
    }

    pub fn with_workers(&mut self) -> &mut Self {
        self.state(state! { "uses_workers" => true })
    }
}

impl HasFactory for Deployment {
    type Factory = DeploymentFactory;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub vanity_domain: String,
    pub runtime_version: String,
    pub node_version: u32,
    pub uses_workers: bool,
    pub uses_hibernation: bool,
    pub current_deployment: Option<Deployment>,
    pub created_at: DateTime<Utc>,
}

define_factory! {
    pub struct EnvironmentFactory;
}

impl Factory for EnvironmentFactory {
    type Output = Environment;

    fn definition(&self, fake: &Faker) -> State {
        let now = Utc::now();

        state! {
            "id" => fake.uuid(),
            "name" => fake.word(),
            "slug" => fake.slug(),
            "status" => "stopped",
            "vanity_domain" => format!("{}.example.app", fake.slug()),
            "runtime_version" => "8.3",
            "node_version" => 20,
            "uses_workers" => false,
            "uses_hibernation" => false,
            "current_deployment" => JsonValue::Null,
            "created_at" => fake.date_time_between(now - Duration::days(180), now),
        }
    }
}

fn succeeded_deployment() -> StateValue {
    StateValue::deferred(|| Deployment::factory().succeeded().make())
}

impl EnvironmentFactory {
    pub fn production(&mut self) -> &mut Self {
        self.state(state! {
            "name" => "production",
            "slug" => "production",
            "status" => "running",
            "runtime_version" => "8.4",
            "node_version" => 22,
            "uses_workers" => true,
            "current_deployment" => succeeded_deployment(),
        })
    }

    pub fn staging(&mut self) -> &mut Self {
        self.state(state! {
            "name" => "staging",
            "slug" => "staging",
            "status" => "running",
            "runtime_version" => "8.4",
            "current_deployment" => succeeded_deployment(),
        })
    }

    pub fn preview(&mut self) -> &mut Self {
        let name = format!("{}-preview", self.fake().word());
        let slug = format!("{}-preview", self.fake().slug());

        self.state(state! {
            "name" => name,
            "slug" => slug,
            "status" => "hibernating",
            "uses_hibernation" => true,
        })
    }

    pub fn with_deployment(&mut self, status: DeploymentStatus) -> &mut Self {
        self.state(state! {
            "status" => "running",
            "current_deployment" => StateValue::deferred(move || {
                let mut deployments = Deployment::factory();
                match status {
                    DeploymentStatus::Running => deployments.running(),
                    DeploymentStatus::Succeeded => deployments.succeeded(),
                    DeploymentStatus::Failed => deployments.failed(),
                    DeploymentStatus::Pending => deployments.pending(),
                };
                deployments.make()
            }),
        })
    }
}

impl HasFactory for Environment {
    type Factory = EnvironmentFactory;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub region: String,
    pub repository: Repository,
    pub organization: Organization,
    pub default_environment: Option<Environment>,
    pub environments: Vec<Environment>,
    pub deployments: Vec<Deployment>,
    pub created_at: DateTime<Utc>,
}

define_factory! {
    pub struct ApplicationFactory;
}

impl Factory for ApplicationFactory {
    type Output = Application;

    fn definition(&self, fake: &Faker) -> State {
        let now = Utc::now();

        state! {
            "id" => fake.uuid(),
            "name" => format!("{} App", fake.company()),
            "slug" => fake.slug(),
            "region" => fake.random_element(&REGIONS).copied(),
            "repository" => StateValue::nested(Repository::factory()),
            "organization" => StateValue::nested(Organization::factory()),
            "default_environment" => JsonValue::Null,
            "environments" => json!([]),
            "deployments" => json!([]),
            "created_at" => fake.date_time_between(now - Duration::days(365), now - Duration::days(30)),
        }
    }
}

impl ApplicationFactory {
    pub fn with_environments(&mut self) -> &mut Self {
        self.state(state! {
            "default_environment" => StateValue::deferred(|| Environment::factory().production().make()),
            "environments" => StateValue::deferred(|| {
                let production = Environment::factory().production().make()?.into_one()?;
                let staging = Environment::factory().staging().make()?.into_one()?;
                let preview = Environment::factory().preview().make()?.into_one()?;
                Ok(vec![production, staging, preview])
            }),
        })
    }

    pub fn with_deployments(&mut self, count: usize) -> &mut Self {
        self.state(state! {
            "deployments" => StateValue::deferred(move || {
                Deployment::factory()
                    .count(count)
                    .sequence([
                        json!({ "status": DeploymentStatus::Succeeded }),
                        json!({ "status": DeploymentStatus::Succeeded }),
                        json!({ "status": DeploymentStatus::Succeeded }),
                        json!({ "status": DeploymentStatus::Failed }),
                    ])
                    .make()
            }),
        })
    }

    pub fn complete(&mut self) -> &mut Self {
        self.with_environments().with_deployments(10)
    }
}

impl HasFactory for Application {
    type Factory = ApplicationFactory;
}

data_object!(Organization, Repository, Deployment, Environment, Application);
