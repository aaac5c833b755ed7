//! Shared server state
//!
//! One [`ServerState`] is built at startup and handed to every handler
//! through axum's state extension. Cloning is shallow; every component
//! shares the same underlying handles.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::alerts::AlertDeduplicator;
use crate::auth::JwtService;
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::db::DbService;
use crate::db::repository::{
    CategoryRepository, ItemRepository, OrderRepository, ProductRepository, SaleRepository,
    UserRepository,
};
use crate::ledger::InventoryLedger;
use crate::notify::NotificationHub;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    jwt: Arc<JwtService>,
    hub: NotificationHub,
    alerts: AlertDeduplicator,
}

impl ServerState {
    /// Build the full state: open the database, wire the notification
    /// hub and the deduplicator in front of it.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.database_path()).await?;
        let jwt = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_minutes,
        ));
        let hub = NotificationHub::new();
        let alerts = AlertDeduplicator::new(hub.clone(), config.alert_window);

        Ok(Self {
            config: config.clone(),
            db: db.db,
            jwt,
            hub,
            alerts,
        })
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    pub fn alerts(&self) -> &AlertDeduplicator {
        &self.alerts
    }

    pub fn ledger(&self) -> InventoryLedger {
        InventoryLedger::new(self.db.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.db.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.db.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }

    /// Register the long-running tasks on the given manager.
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let products = self.products();
        let dedup = self.alerts.clone();
        let interval = self.config.low_stock_scan_interval;
        let token = tasks.shutdown_token();

        tasks.spawn("low_stock_scan", TaskKind::Periodic, async move {
            crate::alerts::run_low_stock_scan(products, dedup, interval, token).await;
        });
    }
}
