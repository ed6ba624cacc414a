//! Liveness/readiness reporting backed by a database round trip.

use std::time::Instant;

use common::utils::time::now_rfc3339;
use models::{operator, owner, recipe, restaurant};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use serde::Serialize;
use sysinfo::System;

/// Process-lifetime facts reported by every health endpoint.
#[derive(Debug, Clone)]
pub struct HealthContext {
    pub started_at: Instant,
    pub environment: String,
    pub version: String,
}

impl HealthContext {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            started_at: Instant::now(),
            environment: environment.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Seconds since the process started.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RecordCounts>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RecordCounts {
    pub restaurants: u64,
    pub owners: u64,
    pub recipes: u64,
    pub operators: u64,
}

/// Memory figures in MiB. `used` is the resident set of this process and
/// `total` the physical memory of the host.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    #[serde(rename = "virtual", skip_serializing_if = "Option::is_none")]
    pub virtual_mem: Option<u64>,
}

const MIB: u64 = 1024 * 1024;

fn memory_usage(with_virtual: bool) -> MemoryUsage {
    let mut sys = System::new();
    sys.refresh_memory();
    let process = sysinfo::get_current_pid().ok().and_then(|pid| {
        sys.refresh_process(pid);
        sys.process(pid).map(|p| (p.memory(), p.virtual_memory()))
    });
    let (rss, virt) = process.unwrap_or_default();
    MemoryUsage {
        used: rss / MIB,
        total: sys.total_memory() / MIB,
        virtual_mem: with_virtual.then_some(virt / MIB),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub platform: &'static str,
    pub arch: &'static str,
    pub pid: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub database: DatabaseHealth,
    pub memory: MemoryUsage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemInfo>,
    pub environment: String,
    pub version: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Readiness {
    pub ready: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Liveness {
    pub alive: bool,
    pub timestamp: String,
    pub uptime: f64,
}

async fn count_records(db: &DatabaseConnection) -> Result<RecordCounts, DbErr> {
    Ok(RecordCounts {
        restaurants: restaurant::Entity::find().count(db).await?,
        owners: owner::Entity::find().count(db).await?,
        recipes: recipe::Entity::find().count(db).await?,
        operators: operator::Entity::find().count(db).await?,
    })
}

async fn probe(db: &DatabaseConnection, with_stats: bool) -> DatabaseHealth {
    let started = Instant::now();
    let result = match db.ping().await {
        Ok(()) if with_stats => count_records(db).await.map(Some),
        Ok(()) => Ok(None),
        Err(e) => Err(e),
    };
    match result {
        Ok(stats) => DatabaseHealth {
            status: "connected",
            response_time: Some(format!("{}ms", started.elapsed().as_millis())),
            error: None,
            stats,
        },
        Err(e) => {
            tracing::warn!(error = %e, "database health probe failed");
            DatabaseHealth { status: "disconnected", response_time: None, error: Some(e.to_string()), stats: None }
        }
    }
}

fn report(ctx: &HealthContext, database: DatabaseHealth, system: Option<SystemInfo>) -> HealthReport {
    let memory = memory_usage(system.is_some());
    HealthReport {
        status: if database.status == "connected" { "healthy" } else { "unhealthy" },
        timestamp: now_rfc3339(),
        uptime: ctx.uptime(),
        database,
        memory,
        system,
        environment: ctx.environment.clone(),
        version: ctx.version.clone(),
    }
}

pub async fn health(db: &DatabaseConnection, ctx: &HealthContext) -> HealthReport {
    report(ctx, probe(db, false).await, None)
}

pub async fn detailed_health(db: &DatabaseConnection, ctx: &HealthContext) -> HealthReport {
    let system = SystemInfo {
        platform: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        pid: std::process::id(),
    };
    report(ctx, probe(db, true).await, Some(system))
}

pub async fn readiness(db: &DatabaseConnection, ctx: &HealthContext) -> Readiness {
    let current = health(db, ctx).await;
    Readiness { ready: current.is_healthy(), timestamp: current.timestamp }
}

pub fn liveness(ctx: &HealthContext) -> Liveness {
    Liveness { alive: true, timestamp: now_rfc3339(), uptime: ctx.uptime() }
}
