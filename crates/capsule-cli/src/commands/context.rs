//! Global options and the service they open

use std::path::PathBuf;

use capsule_core::capsule_core_types::Origin;
use capsule_core::gateway::CapsuleRepository;
use capsule_core::logging_facility;
use capsule_core::{CapsuleConfig, CapsuleService};
use capsule_store::SqliteStore;
use clap::Args;

pub type Service = CapsuleService<CapsuleRepository<SqliteStore>>;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "CAPSULE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path; overrides [store].path
    #[arg(long, global = true, env = "CAPSULE_DB")]
    pub db: Option<PathBuf>,

    /// Channel recorded on mutations
    #[arg(long, global = true, default_value = "CLI")]
    pub channel: String,

    /// Acting tenant id
    #[arg(long, global = true, default_value = "")]
    pub tenant: String,

    /// Acting user id
    #[arg(long, global = true, env = "CAPSULE_USER", default_value = "cli")]
    pub user: String,
}

/// Everything a subcommand needs
pub struct Context {
    pub service: Service,
    pub origin: Origin,
}

impl Context {
    /// Load configuration, start logging and open the migrated store
    pub fn open(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match &global.config {
            Some(path) => CapsuleConfig::load(path)?,
            None => CapsuleConfig::default(),
        };
        logging_facility::init(config.logging.profile);

        let db_path = global
            .db
            .clone()
            .unwrap_or_else(|| config.store.path.clone());
        let store = SqliteStore::open(&db_path, config.table_schema())?;
        tracing::debug!(db = %db_path.display(), table = %config.table.name, "store opened");

        Ok(Self {
            service: CapsuleService::with_catalogs(CapsuleRepository::new(store), config.catalogs),
            origin: Origin::new(&global.channel, &global.tenant, &global.user),
        })
    }
}
