pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use std::sync::Arc;

use crate::infra::db::Db;
use crate::infra::directory::EntityDirectory;
use crate::infra::messaging::MessagingGateway;
use crate::infra::templates::TemplateRenderer;

/// Collaborator handles the process bootstrap wires once and hands to the
/// outer request layer.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub directory: Arc<dyn EntityDirectory>,
    pub templates: Arc<dyn TemplateRenderer>,
    pub messaging: Arc<dyn MessagingGateway>,
}
