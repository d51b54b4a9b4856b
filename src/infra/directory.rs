use anyhow::Result;
use async_trait::async_trait;

use crate::domain::contractor::{Client, Employee, Seller};

/// Lookup side of the surrounding CRM: sellers, clients, employees, and
/// the notification address book scoped to a reseller. Provided by the
/// host process; absence of a record is a normal answer, transport
/// failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    async fn seller_by_id(&self, id: i64) -> Result<Option<Seller>>;

    async fn client_by_id(&self, id: i64) -> Result<Option<Client>>;

    async fn employee_by_id(&self, id: i64) -> Result<Option<Employee>>;

    /// Outgoing address configured for the reseller, if any.
    async fn reseller_email_from(&self, reseller_id: i64) -> Result<Option<String>>;

    /// Employee addresses permitted to receive notifications of the given
    /// kind for the reseller.
    async fn emails_by_permit(&self, reseller_id: i64, permit: &str) -> Result<Vec<String>>;
}
