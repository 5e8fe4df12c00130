//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the terminal front end drives the use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the main menu (Timeline / Image Editor) until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
