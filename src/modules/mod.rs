pub mod books;
pub mod reviews;
pub mod suggestions;
pub mod users;

use lyrical_kernel::ModuleRegistry;

use crate::services::Services;

/// Register every module with the registry
pub fn register_all(registry: &mut ModuleRegistry, services: &Services) -> anyhow::Result<()> {
    registry.register(books::create_module(services.catalog.clone()))?;
    registry.register(reviews::create_module(reviews::ReviewsState {
        ledger: services.ledger.clone(),
        sessions: services.sessions.clone(),
    }))?;
    registry.register(suggestions::create_module(services.suggestions.clone()))?;
    registry.register(users::create_module(users::UsersState {
        sessions: services.sessions.clone(),
        users: services.store.clone(),
    }))?;
    Ok(())
}
