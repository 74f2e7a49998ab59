// Module layout (Clean Architecture style)
// - bootstrap: configuration, shared state and logging setup
// - infrastructure: DB, token signing and logging adapters
// - presentation: HTTP handlers and routing
// - application: repository ports and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
