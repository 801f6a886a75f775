// Domain-driven module structure for the log adapter.

// Core
pub mod route;
pub mod logline;

// Infrastructure
pub mod conf;
pub mod publish;
pub mod runtime;
