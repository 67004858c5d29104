//! Commendation registry core: eligibility and continuity evaluation for
//! personnel medals and unit citations, plus role-scoped audit-log
//! visibility. Storage and transport stay behind injected traits so the
//! evaluators run the same against a database or an in-memory fixture.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
