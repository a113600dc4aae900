// handlers/mod.rs - HTTP handlers
//
// Only the /sys/* surface exists: system admin registration, teardown and
// liveness. Handlers stay thin; the workflow lives in services::provisioning.

pub mod sys; // /sys/admin, /sys/health
