// handlers/sys/mod.rs - System administration handlers
//
// Registration and teardown of the system admin tenant, plus liveness.
// Routes: /sys/admin (POST, DELETE), /sys/health (GET)

pub mod admin;  // POST + DELETE /sys/admin
pub mod health; // GET /sys/health

pub use admin::{sys_admin_create, sys_admin_destroy};
pub use health::sys_health;
