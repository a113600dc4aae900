pub mod provisioning;

pub use provisioning::{ProvisionError, ProvisioningService, TeardownPolicy};
