//! Platform adapters - implementations of the host platform ports.
//!
//! - `InMemoryPlatform` - Development/testing host with every port in one struct

mod in_memory_platform;

pub use in_memory_platform::{
    InMemoryPlatform, InMemoryPlatformBuilder, MembershipTerm, PaymentRecord, ProductRecord,
    RoleMutationCall,
};
