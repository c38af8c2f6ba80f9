//! Role Map - Membership purchase to user role mapping
//!
//! This crate grants users an access role when they buy a membership price
//! tier, strips competing membership roles, and reverts lapsed members to
//! the platform default role.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
