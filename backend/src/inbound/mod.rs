//! Inbound adapters for driving ports.

pub mod http;
