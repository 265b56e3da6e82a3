//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod targets;

pub(crate) use convert::ConvertArgs;
pub(crate) use targets::TargetsArgs;
