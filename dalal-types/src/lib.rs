//! Shared error taxonomy, configuration primitives and capability labels used across
//! the dalal workspace.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;

pub use capability::Capability;
pub use config::{
    CacheConfig, DalalConfig, FetchStrategy, IndicatorConfig, WindowAdjust,
};
pub use connector::ConnectorKey;
pub use error::DalalError;
