#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod error;
pub mod factory;
pub mod filter;
pub mod naming;
pub mod paths;
pub mod registry;
pub mod resolver;
pub mod worker;

pub use asset::{Asset, AssetCollection, AssetSummary};
pub use config::{ConfigError, FactoryConfig};
pub use error::{FactoryError, FactoryResult};
pub use factory::{AssetFactory, AssetOptions, Descriptors};
pub use filter::{Filter, FilterChain, FilterHandle};
pub use registry::{AssetManager, FilterLookup, FilterManager, ReferenceLookup};
pub use worker::{EnsureFilterWorker, Worker};
