//! Route definition
//!
//! Binds the fixed method and path to a resource reference.

use hyper::Method;

use crate::config::RouteConfig;
use crate::error::ConfigError;
use crate::resource::ResourceRef;

/// The single file route served by this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    target: ResourceRef,
}

impl Route {
    /// Only method the route answers
    pub const METHOD: Method = Method::GET;

    /// Only path the route answers
    pub const PATH: &'static str = "/hello";

    pub const fn new(target: ResourceRef) -> Self {
        Self { target }
    }

    pub fn from_config(config: &RouteConfig) -> Result<Self, ConfigError> {
        let target = config
            .target
            .parse()
            .map_err(|source| ConfigError::InvalidTarget {
                target: config.target.clone(),
                source,
            })?;
        Ok(Self::new(target))
    }

    pub const fn target(&self) -> &ResourceRef {
        &self.target
    }

    /// Exact path match, query strings are not part of `path`
    pub fn matches(path: &str) -> bool {
        path == Self::PATH
    }
}
