//! Core Operation types for hero CRUD and search requests

use crate::api::constants::{self, HEROES_PATH};
use crate::api::models::{Hero, HeroId};
use crate::api::transport::{ApiRequest, Method};
use serde_json::Value;

/// A single request the hero client can issue against the API
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Fetch every hero
    List,
    /// Fetch one hero by id
    Get { id: HeroId },
    /// Create a hero; the server assigns the id
    Create { hero: Hero },
    /// Replace a persisted hero (id travels in the body)
    Update { hero: Hero },
    /// Delete a hero by id
    Delete { id: HeroId },
    /// Find heroes whose name contains the (trimmed) term
    Search { term: String },
}

impl Operation {
    /// Get the HTTP method for this operation
    pub fn http_method(&self) -> Method {
        match self {
            Self::List | Self::Get { .. } | Self::Search { .. } => Method::Get,
            Self::Create { .. } => Method::Post,
            Self::Update { .. } => Method::Put,
            Self::Delete { .. } => Method::Delete,
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::List | Self::Create { .. } | Self::Update { .. } => HEROES_PATH.to_string(),
            Self::Get { id } | Self::Delete { id } => constants::hero_endpoint(*id),
            Self::Search { term } => constants::search_endpoint(term),
        }
    }

    /// Name used in log lines and diagnostics
    pub fn label(&self) -> String {
        match self {
            Self::List => "getHeroes()".to_string(),
            Self::Get { id } => format!("getHero(id={})", id),
            Self::Create { .. } => "addHero()".to_string(),
            Self::Update { hero } => match hero.id {
                Some(id) => format!("updateHero(id={})", id),
                None => "updateHero()".to_string(),
            },
            Self::Delete { id } => format!("deleteHero(id={})", id),
            Self::Search { .. } => "searchHeroes".to_string(),
        }
    }

    fn body(&self) -> Option<Value> {
        match self {
            Self::Create { hero } | Self::Update { hero } => serde_json::to_value(hero).ok(),
            _ => None,
        }
    }

    /// Build the transport request for this operation
    ///
    /// Save operations (create, update, delete) carry the JSON content type.
    pub fn to_request(&self) -> ApiRequest {
        let request = ApiRequest::new(self.http_method(), self.path());
        match (self, self.body()) {
            (_, Some(body)) => request.json(body),
            (Self::Delete { .. }, None) => request.json_content(),
            _ => request,
        }
    }
}
