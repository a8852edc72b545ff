//! Raindrop REST resources.

pub mod collections;
pub mod raindrops;

pub use collections::{CollectionsApi, CreateCollectionRequest, ViewMode};
pub use raindrops::{
    CollectionRef, CreateRaindropRequest, DeleteResponse, ItemResponse, ListQuery, ListResponse,
    PleaseParse, RaindropsApi, UpdateRaindropRequest, MAX_PER_PAGE,
};
