pub mod client;
pub mod error;
pub mod model;

pub use client::DirectoryApi;
pub use error::DirectoryError;
pub use model::{
    BrowseKind, Listing, ListingPatch, NewListing, NewUser, Role, RoommatePreferences, User,
    UserPatch,
};
