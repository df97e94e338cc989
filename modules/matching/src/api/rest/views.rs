//! Read-side projection: resolves the identifiers the engine deals in into
//! display form. Lives at the boundary on purpose; the domain never touches
//! names, emails or listing titles.

use std::sync::Arc;

use directory::contract::client::DirectoryApi;
use directory::contract::model::User;

use crate::api::rest::dto::{MatchListingDto, MatchUserDto, MatchViewDto, MessageDto};
use crate::contract::model::{LikeTarget, Match, Message};

pub struct MatchPresenter {
    directory: Arc<dyn DirectoryApi>,
}

impl MatchPresenter {
    pub fn new(directory: Arc<dyn DirectoryApi>) -> Self {
        Self { directory }
    }

    pub async fn present_match(&self, m: &Match) -> MatchViewDto {
        let mut users = Vec::with_capacity(2);
        for id in m.pair.users() {
            if let Ok(user) = self.directory.get_user(id).await {
                users.push(summary(&user));
            }
        }

        MatchViewDto {
            id: m.id,
            users,
            listing: self.present_listing(m.listing).await,
            matched_at: m.matched_at,
            last_message_at: m.last_message_at,
        }
    }

    pub async fn present_message(&self, message: &Message) -> MessageDto {
        let sender = self
            .directory
            .get_user(message.sender_id)
            .await
            .ok()
            .map(|u| summary(&u));
        MessageDto {
            id: message.id,
            match_id: message.match_id,
            sender_id: message.sender_id,
            sender,
            content: message.content.clone(),
            created_at: message.created_at,
            read: message.read,
        }
    }

    async fn present_listing(&self, target: LikeTarget) -> MatchListingDto {
        match target {
            LikeTarget::Listing(id) => match self.directory.get_listing(id).await {
                Ok(listing) => MatchListingDto {
                    id: listing.id.to_string(),
                    title: listing.title,
                    neighborhood: listing.neighborhood,
                    price: listing.price,
                    synthetic: false,
                },
                Err(_) => MatchListingDto {
                    id: target.to_string(),
                    title: "Listing no longer available".to_string(),
                    neighborhood: String::new(),
                    price: 0,
                    synthetic: false,
                },
            },
            LikeTarget::Buyer(buyer_id) => {
                // Synthesize a listing-shaped card from the buyer's profile.
                let buyer = self.directory.get_user(buyer_id).await.ok();
                let (title, neighborhood, price) = match &buyer {
                    Some(b) => (
                        format!("{} is looking for a place", b.display_name),
                        b.preferences
                            .preferred_neighborhoods
                            .first()
                            .cloned()
                            .unwrap_or_else(|| "Any".to_string()),
                        b.preferences.price_max,
                    ),
                    None => ("Buyer profile unavailable".to_string(), "Any".to_string(), 0),
                };
                MatchListingDto {
                    id: target.to_string(),
                    title,
                    neighborhood,
                    price,
                    synthetic: true,
                }
            }
        }
    }
}

fn summary(user: &User) -> MatchUserDto {
    MatchUserDto {
        id: user.id,
        name: user.display_name.clone(),
        email: user.email.clone(),
        profile_image: user.profile_image.clone(),
    }
}
