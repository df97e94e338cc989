mod common;

use chrono::Utc;
use common::{date, env};
use directory::contract::model::{
    BrowseKind, ListingPatch, NewListing, NewUser, Role, UserPatch,
};
use directory::domain::error::DomainError;
use directory::domain::ports::LikedListing;
use uuid::Uuid;

fn new_user(email: &str, name: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: "hunter22".to_string(),
        display_name: name.to_string(),
        role,
    }
}

fn new_listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        neighborhood: "U-District".to_string(),
        price: 900,
        start_date: date(2025, 9, 1),
        end_date: date(2026, 6, 30),
        images: vec![],
        vibes: vec!["quiet".to_string()],
        prompt_question: "Ideal weekend?".to_string(),
        prompt_answer: "Hiking".to_string(),
    }
}

#[tokio::test]
async fn register_then_authenticate() {
    let env = env();

    let user = env
        .service
        .register(new_user("Alice@Example.com", "Alice", Role::Both))
        .await
        .unwrap();
    // emails are stored lowercased
    assert_eq!(user.email, "alice@example.com");

    let logged_in = env
        .service
        .authenticate("alice@example.com", "hunter22")
        .await
        .unwrap();
    assert_eq!(logged_in.id, user.id);

    let err = env
        .service
        .authenticate("alice@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    // unknown email reads the same as a bad password
    let err = env
        .service
        .authenticate("nobody@example.com", "hunter22")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let env = env();
    env.service
        .register(new_user("a@example.com", "Alice", Role::Both))
        .await
        .unwrap();

    let err = env
        .service
        .register(new_user("A@example.com", "Imposter", Role::Buyer))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyExists { .. }));
}

#[tokio::test]
async fn registration_validation() {
    let env = env();

    let err = env
        .service
        .register(new_user("not-an-email", "Alice", Role::Both))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidEmail { .. }));

    let mut short = new_user("a@example.com", "Alice", Role::Both);
    short.password = "abc".to_string();
    let err = env.service.register(short).await.unwrap_err();
    assert!(matches!(err, DomainError::PasswordTooShort { .. }));

    let err = env
        .service
        .register(new_user("a@example.com", "   ", Role::Both))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyDisplayName));
}

#[tokio::test]
async fn listing_mutation_requires_ownership() {
    let env = env();
    let alice = env
        .service
        .register(new_user("a@example.com", "Alice", Role::Seller))
        .await
        .unwrap();
    let bob = env
        .service
        .register(new_user("b@example.com", "Bob", Role::Seller))
        .await
        .unwrap();

    let listing = env
        .service
        .create_listing(alice.id, new_listing("Sunny room"))
        .await
        .unwrap();

    let patch = ListingPatch {
        price: Some(1100),
        ..ListingPatch::default()
    };
    let err = env
        .service
        .update_listing(bob.id, listing.id, patch.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotOwner { .. }));

    let updated = env
        .service
        .update_listing(alice.id, listing.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.price, 1100);

    let err = env
        .service
        .delete_listing(bob.id, listing.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotOwner { .. }));

    env.service.delete_listing(alice.id, listing.id).await.unwrap();
    let err = env.service.get_listing(listing.id).await.unwrap_err();
    assert!(matches!(err, DomainError::ListingNotFound { .. }));
}

#[tokio::test]
async fn browse_excludes_own_liked_and_filters_by_role() {
    let env = env();
    let viewer = env
        .service
        .register(new_user("v@example.com", "Viewer", Role::Both))
        .await
        .unwrap();
    let seller = env
        .service
        .register(new_user("s@example.com", "Seller", Role::Seller))
        .await
        .unwrap();
    let buyer = env
        .service
        .register(new_user("b@example.com", "Buyer", Role::Buyer))
        .await
        .unwrap();

    let own = env
        .service
        .create_listing(viewer.id, new_listing("Mine"))
        .await
        .unwrap();
    let from_seller = env
        .service
        .create_listing(seller.id, new_listing("Seller room"))
        .await
        .unwrap();
    let from_buyer = env
        .service
        .create_listing(buyer.id, new_listing("Buyer room"))
        .await
        .unwrap();
    let liked = env
        .service
        .create_listing(seller.id, new_listing("Already liked"))
        .await
        .unwrap();
    env.interest
        .add(
            viewer.id,
            LikedListing {
                listing_id: liked.id,
                liked_at: Utc::now(),
            },
        )
        .await;

    let all = env.service.browse(viewer.id, None).await.unwrap();
    let ids: Vec<Uuid> = all.iter().map(|l| l.id).collect();
    assert!(!ids.contains(&own.id), "own listing must be excluded");
    assert!(!ids.contains(&liked.id), "liked listing must be excluded");
    assert!(ids.contains(&from_seller.id));
    assert!(ids.contains(&from_buyer.id));

    let sellers = env
        .service
        .browse(viewer.id, Some(BrowseKind::Sellers))
        .await
        .unwrap();
    assert!(sellers.iter().all(|l| l.owner_id == seller.id));

    let buyers = env
        .service
        .browse(viewer.id, Some(BrowseKind::Buyers))
        .await
        .unwrap();
    assert_eq!(buyers.len(), 1);
    assert_eq!(buyers[0].id, from_buyer.id);
}

#[tokio::test]
async fn deactivated_listings_never_browse() {
    let env = env();
    let viewer = env
        .service
        .register(new_user("v@example.com", "Viewer", Role::Buyer))
        .await
        .unwrap();
    let seller = env
        .service
        .register(new_user("s@example.com", "Seller", Role::Seller))
        .await
        .unwrap();

    let listing = env
        .service
        .create_listing(seller.id, new_listing("Soon gone"))
        .await
        .unwrap();
    env.service
        .update_listing(
            seller.id,
            listing.id,
            ListingPatch {
                is_active: Some(false),
                ..ListingPatch::default()
            },
        )
        .await
        .unwrap();

    let visible = env.service.browse(viewer.id, None).await.unwrap();
    assert!(visible.is_empty());
}

#[tokio::test]
async fn saved_listings_order_and_filter() {
    let env = env();
    let viewer = env
        .service
        .register(new_user("v@example.com", "Viewer", Role::Buyer))
        .await
        .unwrap();
    let seller = env
        .service
        .register(new_user("s@example.com", "Seller", Role::Seller))
        .await
        .unwrap();

    let older = env
        .service
        .create_listing(seller.id, new_listing("Older like"))
        .await
        .unwrap();
    let newer = env
        .service
        .create_listing(seller.id, new_listing("Newer like"))
        .await
        .unwrap();
    let inactive = env
        .service
        .create_listing(seller.id, new_listing("Inactive"))
        .await
        .unwrap();
    env.service
        .update_listing(
            seller.id,
            inactive.id,
            ListingPatch {
                is_active: Some(false),
                ..ListingPatch::default()
            },
        )
        .await
        .unwrap();

    let t0 = Utc::now();
    env.interest
        .add(
            viewer.id,
            LikedListing {
                listing_id: older.id,
                liked_at: t0,
            },
        )
        .await;
    env.interest
        .add(
            viewer.id,
            LikedListing {
                listing_id: newer.id,
                liked_at: t0 + chrono::Duration::seconds(5),
            },
        )
        .await;
    env.interest
        .add(
            viewer.id,
            LikedListing {
                listing_id: inactive.id,
                liked_at: t0 + chrono::Duration::seconds(10),
            },
        )
        .await;

    let saved = env.service.saved_listings(viewer.id).await.unwrap();
    let ids: Vec<Uuid> = saved.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![newer.id, older.id], "most recent like first, inactive dropped");
}

#[tokio::test]
async fn buyers_tab_lists_pure_buyers_only() {
    let env = env();
    let viewer = env
        .service
        .register(new_user("v@example.com", "Viewer", Role::Both))
        .await
        .unwrap();
    let buyer = env
        .service
        .register(new_user("b@example.com", "Buyer", Role::Buyer))
        .await
        .unwrap();
    env.service
        .register(new_user("s@example.com", "Seller", Role::Seller))
        .await
        .unwrap();

    let buyers = env.service.browse_buyers(viewer.id).await.unwrap();
    assert_eq!(buyers.len(), 1);
    assert_eq!(buyers[0].id, buyer.id);
}

#[tokio::test]
async fn profile_patch_applies_selected_fields() {
    let env = env();
    let user = env
        .service
        .register(new_user("a@example.com", "Alice", Role::Buyer))
        .await
        .unwrap();

    let mut preferences = user.preferences.clone();
    preferences.price_max = 1200;
    preferences.preferred_neighborhoods = vec!["Northgate".to_string()];

    let updated = env
        .service
        .update_user(
            user.id,
            UserPatch {
                role: Some(Role::Both),
                preferences: Some(preferences),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, Role::Both);
    assert_eq!(updated.preferences.price_max, 1200);
    assert_eq!(updated.display_name, "Alice");
    assert!(updated.updated_at >= user.updated_at);
}
