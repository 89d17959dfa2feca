//! Fixed seed data loaded at startup.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use crate::model::{
    Category, Conversation, Message, MessageKind, Notification, NotificationKind, Offer, Rating,
    Story, Viewer,
};

/// Image used when a business posts an offer without one.
pub const DEFAULT_OFFER_IMAGE: &str =
    "https://images.pexels.com/photos/788946/pexels-photo-788946.jpeg?auto=compress&cs=tinysrgb&w=800";

const TECH_STORE_AVATAR: &str =
    "https://images.pexels.com/photos/3184360/pexels-photo-3184360.jpeg?auto=compress&cs=tinysrgb&w=100";
const FASHION_HUB_AVATAR: &str =
    "https://images.pexels.com/photos/1884584/pexels-photo-1884584.jpeg?auto=compress&cs=tinysrgb&w=100";
const HOME_LIVING_AVATAR: &str =
    "https://images.pexels.com/photos/1599791/pexels-photo-1599791.jpeg?auto=compress&cs=tinysrgb&w=100";
const SPORTS_CENTRAL_AVATAR: &str =
    "https://images.pexels.com/photos/1552252/pexels-photo-1552252.jpeg?auto=compress&cs=tinysrgb&w=100";

fn pexels(photo: u32, width: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w={width}"
    )
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .earliest()
        .unwrap_or_default()
}

fn rating(
    id: &str,
    user_id: &str,
    user_name: &str,
    photo: u32,
    value: u8,
    review: Option<&str>,
    created_at: DateTime<Utc>,
) -> Rating {
    Rating {
        id: id.to_string(),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        user_avatar: pexels(photo, 100),
        rating: value,
        review: review.map(str::to_string),
        created_at,
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// The four launch offers, newest first.
pub fn offers() -> Vec<Offer> {
    vec![
        Offer {
            id: "1".to_string(),
            business_id: "tech-store".to_string(),
            business_name: "TechStore Inc.".to_string(),
            business_avatar: TECH_STORE_AVATAR.to_string(),
            product_name: "iPhone 15 Pro Max".to_string(),
            description: "Latest iPhone with advanced camera system and titanium design. \
                          Perfect for professionals and tech enthusiasts."
                .to_string(),
            image: pexels(788946, 800),
            original_price: 1199.0,
            discount_price: 999.0,
            discount_percentage: 17,
            category: Category::Electronics,
            tags: tags(&["smartphone", "apple", "premium"]),
            ratings: vec![
                rating(
                    "1",
                    "user1",
                    "John Doe",
                    1367269,
                    5,
                    Some("Amazing deal! Great product quality."),
                    day(2024, 1, 15),
                ),
                rating("2", "user2", "Jane Smith", 1858175, 4, None, day(2024, 1, 14)),
            ],
            average_rating: 4.5,
            comments: vec![],
            saves: 89,
            created_at: day(2024, 1, 15),
            expires_at: None,
            user_rating: None,
            is_saved: false,
        },
        Offer {
            id: "2".to_string(),
            business_id: "fashion-hub".to_string(),
            business_name: "Fashion Hub".to_string(),
            business_avatar: FASHION_HUB_AVATAR.to_string(),
            product_name: "Designer Leather Jacket".to_string(),
            description: "Premium genuine leather jacket with modern cut. \
                          Perfect for fall and winter seasons."
                .to_string(),
            image: pexels(1040945, 800),
            original_price: 299.0,
            discount_price: 199.0,
            discount_percentage: 33,
            category: Category::Fashion,
            tags: tags(&["jacket", "leather", "winter"]),
            ratings: vec![rating(
                "3",
                "user3",
                "Mike Johnson",
                1222271,
                4,
                Some("Good quality leather, fits perfectly."),
                day(2024, 1, 14),
            )],
            average_rating: 4.0,
            comments: vec![],
            saves: 67,
            created_at: day(2024, 1, 14),
            expires_at: None,
            user_rating: None,
            is_saved: false,
        },
        Offer {
            id: "3".to_string(),
            business_id: "home-decor".to_string(),
            business_name: "Home & Living".to_string(),
            business_avatar: HOME_LIVING_AVATAR.to_string(),
            product_name: "Modern Coffee Table Set".to_string(),
            description: "Elegant glass-top coffee table with matching side tables. \
                          Perfect for modern living rooms."
                .to_string(),
            image: pexels(1571460, 800),
            original_price: 599.0,
            discount_price: 399.0,
            discount_percentage: 33,
            category: Category::HomeAndGarden,
            tags: tags(&["furniture", "coffee table", "modern"]),
            ratings: vec![],
            average_rating: 0.0,
            comments: vec![],
            saves: 45,
            created_at: day(2024, 1, 13),
            expires_at: None,
            user_rating: None,
            is_saved: true,
        },
        Offer {
            id: "4".to_string(),
            business_id: "sports-gear".to_string(),
            business_name: "Sports Central".to_string(),
            business_avatar: SPORTS_CENTRAL_AVATAR.to_string(),
            product_name: "Professional Running Shoes".to_string(),
            description: "High-performance running shoes with advanced cushioning technology. \
                          Perfect for marathons and daily training."
                .to_string(),
            image: pexels(2529148, 800),
            original_price: 159.0,
            discount_price: 99.0,
            discount_percentage: 38,
            category: Category::Sports,
            tags: tags(&["shoes", "running", "fitness"]),
            ratings: vec![rating(
                "4",
                "user4",
                "Sarah Wilson",
                1130626,
                5,
                Some("Best running shoes I've ever owned!"),
                day(2024, 1, 12),
            )],
            average_rating: 5.0,
            comments: vec![],
            saves: 78,
            created_at: day(2024, 1, 12),
            expires_at: None,
            user_rating: None,
            is_saved: false,
        },
    ]
}

/// Stories shown above the feed.
pub fn stories(now: DateTime<Utc>) -> Vec<Story> {
    let story = |id: &str, business_id: &str, name: &str, avatar: &str, photo: u32, title: &str, viewed: bool| Story {
        id: id.to_string(),
        business_id: business_id.to_string(),
        business_name: name.to_string(),
        business_avatar: avatar.to_string(),
        image: pexels(photo, 400),
        title: title.to_string(),
        created_at: now,
        viewed,
    };

    vec![
        story("s1", "tech-store", "TechStore Inc.", TECH_STORE_AVATAR, 1334597, "Flash Sale Today!", false),
        story("s2", "fashion-hub", "Fashion Hub", FASHION_HUB_AVATAR, 1926769, "New Collection", true),
        story("s3", "home-decor", "Home & Living", HOME_LIVING_AVATAR, 1571460, "Home Makeover", false),
        story("s4", "sports-gear", "Sports Central", SPORTS_CENTRAL_AVATAR, 1552242, "Fitness Tips", false),
    ]
}

/// Initial notifications for `viewer_id`.
pub fn notifications(viewer_id: &str, now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            user_id: viewer_id.to_string(),
            kind: NotificationKind::NewOffer,
            title: "New Deal Alert!".to_string(),
            message: "TechStore Inc. posted a new offer: iPhone 15 Pro Max - 17% off".to_string(),
            data: Some(json!({ "offer_id": "1", "business_id": "tech-store" })),
            read: false,
            created_at: now - Duration::minutes(30),
        },
        Notification {
            id: "2".to_string(),
            user_id: viewer_id.to_string(),
            kind: NotificationKind::Rating,
            title: "New Rating".to_string(),
            message: "Someone rated your review helpful on Designer Leather Jacket".to_string(),
            data: Some(json!({ "offer_id": "2" })),
            read: false,
            created_at: now - Duration::hours(2),
        },
        Notification {
            id: "3".to_string(),
            user_id: viewer_id.to_string(),
            kind: NotificationKind::Follow,
            title: "New Follower".to_string(),
            message: "Fashion Hub started following you".to_string(),
            data: Some(json!({ "business_id": "fashion-hub" })),
            read: true,
            created_at: now - Duration::days(1),
        },
    ]
}

/// The TechStore Inc. account as a conversation participant.
pub fn tech_store() -> Viewer {
    Viewer::new("tech-store", "TechStore Inc.", TECH_STORE_AVATAR)
}

/// One conversation between `viewer` and TechStore Inc., with its messages.
pub fn conversations(viewer: &Viewer, now: DateTime<Utc>) -> Vec<(Conversation, Vec<Message>)> {
    let store = tech_store();

    let question = Message {
        id: "1".to_string(),
        sender_id: viewer.id.clone(),
        receiver_id: store.id.clone(),
        content: "Hi, I'm interested in the iPhone 15 Pro Max deal. Is it still available?".to_string(),
        kind: MessageKind::Text,
        attachment: None,
        created_at: now - Duration::hours(1),
        read: true,
    };
    let reply = Message {
        id: "2".to_string(),
        sender_id: store.id.clone(),
        receiver_id: viewer.id.clone(),
        content: "Hi! Thanks for your interest in our iPhone deal. \
                  Is there anything specific you'd like to know?"
            .to_string(),
        kind: MessageKind::Text,
        attachment: None,
        created_at: now - Duration::minutes(30),
        read: false,
    };

    let conversation = Conversation {
        id: "1".to_string(),
        participants: vec![viewer.clone(), store],
        last_message: Some(reply.clone()),
        unread_count: 1,
        updated_at: reply.created_at,
    };

    vec![(conversation, vec![question, reply])]
}
