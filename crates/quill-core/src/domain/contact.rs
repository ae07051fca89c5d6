//! Standalone append-only records: contact form messages and newsletter signups.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn with_id(self, id: i32) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
        }
    }
}

/// Newsletter subscription. Email is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub email: String,
}

impl NewSubscription {
    pub fn with_id(self, id: i32) -> NewsletterSubscription {
        NewsletterSubscription {
            id,
            email: self.email,
        }
    }
}
