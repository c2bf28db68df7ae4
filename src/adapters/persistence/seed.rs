use chrono::{DateTime, Utc};

use crate::core::models::UserRecord;

const SEED: [(&str, &str, &str, &str, &str); 8] = [
    ("1", "Ahmet", "Akdoğan", "ahmet.akdoğan@example.com", "5321234567"),
    ("2", "Neşe", "Uslu", "neşe.uslu@example.com", "5337654321"),
    ("3", "Yıldırım", "Korkmaz", "yıldırım.korkmaz@example.com", "5351234567"),
    ("4", "Ali", "Ateş", "ali.ateş@example.com", "5367654321"),
    ("5", "Ali", "Çelik", "ali.celik@example.com", "5381234567"),
    ("6", "Zeynep", "Ateş", "zeynep.ateş@example.com", "5397654321"),
    ("7", "Mustafa", "Arslan", "mustafa.arslan@example.com", "5301234567"),
    ("8", "Emine", "Yıldız", "emine.yıldız@example.com", "5327654321"),
];

/// Built-in sample users, all stamped with `created_at`.
pub fn seed_users(created_at: DateTime<Utc>) -> Vec<UserRecord> {
    SEED.iter()
        .map(|(id, first_name, last_name, email, phone)| UserRecord {
            id: (*id).to_string(),
            first_name: (*first_name).to_string(),
            last_name: (*last_name).to_string(),
            email: (*email).to_string(),
            phone: (*phone).to_string(),
            created_at,
        })
        .collect()
}
