//! Shared domain model and validators.

use chrono::{DateTime, Duration, Utc};
use flowcheck_validator::prelude::*;
use flowcheck_validator::rule_for;

#[derive(Debug, Clone)]
pub struct UserDetails {
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct UserBasket {
    pub name: String,
    pub count: i32,
}

#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub age: i32,
    pub past_time: Option<DateTime<Utc>>,
    pub email: String,
    pub tags: Vec<String>,
    pub nickname: Option<String>,
    pub details: Option<UserDetails>,
    pub baskets: Vec<UserBasket>,
}

/// A user that passes every rule of [`user_validator`].
pub fn valid_user() -> User {
    User {
        name: "Kadir".to_string(),
        age: 30,
        past_time: Some(Utc::now() - Duration::days(5)),
        email: "test@test.com".to_string(),
        tags: vec!["one".to_string(), "two".to_string()],
        nickname: None,
        details: Some(UserDetails {
            address: "Istanbul - Turkey".to_string(),
            phone: "1234567890".to_string(),
        }),
        baskets: Vec::new(),
    }
}

pub fn basket(name: &str, count: i32) -> UserBasket {
    UserBasket {
        name: name.to_string(),
        count,
    }
}

pub fn details_validator() -> Validator<UserDetails> {
    let mut builder = Validator::<UserDetails>::builder();
    rule_for!(builder, UserDetails, address)
        .not_empty()
        .with_message("UserDetails address is required.")
        .length(5, 100);
    rule_for!(builder, UserDetails, phone).matches_regex(r"^\d{10}$");
    builder.build().unwrap()
}

pub fn basket_validator() -> Validator<UserBasket> {
    let mut builder = Validator::<UserBasket>::builder();
    rule_for!(builder, UserBasket, name)
        .not_empty()
        .with_message("UserBaskets name is required.")
        .length(3, 50);
    rule_for!(builder, UserBasket, count).in_range(1, 100);
    builder.build().unwrap()
}

pub fn user_validator_with(config: ValidatorConfig) -> Validator<User> {
    let mut builder = Validator::<User>::builder();
    builder.config(config);

    rule_for!(builder, User, name)
        .not_empty()
        .with_message("Name is empty")
        .length(3, 50);
    rule_for!(builder, User, age).in_range(18, 60);
    rule_for!(builder, User, email)
        .email()
        .with_message("Email is not valid");
    rule_for!(builder, User, past_time).date_in_past();
    rule_for!(builder, User, tags)
        .unique()
        .with_message("Tags must be unique");

    builder.nested("details", |u: &User| u.details.as_ref(), details_validator());
    builder.each("baskets", |u: &User| u.baskets.as_slice(), basket_validator());

    rule_for!(builder, User, nickname).should_report(|nickname: &Option<String>, report: &mut Report| {
        if let Some(nickname) = nickname.as_deref().filter(|n| !n.is_empty()) {
            if nickname.chars().count() < 3 {
                report.fail("Nickname must be at least 3 characters long.");
            }
            if nickname.contains(' ') {
                report.fail("Nickname cannot contain spaces.");
            }
        }
    });

    builder.build().unwrap()
}

pub fn user_validator() -> Validator<User> {
    user_validator_with(ValidatorConfig::default())
}

pub fn messages(outcome: &Outcome) -> Vec<&str> {
    outcome.failures().iter().map(Failure::message).collect()
}
