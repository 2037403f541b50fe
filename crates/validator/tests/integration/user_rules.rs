//! End-to-end scenarios against the user validator.

use chrono::{Duration, Utc};
use flowcheck_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::fixtures::{basket, messages, user_validator, valid_user, User, UserDetails};

#[test]
fn valid_user_passes() {
    let outcome = user_validator().validate(&valid_user());
    assert!(outcome.is_valid());
    assert!(outcome.is_empty());
}

#[test]
fn empty_name_reports_custom_message_then_length() {
    let user = User {
        name: String::new(),
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    let name_failures: Vec<_> = outcome.failures_for("name").map(Failure::message).collect();
    assert_eq!(
        name_failures,
        ["Name is empty", "'name' must be between 3 and 50 characters long."]
    );
}

#[test]
fn age_out_of_range() {
    let user = User {
        age: 70,
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    assert_eq!(outcome.len(), 1);
    let failure = &outcome.failures()[0];
    assert_eq!(failure.property(), Some("age"));
    assert_eq!(failure.code(), Some("InRange"));
    assert_eq!(failure.attempted_value(), Some("70"));
}

#[test]
fn invalid_email() {
    let user = User {
        email: "not-an-email".to_string(),
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);
    assert_eq!(messages(&outcome), ["Email is not valid"]);
}

#[test]
fn future_past_time_and_missing_past_time_fail() {
    let validator = user_validator();

    let future = User {
        past_time: Some(Utc::now() + Duration::days(1)),
        ..valid_user()
    };
    assert_eq!(validator.validate(&future).failures()[0].code(), Some("PastDate"));

    let missing = User {
        past_time: None,
        ..valid_user()
    };
    assert!(!validator.validate(&missing).is_valid());
}

#[test]
fn duplicate_tags() {
    let user = User {
        tags: vec!["dup".to_string(), "dup".to_string()],
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);
    assert_eq!(messages(&outcome), ["Tags must be unique"]);
}

#[test]
fn invalid_details_are_merged_verbatim() {
    let user = User {
        details: Some(UserDetails {
            address: String::new(),
            phone: "12abc".to_string(),
        }),
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    let rendered: Vec<_> = outcome.failures().iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "address - [NotEmpty]: UserDetails address is required.",
            "address - [Length]: 'address' must be between 5 and 100 characters long.",
            "phone - [Regex]: 'phone' is not in the correct format.",
        ]
    );
}

#[test]
fn absent_details_are_not_a_failure() {
    let user = User {
        details: None,
        ..valid_user()
    };
    assert!(user_validator().validate(&user).is_valid());
}

#[test]
fn valid_baskets_pass() {
    let user = User {
        baskets: vec![basket("Sepet-1", 5), basket("Sepet-2", 20)],
        ..valid_user()
    };
    assert!(user_validator().validate(&user).is_valid());
}

#[test]
fn empty_basket_name_is_prefixed_with_position() {
    let user = User {
        baskets: vec![basket("Sepet-1", 5), basket("", 5)],
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    assert_eq!(
        messages(&outcome),
        [
            "Element 2: UserBaskets name is required.",
            "Element 2: 'name' must be between 3 and 50 characters long.",
        ]
    );
    assert!(outcome.failures().iter().all(|f| f.property() == Some("name")));
}

#[test]
fn one_bad_element_yields_exactly_one_failure() {
    let user = User {
        baskets: vec![basket("Sepet-1", 5), basket("Sepet-2", 500), basket("Sepet-3", 7)],
        ..valid_user()
    };
    assert!(user.details.is_some());

    let outcome = user_validator().validate(&user);
    assert_eq!(messages(&outcome), ["Element 2: 'count' must be between 1 and 100."]);
    assert_eq!(outcome.failures()[0].property(), Some("count"));
}

#[test]
fn basket_count_out_of_range() {
    let user = User {
        baskets: vec![basket("Sepet-1", 0), basket("Sepet-2", 101)],
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    let codes: Vec<_> = outcome.failures().iter().filter_map(Failure::code).collect();
    assert_eq!(codes, ["InRange", "InRange"]);
    assert!(outcome.failures()[0].message().starts_with("Element 1: "));
    assert!(outcome.failures()[1].message().starts_with("Element 2: "));
}

#[test]
fn nickname_callback_reports_each_problem() {
    let validator = user_validator();

    let short_spaced = User {
        nickname: Some("a b".to_string()),
        ..valid_user()
    };
    let outcome = validator.validate(&short_spaced);
    assert_eq!(messages(&outcome), ["Nickname cannot contain spaces."]);
    assert_eq!(outcome.failures()[0].code(), Some("ShouldRule"));

    let tiny = User {
        nickname: Some("x ".to_string()),
        ..valid_user()
    };
    assert_eq!(
        messages(&validator.validate(&tiny)),
        [
            "Nickname must be at least 3 characters long.",
            "Nickname cannot contain spaces."
        ]
    );

    let empty = User {
        nickname: Some(String::new()),
        ..valid_user()
    };
    assert!(validator.validate(&empty).is_valid());
}

#[test]
fn failures_follow_registration_order() {
    let user = User {
        name: String::new(),
        age: 10,
        email: "bad".to_string(),
        nickname: Some("a b".to_string()),
        baskets: vec![basket("", 1)],
        ..valid_user()
    };
    let outcome = user_validator().validate(&user);

    let properties: Vec<_> = outcome.failures().iter().filter_map(Failure::property).collect();
    assert_eq!(
        properties,
        ["name", "name", "age", "email", "name", "name", "nickname"]
    );
}

#[test]
fn rejection_carries_every_failure() {
    let user = User {
        age: 99,
        email: "bad".to_string(),
        ..valid_user()
    };
    let rejection = user_validator().validate(&user).into_result().unwrap_err();

    assert_eq!(rejection.failures().len(), 2);
    assert_eq!(rejection.to_string(), "validation failed with 2 failure(s)");
}

#[test]
fn json_body_shape() {
    let user = User {
        age: 99,
        ..valid_user()
    };
    let json = user_validator().validate(&user).to_json();

    assert_eq!(json["isValid"], false);
    assert_eq!(json["failures"][0]["propertyName"], "age");
    assert_eq!(json["failures"][0]["attemptedValue"], "99");
    assert_eq!(json["failures"][0]["severity"], "Error");
}
