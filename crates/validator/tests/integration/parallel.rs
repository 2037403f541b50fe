//! Parallel execution keeps registration order.

use std::sync::Arc;
use std::thread;

use flowcheck_validator::prelude::*;
use pretty_assertions::assert_eq;

use crate::fixtures::{basket, user_validator, user_validator_with, valid_user, User, UserDetails};

fn broken_user() -> User {
    User {
        name: String::new(),
        age: 5,
        email: "nope".to_string(),
        tags: vec!["a".to_string(), "a".to_string()],
        nickname: Some("x y".to_string()),
        details: Some(UserDetails {
            address: "abc".to_string(),
            phone: "12".to_string(),
        }),
        baskets: vec![basket("", 0), basket("ok basket", 3), basket("zz", 200)],
        ..valid_user()
    }
}

#[test]
fn parallel_outcome_equals_sequential() {
    let sequential = user_validator();
    let parallel = user_validator_with(ValidatorConfig::parallel().with_parallel_threshold(2));

    let user = broken_user();
    let expected = sequential.validate(&user);
    assert!(expected.len() > 10);

    for _ in 0..20 {
        assert_eq!(parallel.validate(&user), expected);
    }
}

#[test]
fn config_from_json_drives_execution() {
    let config = ValidatorConfig::from_json(r#"{ "execution": "parallel", "parallel_threshold": 1 }"#)
        .unwrap();
    let validator = user_validator_with(config);

    assert_eq!(validator.config().execution, ExecutionMode::Parallel);
    assert_eq!(validator.validate(&broken_user()), user_validator().validate(&broken_user()));
}

#[test]
fn concurrent_calls_share_one_validator() {
    let validator = Arc::new(user_validator_with(ValidatorConfig::parallel()));

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let user = if i % 2 == 0 { valid_user() } else { broken_user() };
                validator.validate(&user).is_valid()
            })
        })
        .collect();

    let results: Vec<bool> = workers.into_iter().map(|w| w.join().unwrap()).collect();
    assert_eq!(
        results,
        [true, false, true, false, true, false, true, false]
    );
}
