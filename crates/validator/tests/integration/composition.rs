//! Registry, collection mapping, custom producers and chain guards.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use flowcheck_validator::prelude::*;
use flowcheck_validator::rule_for;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::fixtures::{basket, basket_validator, messages, UserBasket};

// ============================================================================
// REUSABLE PRIMITIVE VALIDATORS
// ============================================================================

fn username_validator() -> Validator<str> {
    let mut builder = Validator::<str>::builder();
    builder.named("username");
    builder.custom("username", |name: &str, outcome: &mut Outcome| {
        if name.trim().is_empty() {
            outcome.add_failure(Failure::for_property("username", "Username cannot be empty."));
            return;
        }
        let code = "UserNameValidator";
        if !(3..=20).contains(&name.chars().count()) {
            outcome.add_failure(
                Failure::for_property("username", "Username must be between 3 and 20 characters.")
                    .with_code(code),
            );
        }
        if name.contains(' ') {
            outcome.add_failure(
                Failure::for_property("username", "Username cannot contain spaces.").with_code(code),
            );
        }
    });
    builder.build().unwrap()
}

#[derive(Debug)]
struct Account {
    username: String,
    display_name: String,
}

#[test]
fn registry_runs_alongside_main_chain() {
    let shared = Arc::new(username_validator());

    let mut builder = Validator::<Account>::builder();
    rule_for!(builder, Account, username)
        .not_empty()
        .with_message("Username is required");
    builder.registry("username", |a: &Account| a.username.as_str(), Arc::clone(&shared));
    builder.registry("display_name", |a: &Account| a.display_name.as_str(), Arc::clone(&shared));
    let validator = builder.build().unwrap();

    let outcome = validator.validate(&Account {
        username: String::new(),
        display_name: "a very long display name".to_string(),
    });
    assert_eq!(
        messages(&outcome),
        [
            "Username is required",
            "Username cannot be empty.",
            "Username must be between 3 and 20 characters.",
            "Username cannot contain spaces.",
        ]
    );
    assert_eq!(Arc::strong_count(&shared), 3);
}

// ============================================================================
// COLLECTION MAPPING
// ============================================================================

#[derive(Debug)]
struct Order {
    lines: Vec<OrderLine>,
}

#[derive(Debug)]
struct OrderLine {
    sku: String,
    basket: UserBasket,
}

#[test]
fn collection_positions_follow_source_items() {
    let mut builder = Validator::<Order>::builder();
    builder.collection(
        "lines",
        |o: &Order| o.lines.as_slice(),
        basket_validator(),
        |line: &OrderLine| &line.basket,
    );
    let validator = builder.build().unwrap();

    let order = Order {
        lines: vec![
            OrderLine {
                sku: "A-1".to_string(),
                basket: basket("first", 1),
            },
            OrderLine {
                sku: "A-2".to_string(),
                basket: basket("second", 1),
            },
            OrderLine {
                sku: "A-3".to_string(),
                basket: basket("third", 500),
            },
        ],
    };
    let outcome = validator.validate(&order);

    assert_eq!(messages(&outcome), ["Element 3: 'count' must be between 1 and 100."]);
    assert_eq!(outcome.failures()[0].attempted_value(), Some("500"));
    assert!(order.lines.iter().all(|line| line.sku.starts_with("A-")));
}

#[test]
fn empty_collection_is_valid() {
    let mut builder = Validator::<Order>::builder();
    builder.collection(
        "lines",
        |o: &Order| o.lines.as_slice(),
        basket_validator(),
        |line: &OrderLine| &line.basket,
    );
    let validator = builder.build().unwrap();

    assert!(validator.validate(&Order { lines: Vec::new() }).is_valid());
}

#[derive(Debug)]
struct Warehouse {
    bins: BTreeMap<u32, UserBasket>,
    queue: VecDeque<UserBasket>,
}

fn warehouse_validator() -> Validator<Warehouse> {
    let mut builder = Validator::<Warehouse>::builder();
    builder.collection_iter(
        "bins",
        |w: &Warehouse| Box::new(w.bins.values()),
        basket_validator(),
        |b: &UserBasket| b,
    );
    builder.each("queue", |w: &Warehouse| &w.queue, basket_validator());
    builder.build().unwrap()
}

#[test]
fn map_values_and_deques_are_linked() {
    let warehouse = Warehouse {
        bins: BTreeMap::from([(30, basket("third", 0)), (10, basket("first", 1))]),
        queue: VecDeque::from([basket("ok", 1), basket("queued", 1)]),
    };
    let outcome = warehouse_validator().validate(&warehouse);

    assert_eq!(
        messages(&outcome),
        [
            "Element 2: 'count' must be between 1 and 100.",
            "Element 1: 'name' must be between 3 and 50 characters long.",
        ]
    );
}

// ============================================================================
// CHAIN GUARDS
// ============================================================================

#[derive(Debug)]
struct Shipment {
    express: bool,
    tracking: Option<String>,
    weight: f64,
}

fn shipment_validator() -> Validator<Shipment> {
    let mut builder = Validator::<Shipment>::builder();
    rule_for!(builder, Shipment, tracking)
        .required_when(|s| s.express)
        .length(10, 10)
        .with_message("Tracking numbers have 10 characters");
    rule_for!(builder, Shipment, weight)
        .when(|s| s.express)
        .less_than(20.0)
        .with_severity(Severity::Warning);
    builder.build().unwrap()
}

#[rstest]
#[case(false, None, 50.0, &[])]
#[case(true, None, 5.0, &["'tracking' is required.", "Tracking numbers have 10 characters"])]
#[case(true, Some("ABC"), 5.0, &["Tracking numbers have 10 characters"])]
#[case(true, Some("0123456789"), 50.0, &["'weight' must be less than 20."])]
fn guards_skip_only_their_own_chain(
    #[case] express: bool,
    #[case] tracking: Option<&str>,
    #[case] weight: f64,
    #[case] expected: &[&str],
) {
    let shipment = Shipment {
        express,
        tracking: tracking.map(str::to_string),
        weight,
    };
    let outcome = shipment_validator().validate(&shipment);
    assert_eq!(messages(&outcome), expected);
}

#[test]
fn warnings_do_not_block_at_error_level() {
    let shipment = Shipment {
        express: true,
        tracking: Some("0123456789".to_string()),
        weight: 50.0,
    };
    let outcome = shipment_validator().validate(&shipment);

    assert!(!outcome.is_valid());
    assert!(!outcome.has_blocking(Severity::Error));
    assert!(outcome.into_result_at(Severity::Error).is_ok());
}

// ============================================================================
// SHOULD RULES
// ============================================================================

#[derive(Debug)]
struct Coupon {
    code: String,
}

#[test]
fn should_converts_errors_into_failures() {
    let mut builder = Validator::<Coupon>::builder();
    rule_for!(builder, Coupon, code)
        .should(|code: &String| {
            if code.starts_with("X") {
                Err("Code cannot start with 'X'.")
            } else {
                Ok(())
            }
        })
        .should(|code: &String| code.parse::<u32>().map(|_| ()))
        .with_message("Code must be numeric");
    let validator = builder.build().unwrap();

    let outcome = validator.validate(&Coupon {
        code: "X12".to_string(),
    });
    assert_eq!(
        messages(&outcome),
        ["Code cannot start with 'X'.", "Code must be numeric"]
    );
    assert!(outcome
        .failures()
        .iter()
        .all(|f| f.code() == Some("ShouldRuleException")));

    assert!(validator.validate(&Coupon { code: "123".to_string() }).is_valid());
}

// ============================================================================
// CUSTOM PRODUCERS AND ROOT FAILURES
// ============================================================================

#[test]
fn custom_producer_can_report_root_failures() {
    let mut builder = Validator::<Coupon>::builder();
    builder.custom("coupon", |coupon: &Coupon, outcome: &mut Outcome| {
        if coupon.code == "EXPIRED" {
            outcome.add_failure(Failure::new("Coupon has expired").with_code("Expired"));
        }
    });
    let validator = builder.build().unwrap();

    let outcome = validator.validate(&Coupon {
        code: "EXPIRED".to_string(),
    });
    assert_eq!(
        outcome.failures()[0].to_string(),
        "<root> - [Expired]: Coupon has expired"
    );
}

#[test]
fn invalid_sub_outcome_without_failures_invalidates_parent() {
    let mut builder = Validator::<Coupon>::builder();
    builder.custom("coupon", |_: &Coupon, outcome: &mut Outcome| outcome.set_valid(false));
    let validator = builder.build().unwrap();

    let outcome = validator.validate(&Coupon {
        code: String::new(),
    });
    assert!(!outcome.is_valid());
    assert!(outcome.is_empty());
    assert!(outcome.into_result_at(Severity::Error).is_err());
}

#[test]
fn standalone_chain_as_producer() {
    let mut chain = RuleChain::new("code", |c: &Coupon| c.code.as_str());
    chain.contains("-").with_code("Dash");

    let mut builder = Validator::<Coupon>::builder();
    builder.add_chain(chain);
    let validator = builder.build().unwrap();

    let outcome = validator.validate(&Coupon {
        code: "ABC".to_string(),
    });
    assert_eq!(outcome.failures()[0].code(), Some("Dash"));
}
