//! Registration macros
//!
//! - [`rule_for!`]: start a rule chain for a struct field, labelled with
//!   the field's own name

// ============================================================================
// RULE_FOR MACRO
// ============================================================================

/// Starts a rule chain for a field, using the field name as the label.
///
/// `rule_for!(builder, User, email)` expands to
/// `builder.rule_for("email", |instance: &User| &instance.email)`, so the
/// label can never drift from the field it describes.
///
/// # Examples
///
/// ```
/// use flowcheck_validator::prelude::*;
/// use flowcheck_validator::rule_for;
///
/// #[derive(Debug)]
/// struct User {
///     email: String,
/// }
///
/// let mut builder = Validator::<User>::builder();
/// rule_for!(builder, User, email).email();
/// let validator = builder.build().unwrap();
///
/// let outcome = validator.validate(&User { email: "nope".into() });
/// assert_eq!(outcome.failures()[0].property(), Some("email"));
/// ```
#[macro_export]
macro_rules! rule_for {
    ($builder:expr, $ty:ty, $field:ident) => {
        $builder.rule_for(stringify!($field), |instance: &$ty| &instance.$field)
    };
    ($builder:expr, $ty:ty, $field:ident as $label:expr) => {
        $builder.rule_for($label, |instance: &$ty| &instance.$field)
    };
}
