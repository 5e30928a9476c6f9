//! End-to-end validation through a context, rendered with English phrases.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use verity_validator::prelude::*;

// ============================================================================
// MODELS
// ============================================================================

struct Account {
    login: String,
    password: Option<String>,
    tags: Vec<Option<String>>,
    age: u32,
}

impl Account {
    fn valid() -> Self {
        Self {
            login: "alice".into(),
            password: Some("secret-password".into()),
            tags: vec![Some("rust".into())],
            age: 30,
        }
    }
}

fn account_spec() -> ValidatorResult<Specification<Account>> {
    let tag: Chain<String, Account> = Chain::new().rule(min_length(2));
    Specification::<Account>::builder()
        .field("Login", |a| a.login.as_str(), Chain::new().rule(not_empty()))
        .member(
            "Password",
            |a| a.password.as_deref(),
            Chain::new().rule(not_empty()).rule(min_length(6)),
        )
        .field("Tags", |a| &a.tags, Chain::new().rule(each_nullable(tag)))
        .field("Age", |a| &a.age, Chain::new().rule(between(18, 120)))
        .build()
}

fn context() -> ValidationContext {
    ValidationContext::builder()
        .specification_with(account_spec)
        .build()
        .expect("valid context")
}

fn tree_of(context: &ValidationContext, account: &Account) -> Value {
    let english = context.translator("English").expect("english");
    context
        .validate(Some(account))
        .and_then(|result| result.tree(english))
        .expect("no fatal error")
}

// ============================================================================
// MEMBERS
// ============================================================================

#[test]
fn test_valid_model_has_no_errors() {
    let context = context();
    let account = Account::valid();
    let result = context.validate(Some(&account)).expect("no fatal error");
    assert!(result.is_valid());
    assert_eq!(tree_of(&context, &account), json!({}));
}

#[test]
fn test_absent_password_is_required() {
    let context = context();
    let account = Account {
        password: None,
        ..Account::valid()
    };
    assert_eq!(tree_of(&context, &account), json!({ "Password": ["Required"] }));
}

#[test]
fn test_short_password_renders_english_phrase() {
    let context = context();
    let account = Account {
        password: Some("abc".into()),
        ..Account::valid()
    };
    assert_eq!(
        tree_of(&context, &account),
        json!({ "Password": ["Text value should have minimum 6 characters"] })
    );
}

#[test]
fn test_collection_items_are_keyed_by_index() {
    let context = context();
    let account = Account {
        tags: vec![Some("ok".into()), None, Some("x".into())],
        ..Account::valid()
    };
    assert_eq!(
        tree_of(&context, &account),
        json!({
            "Tags": {
                "1": ["Required"],
                "2": ["Text value should have minimum 2 characters"]
            }
        })
    );
}

#[test]
fn test_complete_reports_every_failure_in_scope_order() {
    let context = context();
    let account = Account {
        login: String::new(),
        password: Some(String::new()),
        tags: Vec::new(),
        age: 7,
    };
    let result = context.validate(Some(&account)).expect("no fatal error");
    let english = context.translator("English").expect("english");
    assert_eq!(
        result.list(english).expect("within depth").lines(),
        vec![
            "Login: Text value should not be empty",
            "Password: Text value should not be empty",
            "Password: Text value should have minimum 6 characters",
            "Age: Number should be between 18 and 120",
        ]
    );
}

#[test]
fn test_fail_fast_stops_each_chain() {
    let context = context();
    let account = Account {
        password: Some(String::new()),
        ..Account::valid()
    };
    let overrides = ValidationOverrides::new().strategy(ValidationStrategy::FailFast);
    let result = context
        .validate_with(Some(&account), overrides)
        .expect("no fatal error");
    assert_eq!(result.strategy(), ValidationStrategy::FailFast);
    assert_eq!(result.errors().error_count(), 1);
}

// ============================================================================
// COMMANDS
// ============================================================================

struct Signup {
    email: Option<String>,
    nickname: Option<String>,
    password: String,
}

#[test]
fn test_commands_are_order_independent() {
    let before = Specification::<Signup>::builder()
        .field(
            "Password",
            |s| s.password.as_str(),
            Chain::new()
                .single_error("Password is too weak")
                .rule(min_length(8))
                .rule(matches(regex::Regex::new(r"\d").expect("regex"))),
        )
        .build()
        .expect("valid spec");
    let after = Specification::<Signup>::builder()
        .field(
            "Password",
            |s| s.password.as_str(),
            Chain::new()
                .rule(min_length(8))
                .rule(matches(regex::Regex::new(r"\d").expect("regex")))
                .single_error("Password is too weak"),
        )
        .build()
        .expect("valid spec");

    let signup = Signup {
        email: None,
        nickname: None,
        password: "weak".into(),
    };
    for spec in [before, after] {
        let context = ValidationContext::builder()
            .specification(spec)
            .build()
            .expect("valid context");
        let result = context.validate(Some(&signup)).expect("no fatal error");
        let messages: Vec<&str> = result
            .errors()
            .member("Password")
            .map(|m| m.errors().iter().map(ValidationError::template).collect())
            .unwrap_or_default();
        assert_eq!(messages, vec!["Password is too weak"]);
    }
}

#[test]
fn test_optional_named_and_custom_message() {
    let spec = Specification::<Signup>::builder()
        .member(
            "Email",
            |s| s.email.as_deref(),
            Chain::new().rule(contains("@")).optional(),
        )
        .member(
            "Nickname",
            |s| s.nickname.as_deref(),
            Chain::new().rule(not_empty()).named("Display name"),
        )
        .field(
            "Password",
            |s| s.password.as_str(),
            Chain::new()
                .rule(min_length(8))
                .with_message("Use at least {min} characters"),
        )
        .build()
        .expect("valid spec");
    let context = ValidationContext::builder()
        .specification(spec)
        .build()
        .expect("valid context");

    let signup = Signup {
        email: None,
        nickname: None,
        password: "short".into(),
    };
    let result = context.validate(Some(&signup)).expect("no fatal error");
    let english = context.translator("English").expect("english");
    assert_eq!(
        result.tree(english).expect("within depth"),
        json!({
            "Display name": ["Required"],
            "Password": ["Use at least 8 characters"]
        })
    );
}

#[test]
fn test_duplicate_command_fails_build() {
    let result = Specification::<Signup>::builder()
        .member(
            "Email",
            |s| s.email.as_deref(),
            Chain::new().optional().rule(not_empty()).optional(),
        )
        .build();
    assert_eq!(
        result.map(|_| ()),
        Err(ValidatorError::DuplicateCommand {
            command: Command::Optional,
            scope: "Email".into(),
        })
    );
}

// ============================================================================
// NESTED MODELS AND THE REGISTRY
// ============================================================================

struct Department {
    name: String,
    head: Option<Box<Employee>>,
}

struct Employee {
    name: String,
    department: Option<Box<Department>>,
}

fn department_spec() -> ValidatorResult<Specification<Department>> {
    Specification::<Department>::builder()
        .field("Name", |d| d.name.as_str(), Chain::new().rule(not_empty()))
        .member(
            "Head",
            |d| d.head.as_deref(),
            Chain::new().rule(registered_model()).optional(),
        )
        .build()
}

fn employee_spec() -> ValidatorResult<Specification<Employee>> {
    Specification::<Employee>::builder()
        .field("Name", |e| e.name.as_str(), Chain::new().rule(not_empty()))
        .member(
            "Department",
            |e| e.department.as_deref(),
            Chain::new().rule(registered_model()).optional(),
        )
        .build()
}

fn company() -> ValidationContext {
    ValidationContext::builder()
        .specification_with(department_spec)
        .specification_with(employee_spec)
        .build()
        .expect("valid context")
}

#[test]
fn test_mutually_referencing_specifications() {
    let research = Department {
        name: "Research".into(),
        head: Some(Box::new(Employee {
            name: "Ann".into(),
            department: Some(Box::new(Department {
                name: String::new(),
                head: None,
            })),
        })),
    };

    let context = company();
    let english = context.translator("English").expect("english");
    let result = context.validate(Some(&research)).expect("no fatal error");
    assert_eq!(
        result.tree(english).expect("within depth"),
        json!({ "Head": { "Department": { "Name": ["Text value should not be empty"] } } })
    );
}

struct Link {
    label: String,
    next: Option<Box<Link>>,
}

fn links(count: usize) -> Link {
    let mut link = Link {
        label: "end".into(),
        next: None,
    };
    for _ in 1..count {
        link = Link {
            label: "link".into(),
            next: Some(Box::new(link)),
        };
    }
    link
}

fn link_context() -> ValidationContext {
    ValidationContext::builder()
        .specification_with(|| {
            Specification::<Link>::builder()
                .field("Label", |l| l.label.as_str(), Chain::new().rule(min_length(1)))
                .member(
                    "Next",
                    |l| l.next.as_deref(),
                    Chain::new().rule(registered_model()).optional(),
                )
                .build()
        })
        .build()
        .expect("valid context")
}

#[test]
fn test_cyclic_instance_exceeds_max_depth() {
    let context = link_context();

    // Eleven links reach depth 10.
    let shallow = links(11);
    assert!(context.validate(Some(&shallow)).expect("within depth").is_valid());

    let deep = links(12);
    assert_eq!(
        context.validate(Some(&deep)).map(|r| r.is_valid()),
        Err(ValidatorError::MaxDepthExceeded { max_depth: 10 })
    );

    let overrides = ValidationOverrides::new().max_depth(20);
    assert!(context.validate_with(Some(&deep), overrides).is_ok());
}

#[test]
fn test_missing_nested_specification_is_fatal() {
    let context = ValidationContext::builder()
        .specification_with(department_spec)
        .build()
        .expect("valid context");
    let research = Department {
        name: "Research".into(),
        head: Some(Box::new(Employee {
            name: "Ann".into(),
            department: None,
        })),
    };
    assert!(matches!(
        context.validate(Some(&research)),
        Err(ValidatorError::SpecificationNotFound { .. })
    ));
}

// ============================================================================
// NULLABLE AND INLINE MODELS
// ============================================================================

struct Address {
    city: String,
}

struct Order {
    discount: Option<u32>,
    address: Address,
}

fn order_context() -> ValidationContext {
    let address = Specification::<Address>::builder()
        .field("City", |a| a.city.as_str(), Chain::new().rule(not_empty()))
        .build()
        .expect("valid address spec");
    let order = Specification::<Order>::builder()
        .field(
            "Discount",
            |o| &o.discount,
            Chain::new().rule(nullable(Chain::new().rule(max(50)))),
        )
        .field(
            "Address",
            |o| &o.address,
            Chain::new().rule(model(Arc::new(address))),
        )
        .build()
        .expect("valid order spec");
    ValidationContext::builder()
        .specification(order)
        .build()
        .expect("valid context")
}

fn order_tree(context: &ValidationContext, order: &Order) -> Value {
    let english = context.translator("English").expect("english");
    context
        .validate(Some(order))
        .and_then(|result| result.tree(english))
        .expect("no fatal error")
}

#[rstest]
#[case(None, json!({}))]
#[case(Some(20), json!({}))]
#[case(Some(70), json!({ "Discount": ["Number should be less than or equal to 50"] }))]
fn test_nullable_runs_only_on_some(#[case] discount: Option<u32>, #[case] expected: Value) {
    let context = order_context();
    let order = Order {
        discount,
        address: Address {
            city: "Oslo".into(),
        },
    };
    assert_eq!(order_tree(&context, &order), expected);
}

#[test]
fn test_inline_model_nests_errors_under_member() {
    let context = order_context();
    let order = Order {
        discount: None,
        address: Address {
            city: String::new(),
        },
    };
    assert_eq!(
        order_tree(&context, &order),
        json!({ "Address": { "City": ["Text value should not be empty"] } })
    );
}

#[test]
fn test_error_surface_covers_nullable_and_inline_model() {
    let context = order_context();
    let english = context.translator("English").expect("english");
    let surface = context.error_surface::<Order>().expect("no fatal error");
    assert_eq!(
        surface.tree(english).expect("within depth"),
        json!({
            "Discount": ["Number should be less than or equal to 50"],
            "Address": { "City": ["Text value should not be empty"] }
        })
    );
}

// ============================================================================
// FORCE MODE
// ============================================================================

#[test]
fn test_error_surface_lists_every_error() {
    let context = context();
    let english = context.translator("English").expect("english");
    let surface = context.error_surface::<Account>().expect("no fatal error");
    assert!(surface.model().is_none());
    assert_eq!(
        surface.tree(english).expect("within depth"),
        json!({
            "Login": ["Text value should not be empty"],
            "Password": [
                "Required",
                "Text value should not be empty",
                "Text value should have minimum 6 characters"
            ],
            "Tags": {
                "#": ["Required", "Text value should have minimum 2 characters"]
            },
            "Age": ["Number should be between 18 and 120"]
        })
    );
}

#[test]
fn test_error_surface_of_cyclic_specification_terminates() {
    let context = link_context();
    let surface = context.error_surface::<Link>().expect("no fatal error");
    assert_eq!(surface.errors().error_count(), 11);
    assert!(surface.tree(context.default_translator()).is_ok());
}

// ============================================================================
// RESULTS AND OPTIONS
// ============================================================================

#[test]
fn test_merged_results() {
    let context = context();
    let first = Account {
        login: String::new(),
        ..Account::valid()
    };
    let second = Account {
        password: None,
        ..Account::valid()
    };
    let a = context.validate(Some(&first)).expect("no fatal error");
    let b = context.validate(Some(&second)).expect("no fatal error");

    let merged = a.merge(&b);
    assert!(merged.is_merged());
    assert!(!a.is_merged());
    assert_eq!(merged.errors().error_count(), 2);
    assert_eq!(
        merged.errors().members().map(|(key, _)| key).collect::<Vec<_>>(),
        vec!["Login", "Password"]
    );
}

#[test]
fn test_options_from_json() {
    let options = ValidationOptions::from_json(
        r#"{ "null_root_policy": "required", "required_error": "Field is required" }"#,
    )
    .expect("valid options");
    let context = ValidationContext::builder()
        .options(options)
        .specification_with(account_spec)
        .build()
        .expect("valid context");

    let result = context.validate::<Account>(None).expect("null handled");
    assert_eq!(
        result.list(context.default_translator()).expect("within depth").lines(),
        vec!["Field is required"]
    );

    assert!(matches!(
        ValidationOptions::from_json(r#"{ "max_depth": "deep" }"#),
        Err(ValidatorError::InvalidOptions { .. })
    ));
}

#[test]
fn test_extra_translation() {
    let polish = Translation::new(
        "Polish",
        [
            ("Global.Required", "Wymagane"),
            ("Texts.MinLength", "Tekst powinien mieć co najmniej {min} znaków"),
        ],
    )
    .expect("valid translation");
    let context = ValidationContext::builder()
        .specification_with(account_spec)
        .translation(polish)
        .build()
        .expect("valid context");

    let account = Account {
        password: Some("abc".into()),
        ..Account::valid()
    };
    let result = context.validate(Some(&account)).expect("no fatal error");
    let polish = context.translator("Polish").expect("polish");
    assert_eq!(
        result.tree(polish).expect("within depth"),
        json!({ "Password": ["Tekst powinien mieć co najmniej 6 znaków"] })
    );
}
