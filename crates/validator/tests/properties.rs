//! Property tests for error tree merging and the SingleError command.

use proptest::prelude::*;
use verity_validator::prelude::*;

fn arb_collection() -> impl Strategy<Value = ErrorsCollection> {
    let entry = (
        prop::option::of("[a-c]"),
        prop::option::of("[x-z]"),
        "[a-z]{1,4}",
    );
    prop::collection::vec(entry, 0..12).prop_map(|entries| {
        let mut root = ErrorsCollection::new();
        for (outer, inner, template) in entries {
            let error = ValidationError::new(template);
            match (outer, inner) {
                (None, _) => root.add_error(error),
                (Some(outer), None) => root.add_member_error(outer, error),
                (Some(outer), Some(inner)) => {
                    let mut nested = ErrorsCollection::new();
                    nested.add_member_error(inner, error);
                    root.add_member_errors(outer, nested);
                }
            }
        }
        root
    })
}

fn keys(collection: &ErrorsCollection) -> Vec<String> {
    collection.members().map(|(key, _)| key.to_string()).collect()
}

proptest! {
    #[test]
    fn merge_keeps_every_occurrence(a in arb_collection(), b in arb_collection()) {
        let merged = ErrorsCollection::merge([&a, &b]);
        prop_assert_eq!(merged.error_count(), a.error_count() + b.error_count());
        prop_assert_eq!(merged.errors().len(), a.errors().len() + b.errors().len());
    }

    #[test]
    fn merge_has_no_sibling_contamination(a in arb_collection(), b in arb_collection()) {
        let merged = ErrorsCollection::merge([&a, &b]);
        for (key, node) in merged.members() {
            let expected = a.member(key).map_or(0, ErrorsCollection::error_count)
                + b.member(key).map_or(0, ErrorsCollection::error_count);
            prop_assert_eq!(node.error_count(), expected);
        }

        let mut union = keys(&a);
        for key in keys(&b) {
            if !union.contains(&key) {
                union.push(key);
            }
        }
        prop_assert_eq!(keys(&merged), union);
    }

    #[test]
    fn merge_with_empty_is_identity(a in arb_collection()) {
        let empty = ErrorsCollection::new();
        prop_assert_eq!(&ErrorsCollection::merge([&a, &empty]), &a);
        prop_assert_eq!(&ErrorsCollection::merge([&empty, &a]), &a);
    }

    #[test]
    fn single_error_reports_exactly_one(
        outcomes in prop::collection::vec(any::<bool>(), 1..8),
        declared_first in any::<bool>(),
    ) {
        let mut chain: Chain<u8, u8> = Chain::new();
        if declared_first {
            chain = chain.single_error("Invalid");
        }
        for passes in &outcomes {
            let passes = *passes;
            chain = chain.rule(valid(move |_: &u8| passes).with_error("Rule failed"));
        }
        if !declared_first {
            chain = chain.single_error("Invalid");
        }

        let spec = Specification::<u8>::builder()
            .field("Value", |v| v, chain)
            .build()
            .expect("valid spec");
        let context = ValidationContext::builder()
            .specification(spec)
            .build()
            .expect("valid context");
        let result = context.validate(Some(&0_u8)).expect("no fatal error");

        let expected = usize::from(outcomes.iter().any(|passes| !passes));
        prop_assert_eq!(result.errors().error_count(), expected);
        if expected == 1 {
            let node = result.errors().member("Value").expect("member node");
            prop_assert_eq!(node.errors()[0].template(), "Invalid");
        }
    }
}
