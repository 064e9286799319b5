//! Property-based tests for the match engine.
//!
//! - **Absorbing match**: once a chain has matched, any further tests leave
//!   the held value and the matched flag unchanged
//! - **Unmatched stability**: failing tests never alter the held value

use monadic::prelude::*;
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// A chained test with its handler, applied to a `Match`.
#[derive(Debug, Clone)]
enum Step {
    Kind(NativeKind),
    KindWith(NativeKind, Value),
    Tag(String),
    TagWith(String, Value),
    Test(Value),
    TestWith(Value, Value),
    Any,
    AnyWith(Value),
    Raising,
}

impl Step {
    fn apply(self, chain: Match) -> Result<Match, Error> {
        match self {
            Self::Kind(kind) => Ok(chain.kind(kind)),
            Self::KindWith(kind, replacement) => chain.kind_with(kind, Handler::Replace(replacement)),
            Self::Tag(tag) => Ok(chain.tag(&tag)),
            Self::TagWith(tag, replacement) => chain.tag_with(&tag, Handler::Replace(replacement)),
            Self::Test(literal) => Ok(chain.test(literal)),
            Self::TestWith(literal, replacement) => {
                chain.test_with(literal, Handler::Replace(replacement))
            }
            Self::Any => Ok(chain.any()),
            Self::AnyWith(replacement) => chain.any_with(Handler::Replace(replacement)),
            Self::Raising => chain.any_with(Function::unary(|_| Err(Error::raised("raised")))),
        }
    }
}

fn kind() -> impl Strategy<Value = NativeKind> {
    prop::sample::select(NativeKind::ALL.to_vec())
}

fn tag() -> impl Strategy<Value = String> {
    prop_oneof![
        kind().prop_map(|kind| kind.name().to_owned()),
        Just("monadic_Identity".to_owned()),
        Just("monadic_Some".to_owned()),
        "[A-Za-z_]{1,12}",
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        kind().prop_map(Step::Kind),
        (kind(), scalar()).prop_map(|(kind, value)| Step::KindWith(kind, value)),
        tag().prop_map(Step::Tag),
        (tag(), scalar()).prop_map(|(tag, value)| Step::TagWith(tag, value)),
        scalar().prop_map(Step::Test),
        (scalar(), scalar()).prop_map(|(literal, value)| Step::TestWith(literal, value)),
        Just(Step::Any),
        scalar().prop_map(Step::AnyWith),
        Just(Step::Raising),
    ]
}

/// Steps that can never match the string `"\u{0}subject"` nor raise.
fn non_matching_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop::sample::select(vec![
            NativeKind::Integer,
            NativeKind::Float,
            NativeKind::Null,
            NativeKind::Array,
            NativeKind::Boolean,
            NativeKind::Callable,
            NativeKind::Object,
            NativeKind::Numeric,
            NativeKind::Resource,
        ])
        .prop_map(Step::Kind),
        Just(Step::Tag("monadic_Identity".to_owned())),
        "[a-z]{0,6}".prop_map(|literal| Step::Test(Value::from(literal))),
    ]
}

proptest! {
    /// After a match, no further step changes the value or the flag
    #[test]
    fn prop_matched_chain_is_absorbing(
        subject in scalar(),
        replacement in scalar(),
        steps in prop::collection::vec(step(), 0..12),
    ) {
        let matched = Match::on(subject).any_with(Handler::Replace(replacement.clone()))?;
        let mut chain = matched.clone();
        for step in steps {
            chain = step.apply(chain)?;
        }
        prop_assert!(chain.is_matched());
        prop_assert_eq!(chain.current(), &replacement);
        prop_assert_eq!(chain, matched);
    }

    /// Failing steps leave an unmatched chain untouched
    #[test]
    fn prop_failing_steps_keep_value(steps in prop::collection::vec(non_matching_step(), 0..12)) {
        let subject = Value::from("\u{0}subject");
        let mut chain = Match::on(subject.clone());
        for step in steps {
            chain = step.apply(chain)?;
        }
        prop_assert!(!chain.is_matched());
        prop_assert_eq!(chain.current(), &subject);
    }

    /// The first matching test decides the value
    #[test]
    fn prop_first_match_wins(value in any::<i64>(), first in scalar(), second in scalar()) {
        let chain = Match::on(value)
            .int_with(Handler::Replace(first.clone()))?
            .scalar_with(Handler::Replace(second))?;
        prop_assert_eq!(chain.into_current(), first);
    }
}
