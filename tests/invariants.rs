use proptest::prelude::*;
use regex_trigram::query::trigrams;
use regex_trigram::string_set::{SetOrder, has_prefix, has_suffix};
use regex_trigram::{Analyzer, Limits, RegexInfo, parse};

fn pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-e]{1,5}",
        Just(".".to_string()),
        Just("[a-c]".to_string()),
        Just("[^x]".to_string()),
        Just("[a-z]".to_string()),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..5).prop_map(|p| p.concat()),
            prop::collection::vec(inner.clone(), 2..5).prop_map(|p| format!("(?:{})", p.join("|"))),
            (inner, prop::sample::select(vec!["*", "+", "?", "{2,4}"]))
                .prop_map(|(p, q)| format!("(?:{}){}", p, q)),
        ]
    })
}

fn limits() -> impl Strategy<Value = Limits> {
    prop_oneof![
        Just(Limits::default()),
        (1..8usize, 1..20usize, 1..30usize).prop_map(|(max_exact, max_set, max_class)| Limits {
            max_exact,
            max_set,
            max_class,
        }),
    ]
}

fn assert_bounded(set: &[String], order: SetOrder, limits: &Limits) -> Result<(), TestCaseError> {
    prop_assert!(set.len() <= limits.max_set, "{:?} has more than {} entries", set, limits.max_set);
    for w in set.windows(2) {
        prop_assert_eq!(order.compare(&w[0], &w[1]), std::cmp::Ordering::Less, "{:?} unsorted", set);
    }
    for (i, s) in set.iter().enumerate() {
        for (j, t) in set.iter().enumerate() {
            let covered = match order {
                SetOrder::Natural => has_prefix(t, s),
                SetOrder::Suffix => has_suffix(t, s),
            };
            prop_assert!(i == j || !covered, "{:?} covers {:?} in {:?}", s, t, set);
        }
    }
    Ok(())
}

fn check_info(info: &RegexInfo, limits: &Limits) -> Result<(), TestCaseError> {
    match &info.exact {
        Some(exact) => prop_assert!(exact.len() <= limits.max_exact),
        None => {
            assert_bounded(&info.prefix, SetOrder::Natural, limits)?;
            assert_bounded(&info.suffix, SetOrder::Suffix, limits)?;
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_analysis_keeps_sets_bounded(p in pattern(), limits in limits()) {
        let node = parse(&p).unwrap();
        let info = Analyzer::new(limits).analyze(&node).unwrap();
        check_info(&info, &limits)?;
    }

    #[test]
    fn prop_simplify_is_idempotent(p in pattern(), limits in limits()) {
        let node = parse(&p).unwrap();
        let mut info = Analyzer::new(limits).analyze(&node).unwrap();
        info.simplify(true, &limits);
        let once = info.clone();
        info.simplify(true, &limits);
        prop_assert_eq!(&info, &once);
        check_info(&info, &limits)?;
    }

    #[test]
    fn prop_self_combination_keeps_meaning(
        p in pattern(),
        texts in prop::collection::vec("[a-e]{0,10}", 1..16),
    ) {
        let q = Analyzer::default().query(&parse(&p).unwrap()).unwrap();
        let conj = q.clone().and(q.clone());
        let disj = q.clone().or(q.clone());
        for text in &texts {
            let present = trigrams(text);
            prop_assert_eq!(conj.matches(&present), q.matches(&present));
            prop_assert_eq!(disj.matches(&present), q.matches(&present));
        }
    }
}
