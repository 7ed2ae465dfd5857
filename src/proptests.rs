use crate::{Path, join};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 1..=255),
        "[a-z0-9._ -]{1,32}".prop_map(String::into_bytes),
    ]
}

fn path() -> impl Strategy<Value = Path<'static>> {
    prop::collection::vec(segment(), 0..8).prop_map(|segments| {
        let parts: Vec<Path<'static>> = segments
            .iter()
            .map(|s| Path::from_segment(s).unwrap())
            .collect();
        join(&parts)
    })
}

proptest! {
    /// parse(format(p)) == p
    #[test]
    fn prop_roundtrip(p in path()) {
        let text = p.to_string();
        let parsed = Path::parse(&text).unwrap();
        prop_assert_eq!(parsed.as_bytes(), p.as_bytes(), "roundtrip failed for: {}", text);
    }

    #[test]
    fn prop_join_associative(a in path(), b in path(), c in path()) {
        let left = join([&join([&a, &b]), &c]);
        let right = join([&a, &join([&b, &c])]);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_join_identity(a in path()) {
        let empty = Path::new();
        prop_assert_eq!(&join([&empty, &a]), &a);
        prop_assert_eq!(&join([&a, &empty]), &a);
    }

    #[test]
    fn prop_pop_concat(p in path()) {
        let (head, tail) = p.pop();
        prop_assert_eq!(join([&head, &tail]), p.clone());
    }

    /// Popping until the tail is empty yields every segment in order.
    #[test]
    fn prop_pop_exhausts(segments in prop::collection::vec(segment(), 0..8)) {
        let parts: Vec<Path<'static>> = segments
            .iter()
            .map(|s| Path::from_segment(s).unwrap())
            .collect();
        let mut rest = join(&parts);
        let mut popped = Vec::new();
        while !rest.is_empty() {
            let (head, tail) = rest.pop();
            popped.push(head.into_owned());
            rest = tail.into_owned();
        }
        prop_assert_eq!(popped, parts);
    }

    #[test]
    fn prop_text_parses_without_empty_elements(elements in prop::collection::vec("[a-z]{0,6}", 0..8)) {
        let text = elements.join("/");
        let compact: Vec<&str> = elements.iter().map(String::as_str).filter(|e| !e.is_empty()).collect();
        prop_assert_eq!(Path::parse(&text).unwrap(), Path::parse(&compact.join("/")).unwrap());
    }
}
