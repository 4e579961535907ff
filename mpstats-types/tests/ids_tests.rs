use mpstats_types::RepositoryId;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn repository_id_roundtrips_raw_value() {
    let id = RepositoryId::new(42);
    assert_eq!(id.get(), 42);
    assert_eq!(RepositoryId::from(42), id);
}

#[test]
fn repository_id_display_and_parse() {
    let id = RepositoryId::new(1337);
    let parsed = RepositoryId::parse(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn repository_id_parse_trims_whitespace() {
    assert_eq!(RepositoryId::parse(" 7 ").unwrap(), RepositoryId::new(7));
    assert_eq!(RepositoryId::from_str("8\n").unwrap(), RepositoryId::new(8));
}

#[test]
fn repository_id_parse_invalid() {
    assert!(RepositoryId::parse("seven").is_err());
    assert!(RepositoryId::from_str("").is_err());
}

#[test]
fn repository_id_serializes_transparently() {
    let json = serde_json::to_string(&RepositoryId::new(5)).unwrap();
    assert_eq!(json, "5");
    let parsed: RepositoryId = serde_json::from_str("5").unwrap();
    assert_eq!(parsed, RepositoryId::new(5));
}

#[test]
fn repository_id_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(RepositoryId::new(1));
    set.insert(RepositoryId::new(1));
    set.insert(RepositoryId::new(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn repository_id_orders_numerically() {
    assert!(RepositoryId::new(2) < RepositoryId::new(10));
}
