// Domain module tests.

use super::*;

#[test]
fn test_base_domain_of_registrable_domain() {
    assert_eq!(base_domain("example.com"), "example.com");
}

#[test]
fn test_base_domain_strips_subdomains() {
    assert_eq!(base_domain("www.example.com"), "example.com");
    assert_eq!(base_domain("a.b.c.example.com"), "example.com");
}

#[test]
fn test_base_domain_multi_part_suffix() {
    // Two labels in the public suffix must both be kept
    assert_eq!(base_domain("sub.example.co.uk"), "example.co.uk");
    assert_eq!(base_domain("example.co.uk"), "example.co.uk");
}

#[test]
fn test_base_domain_normalizes_case_and_trailing_dot() {
    assert_eq!(base_domain("WWW.Example.COM."), "example.com");
}

#[test]
fn test_base_domain_falls_back_to_input() {
    // A bare public suffix has no registrable part
    assert_eq!(base_domain("co.uk"), "co.uk");
    assert_eq!(base_domain("127.0.0.1"), "127.0.0.1");
}

#[test]
fn test_normalize_hostname() {
    assert_eq!(normalize_hostname("  Foo.Example.com. "), "foo.example.com");
    assert_eq!(normalize_hostname("bar.ns.cloudflare.com."), "bar.ns.cloudflare.com");
}

#[test]
fn test_same_base_domain() {
    assert!(same_base_domain("www.example.com", "example.com"));
    assert!(same_base_domain("a.example.com", "b.example.com"));
    assert!(!same_base_domain("www.example.com", "www.example.org"));
}
