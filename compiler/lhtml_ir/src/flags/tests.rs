use super::*;

#[test]
fn sensitive_leading_needs_both_flags() {
    assert!(!NodeFlags::HAS_LEADING_WHITESPACE.has_sensitive_leading_whitespace());
    assert!(!NodeFlags::LEADING_WHITESPACE_SENSITIVE.has_sensitive_leading_whitespace());
    assert!((NodeFlags::HAS_LEADING_WHITESPACE | NodeFlags::LEADING_WHITESPACE_SENSITIVE)
        .has_sensitive_leading_whitespace());
}

#[test]
fn dangling_needs_both_flags() {
    assert!(!NodeFlags::HAS_DANGLING_WHITESPACE.has_sensitive_dangling_whitespace());
    assert!((NodeFlags::HAS_DANGLING_WHITESPACE | NodeFlags::DANGLING_WHITESPACE_SENSITIVE)
        .has_sensitive_dangling_whitespace());
}

#[test]
fn pre_formatted() {
    assert!(!NodeFlags::WHITESPACE_SENSITIVE.is_pre_formatted());
    assert!((NodeFlags::WHITESPACE_SENSITIVE | NodeFlags::INDENTATION_SENSITIVE)
        .is_pre_formatted());
}
