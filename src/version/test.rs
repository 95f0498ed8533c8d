use super::{Direction, NameErrorKind, parse_name};

#[test]
fn valid_names() {
    let cases = [
        ("1_up_foo.sql", 1, Direction::Upgrade),
        ("001_up_foo.sql", 1, Direction::Upgrade),
        ("001_dn_foo.sql", 1, Direction::Rollback),
        ("001_down_foo.sql", 1, Direction::Rollback),
        ("1_dn", 1, Direction::Rollback),
        ("1_down", 1, Direction::Rollback),
        ("1_up.sql", 1, Direction::Upgrade),
        ("12-UP-create_users.sql", 12, Direction::Upgrade),
        ("7_Down", 7, Direction::Rollback),
    ];
    for (name, number, direction) in cases {
        assert_eq!(parse_name(name), Ok(Some((number, direction))), "{name}");
    }
}

#[test]
fn skipped_names() {
    for name in ["_up.sql", "1.sql", "1_", "1", "README.md", ".1_up.sql", ""] {
        assert_eq!(parse_name(name), Ok(None), "{name}");
    }
}

#[test]
fn malformed_names() {
    let cases = [
        ("1__.sql", 2..3, NameErrorKind::InvalidSyntax),
        ("1_nope_foo.sql", 2..6, NameErrorKind::InvalidSyntax),
        ("1_nopebutquiteabitlonger_foo.sql", 2..24, NameErrorKind::InvalidSyntax),
        ("1_upgrade.sql", 2..9, NameErrorKind::InvalidSyntax),
        ("0_up.sql", 0..1, NameErrorKind::Zero),
        ("000-down", 0..3, NameErrorKind::Zero),
        ("99999999999999999999999_up", 0..23, NameErrorKind::Overflow),
    ];
    for (name, span, reason) in cases {
        let err = parse_name(name).unwrap_err();
        assert_eq!(err.span, span, "{name}");
        assert_eq!(err.reason, reason, "{name}");
    }
}
