//! Integration tests for unit conversion

use holocron_foundation::units::{convert, convert_between, to_canonical};
use holocron_foundation::{Family, LengthUnit, MassUnit, Unit};
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1e-12)
}

// =============================================================================
// Fixed Factors
// =============================================================================

#[test]
fn luke_is_one_point_seven_two_meters() {
    let canonical = to_canonical(172.0, LengthUnit::Centimeter.into());
    assert!(close(convert(canonical, LengthUnit::Meter.into()), 1.72));
}

#[test]
fn tatooine_diameter_in_miles() {
    let canonical = to_canonical(10_465.0, LengthUnit::Kilometer.into());
    let miles = convert(canonical, LengthUnit::Mile.into());
    assert!((miles - 6502.64).abs() < 0.01, "{miles}");
}

#[test]
fn mass_in_pounds() {
    let pounds = convert(77.0, MassUnit::Pound.into());
    assert!((pounds - 169.756).abs() < 0.001, "{pounds}");
}

#[test]
fn every_unit_parses_from_its_name() {
    for family in [Family::Length, Family::Mass] {
        for unit in family.units() {
            assert_eq!(Unit::parse_in(family, unit.name()), Some(unit));
            assert_eq!(unit.family(), family);
        }
    }
}

#[test]
fn unit_names_do_not_cross_families() {
    assert_eq!(Unit::parse_in(Family::Mass, "METER"), None);
    assert_eq!(Unit::parse_in(Family::Length, "POUND"), None);
    assert_eq!(Unit::parse_in(Family::Length, "meter"), None);
}

#[test]
fn mixed_family_conversion_fails() {
    assert!(convert_between(1.0, LengthUnit::Foot.into(), MassUnit::Pound.into()).is_err());
}

// =============================================================================
// Properties
// =============================================================================

fn any_unit() -> impl Strategy<Value = Unit> {
    prop_oneof![
        prop::sample::select(Family::Length.units()),
        prop::sample::select(Family::Mass.units()),
    ]
}

proptest! {
    #[test]
    fn canonical_to_unit_and_back(v in 0.0f64..1e12, unit in any_unit()) {
        let back = to_canonical(convert(v, unit), unit);
        prop_assert!(close(back, v), "{} -> {} -> {}", v, unit, back);
    }

    #[test]
    fn conversion_is_monotonic(a in 0.0f64..1e9, b in 0.0f64..1e9, unit in any_unit()) {
        prop_assume!(a < b);
        prop_assert!(convert(a, unit) <= convert(b, unit));
    }

    #[test]
    fn chained_equals_direct(v in 0.0f64..1e9, u1 in any_unit(), u2 in any_unit()) {
        prop_assume!(u1.family() == u2.family());
        let via = convert_between(convert(v, u1), u1, u2).unwrap();
        prop_assert!(close(via, convert(v, u2)));
    }
}
