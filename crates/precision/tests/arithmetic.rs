//! Integration tests for high-precision arithmetic through the public API.

use approx::assert_abs_diff_eq;
use daub_precision::{ComplexOps, ComplexReal, Precision, Real};
use num_traits::{One, ToPrimitive, Zero};

fn prec() -> Precision {
    Precision::from_bits(320).unwrap()
}

#[test]
fn complex_field_arithmetic_via_num_complex() {
    let p = prec();
    let a = ComplexReal::new(p.ratio(1, 2), p.ratio(-3, 4));
    let b = ComplexReal::new(p.int(2), p.ratio(1, 8));
    let sum = &a + &b;
    let prod = &a * &b;
    assert_abs_diff_eq!(sum.re.to_f64().unwrap(), 2.5, epsilon = 1e-15);
    assert_abs_diff_eq!(sum.im.to_f64().unwrap(), -0.625, epsilon = 1e-15);
    // (0.5 - 0.75i)(2 + 0.125i) = 1.09375 - 1.4375i
    assert_abs_diff_eq!(prod.re.to_f64().unwrap(), 1.09375, epsilon = 1e-15);
    assert_abs_diff_eq!(prod.im.to_f64().unwrap(), -1.4375, epsilon = 1e-15);
}

#[test]
fn powers_of_a_unit_complex_stay_on_the_circle() {
    let p = prec();
    let s = p.sqrt2().halve();
    let w = ComplexReal::new(s.clone(), s); // exp(i*pi/4)
    let mut z = ComplexReal::one();
    for _ in 0..8 {
        z = &z * &w;
    }
    let err = (&z - ComplexReal::one()).modulus();
    assert!(err <= p.tolerance(8));
}

#[test]
fn division_round_trip_at_high_precision() {
    let p = prec();
    let a = ComplexReal::new(p.parse("0.2679491924311227064725536584941276330571947461896193719441930205").unwrap(), p.int(0));
    let b = ComplexReal::new(p.int(1), p.int(0)) - &a;
    let q = a.checked_div(&b).unwrap();
    let back = &q * &b;
    assert!((&back.re - &a.re).abs() <= p.tolerance(8));
    assert!(back.im.abs() <= p.tolerance(8));
}

#[test]
fn rendering_of_known_constants() {
    let p = prec();
    assert_eq!(
        p.sqrt2().to_significant(37),
        "1.414213562373095048801688724209698079"
    );
    assert_eq!(p.sqrt2().halve().to_significant(17), "0.70710678118654752");
}

#[test]
fn display_and_parse_agree() {
    let p = prec();
    let x = p.ratio(-22, 7);
    let text = format!("{x:.60}");
    let back = p.parse(&text).unwrap();
    assert!((back - x).abs() <= p.decimal_tolerance(58));
}

#[test]
fn sums_of_reals() {
    let p = prec();
    let parts: Vec<Real> = (1..=4).map(|k| p.ratio(1, 1 << k)).collect();
    let total: Real = parts.iter().sum();
    // 1/2 + 1/4 + 1/8 + 1/16
    assert_eq!(total, p.ratio(15, 16));
    assert!(!total.is_zero());
}
