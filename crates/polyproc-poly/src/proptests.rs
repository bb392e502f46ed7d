//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::ops::{self, MAX_MAGNITUDE};
    use crate::Polynomial;

    // Small integer coefficients keep f64 arithmetic exact.
    fn small_coeff() -> impl Strategy<Value = f64> {
        (-10i32..10i32).prop_map(f64::from)
    }

    // Degree 0-4, possibly with trailing zeros (capacity != degree + 1).
    fn small_poly() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec(small_coeff(), 1..=5)
            .prop_map(|coeffs| Polynomial::from_coefficients(coeffs).unwrap())
    }

    // Non-zero divisors whose leading coefficient is a small power of two,
    // so that long division stays exact.
    fn divisor() -> impl Strategy<Value = Polynomial> {
        (
            proptest::collection::vec(small_coeff(), 0..=3),
            prop_oneof![Just(1.0), Just(-1.0), Just(2.0), Just(-2.0)],
        )
            .prop_map(|(mut coeffs, lead)| {
                coeffs.push(lead);
                Polynomial::from_coefficients(coeffs).unwrap()
            })
    }

    fn approx_same(a: &Polynomial, b: &Polynomial) -> bool {
        let len = a.capacity().max(b.capacity());
        (0..len).all(|i| {
            let x = a.coeffs().get(i).copied().unwrap_or(0.0);
            let y = b.coeffs().get(i).copied().unwrap_or(0.0);
            (x - y).abs() <= 1e-9 * (1.0 + x.abs().max(y.abs()))
        })
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(ops::add(&a, &b), ops::add(&b, &a));
        }

        #[test]
        fn poly_add_identity(a in small_poly()) {
            let sum = ops::add(&a, &Polynomial::zero());
            prop_assert!(sum.numerically_eq(&a));
            prop_assert_eq!(sum.capacity(), a.leading_exponent() + 1);
        }

        #[test]
        fn poly_subtract_self_is_zero(a in small_poly()) {
            prop_assert!(ops::subtract(&a, &a).is_zero());
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert!(ops::multiply(&a, &b).numerically_eq(&ops::multiply(&b, &a)));
        }

        #[test]
        fn poly_mul_associative(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = ops::multiply(&a, &ops::multiply(&b, &c));
            let right = ops::multiply(&ops::multiply(&a, &b), &c);
            prop_assert!(left.numerically_eq(&right));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            // a * (b + c) = a * b + a * c
            let left = ops::multiply(&a, &ops::add(&b, &c));
            let right = ops::add(&ops::multiply(&a, &b), &ops::multiply(&a, &c));
            prop_assert!(left.numerically_eq(&right));
        }

        #[test]
        fn poly_derivative_of_constant(c in small_coeff()) {
            let d = ops::derivate(&Polynomial::constant(c));
            prop_assert!(d.is_zero());
            prop_assert_eq!(d.capacity(), 1);
        }

        #[test]
        fn poly_derivative_of_sum(a in small_poly(), b in small_poly()) {
            let left = ops::derivate(&ops::add(&a, &b));
            let right = ops::add(&ops::derivate(&a), &ops::derivate(&b));
            prop_assert!(left.numerically_eq(&right));
        }

        #[test]
        fn poly_power_zero_and_one(a in small_poly()) {
            prop_assert_eq!(ops::to_power(&a, 0).unwrap(), Polynomial::one());
            prop_assert!(ops::to_power(&a, 1).unwrap().numerically_eq(&a));
        }

        #[test]
        fn poly_power_matches_repeated_product(a in small_poly(), n in 2i64..5) {
            let mut expected = Polynomial::one();
            for _ in 0..n {
                expected = ops::multiply(&expected, &a);
            }
            prop_assert!(ops::to_power(&a, n).unwrap().numerically_eq(&expected));
        }

        #[test]
        fn poly_division_identity(p1 in small_poly(), p2 in divisor()) {
            // q * p2 + r = p1
            let division = ops::divide(&p1, &p2).unwrap();
            let rebuilt = ops::add(
                &ops::multiply(&division.quotient, &p2),
                &division.remainder_or_zero(),
            );
            prop_assert!(approx_same(&rebuilt, &p1), "{} != {}", rebuilt, p1);
        }

        #[test]
        fn poly_division_remainder_degree(p1 in small_poly(), p2 in divisor()) {
            let division = ops::divide(&p1, &p2).unwrap();
            if let Some(r) = division.remainder {
                prop_assert!(r.is_zero() || r.leading_exponent() < p2.leading_exponent());
            } else {
                prop_assert_eq!(p2.leading_exponent(), 0);
            }
        }

        #[test]
        fn poly_power_allowed_boundary(degree in 0usize..MAX_MAGNITUDE, power in 0i64..1100) {
            let p = Polynomial::monomial(1.0, degree);
            let magnitude = (degree as i64 + 1) * power;
            prop_assert_eq!(
                ops::is_power_allowed(&p, power),
                magnitude <= MAX_MAGNITUDE as i64
            );
        }

        #[test]
        fn poly_eval_add(a in small_poly(), b in small_poly(), x in -10i32..10) {
            // (a + b)(x) = a(x) + b(x)
            let x = f64::from(x);
            let left = ops::add(&a, &b).evaluate(x);
            let right = a.evaluate(x) + b.evaluate(x);
            prop_assert!((left - right).abs() <= 1e-9 * (1.0 + left.abs()));
        }

        #[test]
        fn poly_order_ignores_capacity(a in small_poly(), pad in 0usize..4) {
            let mut coeffs = a.coeffs().to_vec();
            coeffs.resize(coeffs.len() + pad, 0.0);
            let padded = Polynomial::from_coefficients(coeffs).unwrap();
            prop_assert!(padded.numerically_eq(&a));
            prop_assert_eq!(padded == a, pad == 0);
        }
    }
}
