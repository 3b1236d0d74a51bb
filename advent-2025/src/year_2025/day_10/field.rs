//! Coefficient fields for the elimination: GF(2) for light patterns, exact
//! rationals for joltage counters.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;

/// The operations Gaussian elimination needs from its coefficients.
pub trait Field: Clone + PartialEq + fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    /// Multiplicative inverse. Only called on nonzero elements.
    fn inv(&self) -> Self;

    /// Embeds a nonnegative integer.
    fn from_u64(value: u64) -> Self;
}

/// Element of GF(2): addition is XOR, multiplication is AND.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gf2(pub bool);

impl fmt::Debug for Gf2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(self.0))
    }
}

impl Field for Gf2 {
    fn zero() -> Self {
        Gf2(false)
    }

    fn one() -> Self {
        Gf2(true)
    }

    fn is_zero(&self) -> bool {
        !self.0
    }

    fn add(&self, rhs: &Self) -> Self {
        Gf2(self.0 ^ rhs.0)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Gf2(self.0 ^ rhs.0)
    }

    fn mul(&self, rhs: &Self) -> Self {
        Gf2(self.0 & rhs.0)
    }

    fn inv(&self) -> Self {
        debug_assert!(self.0, "zero has no inverse in GF(2)");
        *self
    }

    fn from_u64(value: u64) -> Self {
        Gf2(value & 1 == 1)
    }
}

impl Field for BigRational {
    fn zero() -> Self {
        <BigRational as Zero>::zero()
    }

    fn one() -> Self {
        <BigRational as One>::one()
    }

    fn is_zero(&self) -> bool {
        <BigRational as Zero>::is_zero(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn inv(&self) -> Self {
        self.recip()
    }

    fn from_u64(value: u64) -> Self {
        BigRational::from_integer(BigInt::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_gf2_tables() {
        let (o, i) = (Gf2::zero(), Gf2::one());
        assert_eq!(i.add(&i), o);
        assert_eq!(i.add(&o), i);
        assert_eq!(i.sub(&i), o);
        assert_eq!(i.mul(&o), o);
        assert_eq!(i.mul(&i), i);
        assert_eq!(i.inv(), i);
        assert_eq!(Gf2::from_u64(6), o);
        assert_eq!(Gf2::from_u64(7), i);
    }

    #[test]
    fn test_rational_exact() {
        let third = rat(1, 3);
        let sum = third.add(&third).add(&third);
        assert_eq!(sum, <BigRational as Field>::one());

        let x = rat(-6, 4);
        assert_eq!(x, rat(-3, 2));
        assert_eq!(Field::mul(&x, &Field::inv(&x)), <BigRational as Field>::one());
        assert!(Field::is_zero(&Field::sub(&x, &x)));
        assert_eq!(<BigRational as Field>::from_u64(12), rat(24, 2));
    }
}
