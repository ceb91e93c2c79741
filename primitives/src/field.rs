use ark_bls12_381::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_std::{One, Zero};
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::{BigInt, Sign};

use crate::consts::BYTES_PER_FIELD_ELEMENT;

/// An element of the BLS12-381 scalar field.
///
/// The value is always held reduced modulo the field modulus; every
/// constructor and every arithmetic operation reduces immediately, so there
/// is no way to observe an un-reduced representation. The type is a plain
/// `Copy` value and carries no shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(Fr);

impl FieldElement {
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    pub fn one() -> Self {
        Self(Fr::one())
    }

    /// Interprets `bytes` as a big-endian unsigned integer of any width and
    /// reduces it modulo the field modulus. Overlong inputs wrap silently.
    pub fn from_bytes_reduced(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Reduces an arbitrary-precision signed integer into the field using the
    /// mathematical (always non-negative) modulo.
    pub fn from_bigint_reduced(n: &BigInt) -> Self {
        let modulus = Self::modulus();
        let reduced = ((n % &modulus) + &modulus) % &modulus;
        let (_, bytes) = reduced.to_bytes_be();
        Self::from_bytes_reduced(&bytes)
    }

    pub fn from_u64(n: u64) -> Self {
        Self(Fr::from(n))
    }

    /// The field modulus as a signed big integer.
    pub fn modulus() -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &Fr::MODULUS.to_bytes_be())
    }

    pub fn add_mod(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub_mod(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }

    pub fn mul_mod(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Self)
    }

    pub fn pow(&self, exponent: u64) -> Self {
        Self(self.0.pow([exponent]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// Canonical fixed-width big-endian encoding.
    pub fn to_bytes(&self) -> [u8; BYTES_PER_FIELD_ELEMENT] {
        let be = self.0.into_bigint().to_bytes_be();
        let mut out = [0u8; BYTES_PER_FIELD_ELEMENT];
        out[BYTES_PER_FIELD_ELEMENT - be.len()..].copy_from_slice(&be);
        out
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.to_bytes())
    }

    /// The underlying arkworks scalar, for MSM and pairing inputs.
    pub fn as_fr(&self) -> Fr {
        self.0
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Fr {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_mod(&rhs)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.sub_mod(&rhs)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.mul_mod(&rhs)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bigint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BLS_MODULUS_STR;

    #[test]
    fn test_modulus_matches_constant() {
        assert_eq!(FieldElement::modulus().to_string(), BLS_MODULUS_STR);
    }

    #[test]
    fn test_modulus_bytes_reduce_to_zero() {
        let (_, modulus_bytes) = FieldElement::modulus().to_bytes_be();
        assert!(FieldElement::from_bytes_reduced(&modulus_bytes).is_zero());
    }

    #[test]
    fn test_to_bytes_is_fixed_width() {
        let one = FieldElement::one().to_bytes();
        assert_eq!(one.len(), BYTES_PER_FIELD_ELEMENT);
        assert_eq!(one[BYTES_PER_FIELD_ELEMENT - 1], 1);
        assert!(one[..BYTES_PER_FIELD_ELEMENT - 1].iter().all(|b| *b == 0));
    }
}
