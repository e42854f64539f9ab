//! Prime field arithmetic over the scalar field of Curve25519 / Ristretto255.
//!
//! The modulus is `l = 2^252 + 27742317777372353535851937790883648493`.
//! All arithmetic is delegated to `curve25519_dalek::scalar::Scalar`, which keeps
//! every value reduced and runs in constant time.
use super::super::errors::FieldError;
use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};

/// An element of `Z/lZ`, always in canonical form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FieldElement(DalekScalar);

impl FieldElement {
  /// The additive identity.
  pub const ZERO: FieldElement = FieldElement(DalekScalar::ZERO);

  /// The multiplicative identity.
  pub const ONE: FieldElement = FieldElement(DalekScalar::ONE);

  pub fn zero() -> FieldElement {
    FieldElement::ZERO
  }

  pub fn one() -> FieldElement {
    FieldElement::ONE
  }

  pub fn from_u64(value: u64) -> FieldElement {
    FieldElement(DalekScalar::from(value))
  }

  /// Negative values map to `l - |value|`.
  pub fn from_i64(value: i64) -> FieldElement {
    let magnitude = FieldElement::from_u64(value.unsigned_abs());
    if value < 0 {
      -magnitude
    } else {
      magnitude
    }
  }

  pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> FieldElement {
    let mut bytes = [0u8; 64];
    rng.fill_bytes(&mut bytes);
    FieldElement(DalekScalar::from_bytes_mod_order_wide(&bytes))
  }

  /// Decodes a little-endian canonical encoding. Encodings of values `>= l`
  /// are rejected rather than reduced.
  pub fn from_bytes(bytes: &[u8; 32]) -> Option<FieldElement> {
    Option::<DalekScalar>::from(DalekScalar::from_canonical_bytes(*bytes)).map(FieldElement)
  }

  /// Reduces an arbitrary 32-byte little-endian integer modulo `l`.
  pub fn from_bytes_mod_order(bytes: [u8; 32]) -> FieldElement {
    FieldElement(DalekScalar::from_bytes_mod_order(bytes))
  }

  pub fn to_bytes(&self) -> [u8; 32] {
    self.0.to_bytes()
  }

  pub fn is_zero(&self) -> bool {
    bool::from(self.ct_eq(&FieldElement::ZERO))
  }

  pub fn is_one(&self) -> bool {
    bool::from(self.ct_eq(&FieldElement::ONE))
  }

  pub fn square(&self) -> FieldElement {
    FieldElement(self.0 * self.0)
  }

  /// Square-and-multiply over the bits of `exp`, most significant first.
  pub fn pow(&self, exp: u64) -> FieldElement {
    let mut acc = FieldElement::ONE;
    for i in (0..64).rev() {
      acc = acc.square();
      if (exp >> i) & 1 == 1 {
        acc *= *self;
      }
    }
    acc
  }

  /// Multiplicative inverse; fails on the additive identity.
  pub fn invert(&self) -> Result<FieldElement, FieldError> {
    if self.is_zero() {
      return Err(FieldError::DivisionByZero);
    }
    Ok(FieldElement(self.0.invert()))
  }

  /// `self / other`, failing when `other` is zero.
  pub fn div(&self, other: &FieldElement) -> Result<FieldElement, FieldError> {
    Ok(*self * other.invert()?)
  }

  /// Returns `Some(v)` when the element equals the integer `v < 2^64`.
  pub fn to_u64(&self) -> Option<u64> {
    let bytes = self.to_bytes();
    if bytes[8..].iter().any(|b| *b != 0) {
      return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[..8]);
    Some(u64::from_le_bytes(low))
  }
}

impl ConstantTimeEq for FieldElement {
  fn ct_eq(&self, other: &FieldElement) -> Choice {
    self.0.ct_eq(&other.0)
  }
}

impl PartialEq for FieldElement {
  fn eq(&self, other: &FieldElement) -> bool {
    bool::from(self.ct_eq(other))
  }
}

impl Eq for FieldElement {}

impl Default for FieldElement {
  fn default() -> FieldElement {
    FieldElement::ZERO
  }
}

impl From<u64> for FieldElement {
  fn from(value: u64) -> FieldElement {
    FieldElement::from_u64(value)
  }
}

impl From<u32> for FieldElement {
  fn from(value: u32) -> FieldElement {
    FieldElement::from_u64(value as u64)
  }
}

impl From<i64> for FieldElement {
  fn from(value: i64) -> FieldElement {
    FieldElement::from_i64(value)
  }
}

impl From<bool> for FieldElement {
  fn from(value: bool) -> FieldElement {
    if value {
      FieldElement::ONE
    } else {
      FieldElement::ZERO
    }
  }
}

/// Small magnitudes print as signed decimals, everything else as big-endian hex.
impl fmt::Display for FieldElement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(v) = self.to_u64() {
      return write!(f, "{v}");
    }
    if let Some(v) = (-*self).to_u64() {
      return write!(f, "-{v}");
    }
    write!(f, "0x")?;
    for byte in self.to_bytes().iter().rev() {
      write!(f, "{byte:02x}")?;
    }
    Ok(())
  }
}

macro_rules! impl_binop {
  ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
    impl $trait<FieldElement> for FieldElement {
      type Output = FieldElement;
      #[inline]
      fn $method(self, rhs: FieldElement) -> FieldElement {
        FieldElement(self.0 $op rhs.0)
      }
    }

    impl<'a> $trait<&'a FieldElement> for FieldElement {
      type Output = FieldElement;
      #[inline]
      fn $method(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement(self.0 $op rhs.0)
      }
    }

    impl<'a, 'b> $trait<&'b FieldElement> for &'a FieldElement {
      type Output = FieldElement;
      #[inline]
      fn $method(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement(self.0 $op rhs.0)
      }
    }

    impl $assign_trait<FieldElement> for FieldElement {
      #[inline]
      fn $assign_method(&mut self, rhs: FieldElement) {
        *self = *self $op rhs;
      }
    }

    impl<'a> $assign_trait<&'a FieldElement> for FieldElement {
      #[inline]
      fn $assign_method(&mut self, rhs: &'a FieldElement) {
        *self = *self $op *rhs;
      }
    }
  };
}

impl_binop!(Add, add, AddAssign, add_assign, +);
impl_binop!(Sub, sub, SubAssign, sub_assign, -);
impl_binop!(Mul, mul, MulAssign, mul_assign, *);

impl Neg for FieldElement {
  type Output = FieldElement;
  #[inline]
  fn neg(self) -> FieldElement {
    FieldElement(-self.0)
  }
}

impl<'a> Neg for &'a FieldElement {
  type Output = FieldElement;
  #[inline]
  fn neg(self) -> FieldElement {
    FieldElement(-self.0)
  }
}

impl Sum for FieldElement {
  fn sum<I: Iterator<Item = FieldElement>>(iter: I) -> FieldElement {
    iter.fold(FieldElement::ZERO, |acc, x| acc + x)
  }
}

impl<'a> Sum<&'a FieldElement> for FieldElement {
  fn sum<I: Iterator<Item = &'a FieldElement>>(iter: I) -> FieldElement {
    iter.fold(FieldElement::ZERO, |acc, x| acc + x)
  }
}

impl Product for FieldElement {
  fn product<I: Iterator<Item = FieldElement>>(iter: I) -> FieldElement {
    iter.fold(FieldElement::ONE, |acc, x| acc * x)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::OsRng;

  #[test]
  fn test_small_arithmetic() {
    let a = FieldElement::from_u64(5);
    let b = FieldElement::from_u64(7);
    assert_eq!(a + b, FieldElement::from_u64(12));
    assert_eq!(a * b, FieldElement::from_u64(35));
    assert_eq!(b - a, FieldElement::from_u64(2));
    assert_eq!(a - b, FieldElement::from_i64(-2));
    assert_eq!(FieldElement::from_u64(3).pow(3), FieldElement::from_u64(27));
  }

  #[test]
  fn test_negation_wraps() {
    let one = FieldElement::ONE;
    assert_eq!(-one + one, FieldElement::ZERO);
    assert_eq!(-FieldElement::ZERO, FieldElement::ZERO);
    assert_eq!(FieldElement::from_i64(-1) * FieldElement::from_i64(-1), one);
  }

  #[test]
  fn test_invert() {
    let mut csprng = OsRng;
    for _ in 0..16 {
      let x = FieldElement::random(&mut csprng);
      if x.is_zero() {
        continue;
      }
      let x_inv = x.invert().unwrap();
      assert_eq!(x * x_inv, FieldElement::ONE);
    }
    assert_eq!(FieldElement::ZERO.invert(), Err(FieldError::DivisionByZero));
    assert_eq!(
      FieldElement::from_u64(35).div(&FieldElement::from_u64(5)),
      Ok(FieldElement::from_u64(7))
    );
  }

  #[test]
  fn test_canonical_bytes() {
    let x = FieldElement::from_u64(0xdead_beef);
    assert_eq!(FieldElement::from_bytes(&x.to_bytes()), Some(x));

    // 2^256 - 1 is far above the modulus
    assert_eq!(FieldElement::from_bytes(&[0xff; 32]), None);
    assert!(!FieldElement::from_bytes_mod_order([0xff; 32]).is_zero());
  }

  #[test]
  fn test_display() {
    assert_eq!(FieldElement::from_u64(5).to_string(), "5");
    assert_eq!(FieldElement::from_i64(-1).to_string(), "-1");
    let big = FieldElement::from_u64(u64::MAX) * FieldElement::from_u64(u64::MAX);
    assert!(big.to_string().starts_with("0x"));
  }
}
