mod ristretto255;

/// Field element type used throughout the circuit front end
pub type FieldElement = ristretto255::FieldElement;

/// Trait for converting primitive types to FieldElement
pub trait FieldFromPrimitives {
  /// Convert to FieldElement
  fn to_field(self) -> FieldElement;
}

impl FieldFromPrimitives for usize {
  #[inline]
  fn to_field(self) -> FieldElement {
    FieldElement::from_u64(self as u64)
  }
}

impl FieldFromPrimitives for bool {
  #[inline]
  fn to_field(self) -> FieldElement {
    if self {
      FieldElement::one()
    } else {
      FieldElement::zero()
    }
  }
}
