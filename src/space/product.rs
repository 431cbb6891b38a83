//! Cartesian products of spaces.
//!
//! A product is "power" when every component is the same space. Elements
//! of power spaces convert to one rectangular array with an extra leading
//! axis; elements of other products convert to a sequence of per-component
//! values whose shapes may differ.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::core::dtype::{DType, Field};
use crate::core::scalar::Number;
use crate::core::value::{NdArray, Value};
use crate::error::{FnError, Result};
use crate::space::{Element, Space};

#[derive(Debug, Clone)]
pub struct ProductSpace {
    components: Arc<[Space]>,
}

impl PartialEq for ProductSpace {
    fn eq(&self, other: &ProductSpace) -> bool {
        Arc::ptr_eq(&self.components, &other.components) || self.components == other.components
    }
}

impl ProductSpace {
    /// Product of `components`, which must be non-empty and share a field.
    pub fn new(components: Vec<Space>) -> Result<ProductSpace> {
        let first = components
            .first()
            .ok_or_else(|| FnError::Value("product of zero spaces".into()))?;
        let field = first.field();
        if let Some(bad) = components.iter().find(|s| s.field() != field) {
            return Err(FnError::Type(format!(
                "cannot combine {bad} ({}) with {first} ({field})",
                bad.field()
            )));
        }
        debug!("created product of {} spaces", components.len());
        Ok(ProductSpace {
            components: components.into(),
        })
    }

    /// `space^n`.
    pub fn power(space: Space, n: usize) -> Result<ProductSpace> {
        ProductSpace::new(vec![space; n])
    }

    pub fn components(&self) -> &[Space] {
        &self.components
    }

    pub fn component(&self, i: usize) -> Result<&Space> {
        self.components.get(i).ok_or(FnError::IndexOutOfBounds {
            index: i,
            len: self.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_power(&self) -> bool {
        self.components.windows(2).all(|w| w[0] == w[1])
    }

    pub fn field(&self) -> Field {
        self.components[0].field()
    }

    /// Common dtype of all components, if there is one.
    pub fn dtype(&self) -> Option<DType> {
        let first = self.components[0].dtype()?;
        self.components
            .iter()
            .all(|s| s.dtype() == Some(first))
            .then_some(first)
    }

    /// Total number of scalar entries.
    pub fn size(&self) -> usize {
        self.components.iter().map(Space::size).sum()
    }

    pub fn zero(&self) -> ProductVector {
        ProductVector {
            space: self.clone(),
            parts: self.components.iter().map(Space::zero).collect(),
        }
    }

    pub fn empty(&self) -> ProductVector {
        self.zero()
    }

    /// Build an element from one value per component. Power-space data may
    /// also be a single array whose leading axis runs over components.
    pub fn element(&self, data: impl Into<Value>) -> Result<ProductVector> {
        let value = data.into();
        let children = value.children().ok_or_else(|| {
            FnError::Shape(format!("expected {} parts for {self}, got a scalar", self.len()))
        })?;
        if children.len() != self.len() {
            return Err(FnError::Shape(format!(
                "expected {} parts for {self}, got {}",
                self.len(),
                children.len()
            )));
        }
        let parts = self
            .components
            .iter()
            .zip(children)
            .map(|(space, child)| space.element(child))
            .collect::<Result<Vec<_>>>()?;
        Ok(ProductVector {
            space: self.clone(),
            parts,
        })
    }

    /// Assemble an element from existing component elements.
    pub fn element_from_parts(&self, parts: Vec<Element>) -> Result<ProductVector> {
        if parts.len() != self.len() {
            return Err(FnError::Shape(format!(
                "expected {} parts for {self}, got {}",
                self.len(),
                parts.len()
            )));
        }
        if let Some((space, _)) = self
            .components
            .iter()
            .zip(&parts)
            .find(|(space, part)| !part.belongs_to(space))
        {
            return Err(FnError::Type(format!("part is not an element of {space}")));
        }
        Ok(ProductVector {
            space: self.clone(),
            parts,
        })
    }

    pub fn accepts_scalar(&self, scalar: Number) -> bool {
        self.components.iter().all(|s| s.accepts_scalar(scalar))
    }
}

impl fmt::Display for ProductSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_power() {
            return write!(f, "ProductSpace({}, {})", self.components[0], self.len());
        }
        write!(f, "ProductSpace(")?;
        for (i, s) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductVector {
    space: ProductSpace,
    parts: Vec<Element>,
}

impl ProductVector {
    pub fn space(&self) -> &ProductSpace {
        &self.space
    }

    pub fn parts(&self) -> &[Element] {
        &self.parts
    }

    pub fn part(&self, i: usize) -> Result<&Element> {
        let len = self.parts.len();
        self.parts
            .get(i)
            .ok_or(FnError::IndexOutOfBounds { index: i, len })
    }

    pub fn part_mut(&mut self, i: usize) -> Result<&mut Element> {
        let len = self.parts.len();
        self.parts
            .get_mut(i)
            .ok_or(FnError::IndexOutOfBounds { index: i, len })
    }

    pub fn into_parts(self) -> Vec<Element> {
        self.parts
    }

    pub(crate) fn parts_mut(&mut self) -> &mut [Element] {
        &mut self.parts
    }

    /// Stacked array for power spaces, a sequence of parts otherwise.
    pub fn to_value(&self) -> Value {
        let parts: Vec<Value> = self.parts.iter().map(Element::to_value).collect();
        if self.space.is_power() {
            let arrays: Option<Vec<NdArray>> = parts
                .iter()
                .map(|p| match p {
                    Value::Array(a) => Some(a.clone()),
                    _ => None,
                })
                .collect();
            if let Some(stacked) = arrays.and_then(|a| NdArray::stack(&a).ok()) {
                return Value::Array(stacked);
            }
        }
        Value::Seq(parts)
    }
}

impl From<&ProductVector> for Value {
    fn from(v: &ProductVector) -> Value {
        v.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::fn_space::{cn, rn};

    #[test]
    fn power_detection() {
        let r2 = Space::from(rn(2).unwrap());
        let r3 = Space::from(rn(3).unwrap());
        assert!(ProductSpace::power(r2.clone(), 3).unwrap().is_power());
        let mixed = ProductSpace::new(vec![r2, r3]).unwrap();
        assert!(!mixed.is_power());
        assert_eq!(mixed.size(), 5);
        assert_eq!(mixed.dtype(), Some(DType::F64));
    }

    #[test]
    fn mixed_fields_rejected() {
        let spaces = vec![Space::from(rn(2).unwrap()), Space::from(cn(2).unwrap())];
        assert!(ProductSpace::new(spaces).unwrap_err().is_type_error());
        assert!(ProductSpace::new(Vec::new()).unwrap_err().is_value_error());
    }

    #[test]
    fn power_elements_stack() {
        let pspace = ProductSpace::power(Space::from(rn(2).unwrap()), 2).unwrap();
        let x = pspace.element(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        match x.to_value() {
            Value::Array(a) => assert_eq!(a.shape(), &[2, 2]),
            other => panic!("expected array, got {other:?}"),
        }
        let y = pspace.element(x.to_value()).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn ragged_elements_stay_sequences() {
        let pspace =
            ProductSpace::new(vec![Space::from(rn(1).unwrap()), Space::from(rn(2).unwrap())])
                .unwrap();
        let x = pspace.element(vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
        assert!(matches!(x.to_value(), Value::Seq(ref p) if p.len() == 2));
        assert!(matches!(pspace.element(vec![vec![1.0]]), Err(FnError::Shape(_))));
    }
}
