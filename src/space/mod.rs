//! Vector spaces and their elements.
//!
//! [`Space`] is the closed set of spaces operators can act between:
//! plain `F^n` spaces, products of spaces, and discretized `L2` spaces.
//! [`Element`] mirrors it for the vectors those spaces produce. Every
//! element carries its space, so membership checks are a comparison.

pub mod fn_space;
pub mod product;

use std::fmt;

use num_complex::Complex64;

use crate::core::dtype::{DType, Field};
use crate::core::scalar::Number;
use crate::core::value::Value;
use crate::discr::discrete_l2::{DiscreteL2, DiscreteVector};
use crate::error::{FnError, Result};

pub use fn_space::{FnSpace, Vector, cn, rn};
pub use product::{ProductSpace, ProductVector};

#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    Fn(FnSpace),
    Product(ProductSpace),
    Discrete(DiscreteL2),
}

impl Space {
    pub fn field(&self) -> Field {
        match self {
            Space::Fn(s) => s.field(),
            Space::Product(s) => s.field(),
            Space::Discrete(s) => s.field(),
        }
    }

    /// Element dtype; `None` for products with mixed dtypes.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Space::Fn(s) => Some(s.dtype()),
            Space::Product(s) => s.dtype(),
            Space::Discrete(s) => Some(s.dtype()),
        }
    }

    /// Number of scalar entries of an element.
    pub fn size(&self) -> usize {
        match self {
            Space::Fn(s) => s.size(),
            Space::Product(s) => s.size(),
            Space::Discrete(s) => s.size(),
        }
    }

    pub fn zero(&self) -> Element {
        match self {
            Space::Fn(s) => Element::Fn(s.zero()),
            Space::Product(s) => Element::Product(s.zero()),
            Space::Discrete(s) => Element::Discrete(s.zero()),
        }
    }

    pub fn empty(&self) -> Element {
        match self {
            Space::Fn(s) => Element::Fn(s.empty()),
            Space::Product(s) => Element::Product(s.empty()),
            Space::Discrete(s) => Element::Discrete(s.empty()),
        }
    }

    pub fn element(&self, data: impl Into<Value>) -> Result<Element> {
        Ok(match self {
            Space::Fn(s) => Element::Fn(s.element(data)?),
            Space::Product(s) => Element::Product(s.element(data)?),
            Space::Discrete(s) => Element::Discrete(s.element(data)?),
        })
    }

    /// Whether elements can be scaled by `scalar` without leaving the space.
    pub fn accepts_scalar(&self, scalar: Number) -> bool {
        match self {
            Space::Fn(s) => s.accepts_scalar(scalar),
            Space::Product(s) => s.accepts_scalar(scalar),
            Space::Discrete(s) => s.dspace().accepts_scalar(scalar),
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Fn(s) => s.fmt(f),
            Space::Product(s) => s.fmt(f),
            Space::Discrete(s) => s.fmt(f),
        }
    }
}

impl From<FnSpace> for Space {
    fn from(s: FnSpace) -> Space {
        Space::Fn(s)
    }
}

impl From<ProductSpace> for Space {
    fn from(s: ProductSpace) -> Space {
        Space::Product(s)
    }
}

impl From<DiscreteL2> for Space {
    fn from(s: DiscreteL2) -> Space {
        Space::Discrete(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Fn(Vector),
    Product(ProductVector),
    Discrete(DiscreteVector),
}

impl Element {
    pub fn space(&self) -> Space {
        match self {
            Element::Fn(v) => Space::Fn(*v.space()),
            Element::Product(v) => Space::Product(v.space().clone()),
            Element::Discrete(v) => Space::Discrete(v.space().clone()),
        }
    }

    pub fn belongs_to(&self, space: &Space) -> bool {
        match (self, space) {
            (Element::Fn(v), Space::Fn(s)) => v.space() == s,
            (Element::Product(v), Space::Product(s)) => v.space() == s,
            (Element::Discrete(v), Space::Discrete(s)) => v.space() == s,
            _ => false,
        }
    }

    /// Flat vector behind an `F^n` or discretized element.
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Element::Fn(v) => Some(v),
            Element::Discrete(v) => Some(v.ntuple()),
            Element::Product(_) => None,
        }
    }

    pub fn as_vector_mut(&mut self) -> Option<&mut Vector> {
        match self {
            Element::Fn(v) => Some(v),
            Element::Discrete(v) => Some(v.ntuple_mut()),
            Element::Product(_) => None,
        }
    }

    fn check_same_space(&self, other: &Element) -> Result<()> {
        let space = self.space();
        if !other.belongs_to(&space) {
            return Err(FnError::Type(format!("{} is not {space}", other.space())));
        }
        Ok(())
    }

    /// `self *= scalar`.
    pub fn scale(&mut self, scalar: Number) -> Result<()> {
        match self {
            Element::Product(p) => p.parts_mut().iter_mut().try_for_each(|x| x.scale(scalar)),
            other => other.flat_mut()?.scale(scalar),
        }
    }

    /// `self += other`.
    pub fn add_assign(&mut self, other: &Element) -> Result<()> {
        self.check_same_space(other)?;
        match (self, other) {
            (Element::Product(a), Element::Product(b)) => a
                .parts_mut()
                .iter_mut()
                .zip(b.parts())
                .try_for_each(|(x, y)| x.add_assign(y)),
            (a, b) => a.flat_mut()?.add_assign(b.flat()?),
        }
    }

    /// Overwrite with the contents of `other`, which must share the space.
    pub fn copy_from(&mut self, other: &Element) -> Result<()> {
        self.check_same_space(other)?;
        match (self, other) {
            (Element::Product(a), Element::Product(b)) => a
                .parts_mut()
                .iter_mut()
                .zip(b.parts())
                .try_for_each(|(x, y)| x.copy_from(y)),
            (a, b) => a.flat_mut()?.copy_from(b.flat()?),
        }
    }

    /// `<self, other>`; products sum their component inner products.
    pub fn inner(&self, other: &Element) -> Result<Number> {
        self.check_same_space(other)?;
        match (self, other) {
            (Element::Product(a), Element::Product(b)) => {
                let mut acc = Complex64::new(0.0, 0.0);
                for (x, y) in a.parts().iter().zip(b.parts()) {
                    acc += x.inner(y)?.to_complex();
                }
                Ok(match self.space().field() {
                    Field::Real => Number::Real(acc.re),
                    Field::Complex => Number::Complex(acc),
                })
            }
            (a, b) => a.flat()?.inner(b.flat()?),
        }
    }

    pub fn norm(&self) -> f64 {
        match self {
            Element::Product(p) => p
                .parts()
                .iter()
                .map(|x| x.norm().powi(2))
                .sum::<f64>()
                .sqrt(),
            Element::Fn(v) => v.norm(),
            Element::Discrete(v) => v.ntuple().norm(),
        }
    }

    /// Overwrite all entries from `value`, broadcasting scalars.
    pub fn assign(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self {
            Element::Fn(v) => v.assign(value),
            Element::Discrete(v) => v.assign(value),
            Element::Product(p) => {
                if let Value::Number(_) = value {
                    return p.parts_mut().iter_mut().try_for_each(|x| x.assign(value.clone()));
                }
                let children = value.children().unwrap_or_default();
                if children.len() != p.parts().len() {
                    return Err(FnError::Shape(format!(
                        "expected {} parts, got {}",
                        p.parts().len(),
                        children.len()
                    )));
                }
                // validate every part before writing any
                let staged = p
                    .space()
                    .components()
                    .iter()
                    .zip(children)
                    .map(|(s, c)| s.element(c))
                    .collect::<Result<Vec<_>>>()?;
                for (x, y) in p.parts_mut().iter_mut().zip(staged) {
                    *x = y;
                }
                Ok(())
            }
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Element::Fn(v) => v.to_value(),
            Element::Product(v) => v.to_value(),
            Element::Discrete(v) => v.to_value(),
        }
    }

    fn flat(&self) -> Result<&Vector> {
        self.as_vector()
            .ok_or_else(|| FnError::Type("product element has no flat representation".into()))
    }

    fn flat_mut(&mut self) -> Result<&mut Vector> {
        self.as_vector_mut()
            .ok_or_else(|| FnError::Type("product element has no flat representation".into()))
    }
}

impl From<Vector> for Element {
    fn from(v: Vector) -> Element {
        Element::Fn(v)
    }
}

impl From<ProductVector> for Element {
    fn from(v: ProductVector) -> Element {
        Element::Product(v)
    }
}

impl From<DiscreteVector> for Element {
    fn from(v: DiscreteVector) -> Element {
        Element::Discrete(v)
    }
}

impl From<&Element> for Value {
    fn from(e: &Element) -> Value {
        e.to_value()
    }
}

impl From<Element> for Value {
    fn from(e: Element) -> Value {
        e.to_value()
    }
}
