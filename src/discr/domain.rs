//! Rectangular domains `[a_1, b_1] x ... x [a_d, b_d]`.

use std::fmt;

use crate::error::{FnError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalProd {
    begin: Vec<f64>,
    end: Vec<f64>,
}

impl IntervalProd {
    /// Product of intervals `[begin[i], end[i]]`. Every axis must have
    /// positive, finite extent.
    pub fn new(begin: Vec<f64>, end: Vec<f64>) -> Result<IntervalProd> {
        if begin.is_empty() || begin.len() != end.len() {
            return Err(FnError::Value(format!(
                "begin has {} entries, end has {}",
                begin.len(),
                end.len()
            )));
        }
        for (axis, (a, b)) in begin.iter().zip(&end).enumerate() {
            if !(a.is_finite() && b.is_finite() && a < b) {
                return Err(FnError::Value(format!(
                    "axis {axis}: [{a}, {b}] is not a proper interval"
                )));
            }
        }
        Ok(IntervalProd { begin, end })
    }

    pub fn interval(begin: f64, end: f64) -> Result<IntervalProd> {
        IntervalProd::new(vec![begin], vec![end])
    }

    pub fn rectangle(begin: [f64; 2], end: [f64; 2]) -> Result<IntervalProd> {
        IntervalProd::new(begin.to_vec(), end.to_vec())
    }

    pub fn cuboid(begin: [f64; 3], end: [f64; 3]) -> Result<IntervalProd> {
        IntervalProd::new(begin.to_vec(), end.to_vec())
    }

    pub fn ndim(&self) -> usize {
        self.begin.len()
    }

    pub fn begin(&self) -> &[f64] {
        &self.begin
    }

    pub fn end(&self) -> &[f64] {
        &self.end
    }

    /// Side lengths per axis.
    pub fn extent(&self) -> Vec<f64> {
        self.begin.iter().zip(&self.end).map(|(a, b)| b - a).collect()
    }

    pub fn volume(&self) -> f64 {
        self.extent().iter().product()
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.ndim()
            && point
                .iter()
                .zip(self.begin.iter().zip(&self.end))
                .all(|(x, (a, b))| a <= x && x <= b)
    }
}

impl fmt::Display for IntervalProd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ndim() {
            1 => write!(f, "Interval({}, {})", self.begin[0], self.end[0]),
            2 => write!(f, "Rectangle({:?}, {:?})", self.begin, self.end),
            3 => write!(f, "Cuboid({:?}, {:?})", self.begin, self.end),
            _ => write!(f, "IntervalProd({:?}, {:?})", self.begin, self.end),
        }
    }
}
