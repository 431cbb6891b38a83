//! Regular sampling grids.

use std::fmt;

use ndarray::{Array, IxDyn};

use crate::core::value::Order;
use crate::discr::domain::IntervalProd;
use crate::error::{FnError, Result};

/// Tensor grid of `shape` points starting at `min_pt` with spacing `stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid {
    min_pt: Vec<f64>,
    stride: Vec<f64>,
    shape: Vec<usize>,
}

impl RegularGrid {
    pub fn new(min_pt: Vec<f64>, stride: Vec<f64>, shape: Vec<usize>) -> Result<RegularGrid> {
        if shape.is_empty() || min_pt.len() != shape.len() || stride.len() != shape.len() {
            return Err(FnError::Value(format!(
                "grid of {} axes needs as many min/stride entries, got {} and {}",
                shape.len(),
                min_pt.len(),
                stride.len()
            )));
        }
        if shape.contains(&0) {
            return Err(FnError::Value(format!("grid shape {shape:?} has an empty axis")));
        }
        if stride.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(FnError::Value(format!("grid strides {stride:?} must be positive")));
        }
        Ok(RegularGrid {
            min_pt,
            stride,
            shape,
        })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of grid points.
    pub fn ntotal(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn stride(&self) -> &[f64] {
        &self.stride
    }

    pub fn min_pt(&self) -> &[f64] {
        &self.min_pt
    }

    pub fn max_pt(&self) -> Vec<f64> {
        self.min_pt
            .iter()
            .zip(&self.stride)
            .zip(&self.shape)
            .map(|((x0, h), &n)| x0 + h * (n - 1) as f64)
            .collect()
    }

    /// Volume of one grid cell.
    pub fn cell_volume(&self) -> f64 {
        self.stride.iter().product()
    }

    /// Coordinates of the point with multi-index `index`.
    pub fn point(&self, index: &[usize]) -> Option<Vec<f64>> {
        if index.len() != self.ndim() || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }
        Some(
            self.min_pt
                .iter()
                .zip(&self.stride)
                .zip(index)
                .map(|((x0, h), &i)| x0 + h * i as f64)
                .collect(),
        )
    }

    /// All points, flattened in `order`.
    pub fn points(&self, order: Order) -> Vec<Vec<f64>> {
        let points = Array::from_shape_fn(IxDyn(&self.shape), |index: IxDyn| {
            self.min_pt
                .iter()
                .zip(&self.stride)
                .enumerate()
                .map(|(axis, (x0, h))| x0 + h * index[axis] as f64)
                .collect::<Vec<f64>>()
        });
        order.flatten(points.view())
    }

    /// Whether every grid point lies in `domain`.
    pub fn is_subset_of(&self, domain: &IntervalProd) -> bool {
        domain.ndim() == self.ndim()
            && domain.contains(&self.min_pt)
            && domain.contains(&self.max_pt())
    }
}

impl fmt::Display for RegularGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegularGrid({:?}, {:?}, {:?})", self.min_pt, self.max_pt(), self.shape)
    }
}

/// Cell-centred sampling of `domain` with `shape` points per axis.
///
/// Each axis is split into `shape[i]` equal cells and sampled at the cell
/// midpoints, so the grid stays strictly inside the domain.
pub fn uniform_sampling(domain: &IntervalProd, shape: &[usize]) -> Result<RegularGrid> {
    if shape.len() != domain.ndim() {
        return Err(FnError::Value(format!(
            "cannot sample a {}-dimensional domain with shape {shape:?}",
            domain.ndim()
        )));
    }
    if shape.contains(&0) {
        return Err(FnError::Value(format!("grid shape {shape:?} has an empty axis")));
    }
    let stride: Vec<f64> = domain
        .extent()
        .iter()
        .zip(shape)
        .map(|(len, &n)| len / n as f64)
        .collect();
    let min_pt = domain
        .begin()
        .iter()
        .zip(&stride)
        .map(|(a, h)| a + h / 2.0)
        .collect();
    RegularGrid::new(min_pt, stride, shape.to_vec())
}
